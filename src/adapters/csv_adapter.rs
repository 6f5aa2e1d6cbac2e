//! CSV file data adapter.
//!
//! Market data is a wide CSV: a `date` column followed by one column per
//! ticker. The cointegration table is one row per pair: independent
//! ticker, dependent ticker, hedge ratio, lookback. The pair's spread
//! series is derived from the price history with its hedge ratio.

use crate::domain::error::PairtraderError;
use crate::domain::market_data::MarketData;
use crate::domain::pair::{CointegrationResult, PairKey};
use crate::domain::spread::spread_series;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::PathBuf;

pub struct CsvAdapter {
    data_path: PathBuf,
    pairs_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(data_path: PathBuf, pairs_path: PathBuf) -> Self {
        Self {
            data_path,
            pairs_path,
        }
    }
}

fn field<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<&'a str, PairtraderError> {
    record.get(index).ok_or_else(|| PairtraderError::Data {
        reason: format!("missing {name} column"),
    })
}

impl DataPort for CsvAdapter {
    fn load_market_data(&self) -> Result<MarketData, PairtraderError> {
        let mut rdr =
            csv::Reader::from_path(&self.data_path).map_err(|e| PairtraderError::Data {
                reason: format!("failed to read {}: {}", self.data_path.display(), e),
            })?;

        let headers = rdr
            .headers()
            .map_err(|e| PairtraderError::Data {
                reason: format!("CSV header error: {e}"),
            })?
            .clone();
        let tickers: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
        if tickers.is_empty() {
            return Err(PairtraderError::Data {
                reason: format!("{}: no ticker columns", self.data_path.display()),
            });
        }

        let mut dates = Vec::new();
        let mut series: Vec<Vec<f64>> = vec![Vec::new(); tickers.len()];

        for result in rdr.records() {
            let record = result.map_err(|e| PairtraderError::Data {
                reason: format!("CSV parse error: {e}"),
            })?;

            let date_str = field(&record, 0, "date")?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                PairtraderError::Data {
                    reason: format!("invalid date format: {e}"),
                }
            })?;

            for (j, ticker) in tickers.iter().enumerate() {
                let raw = record.get(j + 1).ok_or_else(|| PairtraderError::Data {
                    reason: format!("missing {ticker} price on {date}"),
                })?;
                let price: f64 = raw.trim().parse().map_err(|e| PairtraderError::Data {
                    reason: format!("invalid {ticker} price on {date}: {e}"),
                })?;
                series[j].push(price);
            }
            dates.push(date);
        }

        let prices: HashMap<String, Vec<f64>> = tickers.into_iter().zip(series).collect();
        Ok(MarketData::new(dates, prices))
    }

    fn load_pairs(
        &self,
        data: &MarketData,
    ) -> Result<Vec<(PairKey, CointegrationResult)>, PairtraderError> {
        let mut rdr =
            csv::Reader::from_path(&self.pairs_path).map_err(|e| PairtraderError::Data {
                reason: format!("failed to read {}: {}", self.pairs_path.display(), e),
            })?;

        let mut pairs = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| PairtraderError::Data {
                reason: format!("CSV parse error: {e}"),
            })?;

            let pair = PairKey::new(field(&record, 0, "indep")?, field(&record, 1, "dep")?);

            let hedge_ratio: f64 =
                field(&record, 2, "hedge_ratio")?
                    .trim()
                    .parse()
                    .map_err(|e| PairtraderError::Data {
                        reason: format!("invalid hedge_ratio for {pair}: {e}"),
                    })?;
            let lookback: f64 =
                field(&record, 3, "lookback")?
                    .trim()
                    .parse()
                    .map_err(|e| PairtraderError::Data {
                        reason: format!("invalid lookback for {pair}: {e}"),
                    })?;

            let indep =
                data.prices_for(&pair.indep)
                    .ok_or_else(|| PairtraderError::MissingTicker {
                        pair: pair.to_string(),
                        ticker: pair.indep.clone(),
                    })?;
            let dep = data
                .prices_for(&pair.dep)
                .ok_or_else(|| PairtraderError::MissingTicker {
                    pair: pair.to_string(),
                    ticker: pair.dep.clone(),
                })?;

            let spreads = spread_series(indep, dep, hedge_ratio);
            pairs.push((
                pair,
                CointegrationResult {
                    hedge_ratio,
                    lookback,
                    spreads,
                },
            ));
        }

        Ok(pairs)
    }
}

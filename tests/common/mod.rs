#![allow(dead_code)]

use chrono::NaiveDate;
use pairtrader::domain::backtest::BacktestParams;
use pairtrader::domain::error::PairtraderError;
use pairtrader::domain::market_data::MarketData;
use pairtrader::domain::pair::{CointegrationResult, PairKey};
use pairtrader::ports::data_port::DataPort;
use std::collections::HashMap;

/// In-memory data port: prebuilt market data plus a cointegration table.
pub struct MockDataPort {
    pub data: MarketData,
    pub pairs: Vec<(PairKey, CointegrationResult)>,
}

impl MockDataPort {
    pub fn new(data: MarketData) -> Self {
        Self {
            data,
            pairs: Vec::new(),
        }
    }

    pub fn with_pair(mut self, pair: PairKey, coint: CointegrationResult) -> Self {
        self.pairs.push((pair, coint));
        self
    }
}

impl DataPort for MockDataPort {
    fn load_market_data(&self) -> Result<MarketData, PairtraderError> {
        Ok(self.data.clone())
    }

    fn load_pairs(
        &self,
        _data: &MarketData,
    ) -> Result<Vec<(PairKey, CointegrationResult)>, PairtraderError> {
        Ok(self.pairs.clone())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn dates(n: usize) -> Vec<NaiveDate> {
    (0..n)
        .map(|i| date(2024, 1, 1) + chrono::Duration::days(i as i64))
        .collect()
}

pub fn market(series: Vec<(&str, Vec<f64>)>) -> MarketData {
    let n = series[0].1.len();
    let prices: HashMap<String, Vec<f64>> = series
        .into_iter()
        .map(|(ticker, p)| (ticker.to_string(), p))
        .collect();
    MarketData::new(dates(n), prices)
}

pub fn params(initial_capital: f64, std_threshold: f64) -> BacktestParams {
    BacktestParams {
        initial_capital,
        std_threshold,
    }
}

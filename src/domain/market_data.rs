//! Market data bundle: shared date index plus per-ticker price series.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::domain::error::PairtraderError;

/// Price history for all tickers, positionally aligned to a shared date
/// index: index `i` in any price series corresponds to `dates[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketData {
    pub dates: Vec<NaiveDate>,
    pub prices: HashMap<String, Vec<f64>>,
}

impl MarketData {
    pub fn new(dates: Vec<NaiveDate>, prices: HashMap<String, Vec<f64>>) -> Self {
        Self { dates, prices }
    }

    pub fn date_count(&self) -> usize {
        self.dates.len()
    }

    pub fn prices_for(&self, ticker: &str) -> Option<&[f64]> {
        self.prices.get(ticker).map(Vec::as_slice)
    }

    /// Positional alignment is an implicit contract between independently
    /// sourced series; check it once at the boundary instead of trusting it.
    pub fn validate(&self) -> Result<(), PairtraderError> {
        let expected = self.dates.len();
        for (ticker, series) in &self.prices {
            if series.len() != expected {
                return Err(PairtraderError::SeriesLengthMismatch {
                    series: ticker.clone(),
                    have: series.len(),
                    expected,
                });
            }
        }
        Ok(())
    }
}

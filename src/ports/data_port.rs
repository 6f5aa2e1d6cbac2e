//! Data access port trait.

use crate::domain::error::PairtraderError;
use crate::domain::market_data::MarketData;
use crate::domain::pair::{CointegrationResult, PairKey};

pub trait DataPort {
    /// Load the shared date index and every ticker's price series.
    fn load_market_data(&self) -> Result<MarketData, PairtraderError>;

    /// Load the cointegration table: hedge ratio, lookback and spread
    /// series per pair, aligned to the market data's date index.
    fn load_pairs(
        &self,
        data: &MarketData,
    ) -> Result<Vec<(PairKey, CointegrationResult)>, PairtraderError>;
}

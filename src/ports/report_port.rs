//! Report generation port trait.

use crate::domain::backtest::{BacktestParams, PairOutcome};
use crate::domain::error::PairtraderError;

/// Port for writing backtest and screening reports.
pub trait ReportPort {
    fn write(
        &self,
        outcomes: &[PairOutcome],
        params: &BacktestParams,
        output_path: &str,
    ) -> Result<(), PairtraderError>;
}

//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for pairtrader.
#[derive(Debug, thiserror::Error)]
pub enum PairtraderError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid parameter {name}: must be positive, got {value}")]
    InvalidParameter { name: String, value: f64 },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("pair {pair} references ticker {ticker} absent from price data")]
    MissingTicker { pair: String, ticker: String },

    #[error("series length mismatch for {series}: have {have}, expected {expected}")]
    SeriesLengthMismatch {
        series: String,
        have: usize,
        expected: usize,
    },

    #[error("zero entry spread for {pair} on {date}: cannot size position")]
    ZeroEntrySpread { pair: String, date: NaiveDate },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PairtraderError {
    /// Process exit code for this error's category.
    pub fn exit_code(&self) -> u8 {
        match self {
            PairtraderError::Io(_) => 1,
            PairtraderError::ConfigParse { .. }
            | PairtraderError::ConfigMissing { .. }
            | PairtraderError::ConfigInvalid { .. }
            | PairtraderError::InvalidParameter { .. } => 2,
            PairtraderError::Data { .. }
            | PairtraderError::MissingTicker { .. }
            | PairtraderError::SeriesLengthMismatch { .. } => 3,
            PairtraderError::ZeroEntrySpread { .. } => 4,
        }
    }
}

impl From<&PairtraderError> for std::process::ExitCode {
    fn from(err: &PairtraderError) -> Self {
        std::process::ExitCode::from(err.exit_code())
    }
}

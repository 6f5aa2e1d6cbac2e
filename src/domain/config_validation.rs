//! Configuration validation.
//!
//! Fails fast on every invalid field before any data is loaded or any
//! simulation runs.

use crate::domain::error::PairtraderError;
use crate::ports::config_port::ConfigPort;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), PairtraderError> {
    validate_data_path(config)?;
    validate_pairs_path(config)?;
    validate_initial_capital(config)?;
    validate_std_threshold(config)?;
    Ok(())
}

fn validate_data_path(config: &dyn ConfigPort) -> Result<(), PairtraderError> {
    match config.get_string("backtest", "data_path") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(PairtraderError::ConfigMissing {
            section: "backtest".to_string(),
            key: "data_path".to_string(),
        }),
    }
}

fn validate_pairs_path(config: &dyn ConfigPort) -> Result<(), PairtraderError> {
    match config.get_string("backtest", "pairs_path") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(PairtraderError::ConfigMissing {
            section: "backtest".to_string(),
            key: "pairs_path".to_string(),
        }),
    }
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), PairtraderError> {
    let value = config.get_double("backtest", "initial_capital", 0.0);
    if value <= 0.0 {
        return Err(PairtraderError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_capital".to_string(),
            reason: "initial_capital must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_std_threshold(config: &dyn ConfigPort) -> Result<(), PairtraderError> {
    let value = config.get_double("backtest", "std_threshold", 0.0);
    if value <= 0.0 {
        return Err(PairtraderError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "std_threshold".to_string(),
            reason: "std_threshold must be positive".to_string(),
        });
    }
    Ok(())
}

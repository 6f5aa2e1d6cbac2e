//! Core domain types and logic.

pub mod pair;
pub mod market_data;
pub mod spread;
pub mod zscore;
pub mod simulation;
pub mod screening;
pub mod backtest;
pub mod config_validation;
pub mod error;

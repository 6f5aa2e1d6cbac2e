//! Backtest orchestration: z-scores once per pair, one simulation per
//! pair, then the metrics gate over every simulated pair.
//!
//! Pairs are independent; each gets its own private simulation state. A
//! pair whose simulation faults (zero entry spread) is skipped with a
//! warning and does not affect sibling pairs.

use crate::domain::error::PairtraderError;
use crate::domain::market_data::MarketData;
use crate::domain::pair::{CointegrationResult, PairKey};
use crate::domain::screening::{screen, ScreenedMetrics};
use crate::domain::simulation::{simulate, BacktestResult};
use crate::domain::zscore::compute_zscores;

/// Strategy parameters shared across all pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestParams {
    pub initial_capital: f64,
    /// Absolute z-score entry trigger.
    pub std_threshold: f64,
}

/// Everything produced for one pair: the full simulation output plus the
/// gate verdict (None when the pair is screened out).
#[derive(Debug, Clone, PartialEq)]
pub struct PairOutcome {
    pub pair: PairKey,
    pub hedge_ratio: f64,
    pub result: BacktestResult,
    pub screened: Option<ScreenedMetrics>,
}

pub fn run_backtest(
    pairs: &[(PairKey, CointegrationResult)],
    data: &MarketData,
    params: &BacktestParams,
) -> Result<Vec<PairOutcome>, PairtraderError> {
    // Non-positive capital halts at step 0 and a non-positive threshold
    // inverts the entry conditions; neither is a meaningful run.
    for (name, value) in [
        ("initial_capital", params.initial_capital),
        ("std_threshold", params.std_threshold),
    ] {
        if !(value > 0.0) {
            return Err(PairtraderError::InvalidParameter {
                name: name.to_string(),
                value,
            });
        }
    }

    data.validate()?;
    let total_dates = data.date_count();

    let mut outcomes = Vec::with_capacity(pairs.len());

    for (pair, coint) in pairs {
        if coint.spreads.len() != total_dates {
            return Err(PairtraderError::SeriesLengthMismatch {
                series: format!("{pair} cointegration spreads"),
                have: coint.spreads.len(),
                expected: total_dates,
            });
        }

        let indep = data
            .prices_for(&pair.indep)
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

        let zscores = compute_zscores(coint.lookback, &coint.spreads);

        let result = match simulate(
            pair,
            coint.hedge_ratio,
            indep,
            dep,
            &zscores,
            &data.dates,
            params.initial_capital,
            params.std_threshold,
        ) {
            Ok(result) => result,
            Err(e @ PairtraderError::ZeroEntrySpread { .. }) => {
                eprintln!("warning: skipping {} ({})", pair, e);
                continue;
            }
            Err(e) => return Err(e),
        };

        let screened = screen(
            coint.hedge_ratio,
            &result,
            params.initial_capital,
            total_dates,
        );

        outcomes.push(PairOutcome {
            pair: pair.clone(),
            hedge_ratio: coint.hedge_ratio,
            result,
            screened,
        });
    }

    Ok(outcomes)
}

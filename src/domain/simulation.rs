//! Per-pair trade simulation: a single-position state machine driven by
//! rolling z-scores.
//!
//! Rule order per step (first match wins): halt on depleted capital,
//! forced close on the final date, open long, open short, close on mean
//! reversion or sign crossing, otherwise no action. The step's spread is
//! appended after whichever action ran.

use chrono::NaiveDate;

use crate::domain::error::PairtraderError;
use crate::domain::pair::PairKey;
use crate::domain::spread::spread;

/// Positions close once |z| drops inside this band.
pub const REVERSION_BAND: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Long,
    Short,
}

#[derive(Debug, Clone)]
struct OpenPosition {
    side: Side,
    entry_spread: f64,
    entry_date: NaiveDate,
    /// Number of spread units, sized as capital / |entry spread|.
    size: f64,
}

/// Immutable record of one round trip, appended at close.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub pnl: f64,
    pub capital_after: f64,
}

/// Per-pair simulation output: the trade ledger plus the spread at every
/// processed date (shorter than the date index only after an early halt).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BacktestResult {
    pub trades: Vec<Trade>,
    pub spreads: Vec<f64>,
}

fn trade_pnl(side: Side, entry_spread: f64, exit_spread: f64, size: f64) -> f64 {
    match side {
        Side::Long => (exit_spread - entry_spread) * size,
        Side::Short => (entry_spread - exit_spread) * size,
    }
}

fn open_position(
    side: Side,
    entry_spread: f64,
    entry_date: NaiveDate,
    capital: f64,
    pair: &PairKey,
) -> Result<OpenPosition, PairtraderError> {
    // Sizing divides by |entry spread|; zero is a genuine defect condition.
    if entry_spread == 0.0 {
        return Err(PairtraderError::ZeroEntrySpread {
            pair: pair.to_string(),
            date: entry_date,
        });
    }
    Ok(OpenPosition {
        side,
        entry_spread,
        entry_date,
        size: capital / entry_spread.abs(),
    })
}

fn close_position(
    pos: OpenPosition,
    exit_spread: f64,
    exit_date: NaiveDate,
    capital: &mut f64,
    trades: &mut Vec<Trade>,
) {
    let pnl = trade_pnl(pos.side, pos.entry_spread, exit_spread, pos.size);
    *capital += pnl;
    trades.push(Trade {
        entry_date: pos.entry_date,
        exit_date,
        pnl,
        capital_after: *capital,
    });
}

/// Simulate one pair over the full date index.
///
/// All four series must share the date index length; NaN z-scores satisfy
/// no comparison and therefore trigger no action.
#[allow(clippy::too_many_arguments)]
pub fn simulate(
    pair: &PairKey,
    hedge_ratio: f64,
    indep_prices: &[f64],
    dep_prices: &[f64],
    zscores: &[f64],
    dates: &[NaiveDate],
    init_cap: f64,
    std_threshold: f64,
) -> Result<BacktestResult, PairtraderError> {
    let n = dates.len();
    for (name, len) in [
        ("indep prices", indep_prices.len()),
        ("dep prices", dep_prices.len()),
        ("zscores", zscores.len()),
    ] {
        if len != n {
            return Err(PairtraderError::SeriesLengthMismatch {
                series: format!("{pair} {name}"),
                have: len,
                expected: n,
            });
        }
    }

    let mut capital = init_cap;
    let mut position: Option<OpenPosition> = None;
    let mut trades = Vec::new();
    let mut spreads = Vec::with_capacity(n);

    for i in 0..n {
        if capital <= 0.0 {
            break;
        }

        let s = spread(indep_prices[i], dep_prices[i], hedge_ratio);
        let z = zscores[i];
        let last = i + 1 == n;

        match position.take() {
            // Never carry a position past the final date.
            Some(pos) if last => {
                close_position(pos, s, dates[i], &mut capital, &mut trades);
            }
            None if z < -std_threshold => {
                position = Some(open_position(Side::Long, s, dates[i], capital, pair)?);
            }
            None if z > std_threshold => {
                position = Some(open_position(Side::Short, s, dates[i], capital, pair)?);
            }
            Some(pos)
                if z.abs() < REVERSION_BAND
                    || (pos.side == Side::Long && z > 0.0)
                    || (pos.side == Side::Short && z < 0.0) =>
            {
                close_position(pos, s, dates[i], &mut capital, &mut trades);
            }
            // Hold or stay flat.
            other => position = other,
        }

        spreads.push(s);
    }

    Ok(BacktestResult { trades, spreads })
}

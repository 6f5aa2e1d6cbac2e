//! Quality gate over simulated pairs.
//!
//! The gate is a filter, not a validator: a pair that cannot be evaluated
//! (zero trades, too few returns for a Sharpe ratio) is excluded, never an
//! error.

use crate::domain::simulation::BacktestResult;

pub const MIN_PNL_PCT: f64 = 0.3;
pub const MIN_WIN_PCT: f64 = 0.3;
pub const MIN_SHARPE: f64 = 0.5;

/// Screening statistics for a pair that survives the gate.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenedMetrics {
    /// Total-return fraction over the initial capital.
    pub pnl_pct: f64,
    pub win_pct: f64,
    pub total_trades: usize,
    pub max_win: f64,
    pub max_loss: f64,
    /// Mean / sample stddev of the per-trade capital return sequence.
    pub sharpe_ratio: f64,
}

/// Screen one simulated pair. `total_dates` is the full date index length,
/// used for the trade-frequency floor.
pub fn screen(
    hedge_ratio: f64,
    result: &BacktestResult,
    init_cap: f64,
    total_dates: usize,
) -> Option<ScreenedMetrics> {
    // Zero-trade pairs have no final capital and no win rate; exclude them
    // before any division.
    let last = result.trades.last()?;

    let pnl_pct = (last.capital_after - init_cap) / init_cap;
    let total_trades = result.trades.len();
    let win_trades = result.trades.iter().filter(|t| t.pnl > 0.0).count();
    let win_pct = win_trades as f64 / total_trades as f64;

    if pnl_pct < MIN_PNL_PCT
        || total_trades <= total_dates / 100
        || win_pct < MIN_WIN_PCT
        || hedge_ratio <= 0.0
    {
        return None;
    }

    let sharpe_ratio = sharpe_of_capital_sequence(init_cap, result)?;
    if !(sharpe_ratio > MIN_SHARPE) {
        return None;
    }

    let max_win = result
        .trades
        .iter()
        .map(|t| t.pnl)
        .filter(|&p| p > 0.0)
        .fold(0.0, f64::max);
    let max_loss = result
        .trades
        .iter()
        .map(|t| t.pnl)
        .filter(|&p| p <= 0.0)
        .fold(0.0, f64::min);

    Some(ScreenedMetrics {
        pnl_pct,
        win_pct,
        total_trades,
        max_win,
        max_loss,
        sharpe_ratio,
    })
}

/// Mean over sample stddev of the pairwise percentage changes of
/// [init_cap, capital after each trade]. None when fewer than two changes
/// exist or the stddev is zero.
fn sharpe_of_capital_sequence(init_cap: f64, result: &BacktestResult) -> Option<f64> {
    let capitals: Vec<f64> = std::iter::once(init_cap)
        .chain(result.trades.iter().map(|t| t.capital_after))
        .collect();

    let returns: Vec<f64> = capitals
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect();

    if returns.len() < 2 {
        return None;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns
        .iter()
        .map(|r| {
            let diff = r - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1.0);
    let stddev = variance.sqrt();

    if stddev == 0.0 {
        return None;
    }

    Some(mean / stddev)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::simulation::Trade;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn trade(pnl: f64, capital_after: f64) -> Trade {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Trade {
            entry_date: date,
            exit_date: date,
            pnl,
            capital_after,
        }
    }

    fn result_with_trades(trades: Vec<Trade>) -> BacktestResult {
        BacktestResult {
            trades,
            spreads: vec![],
        }
    }

    #[test]
    fn zero_trades_excluded_not_a_fault() {
        let result = result_with_trades(vec![]);
        assert!(screen(1.2, &result, 100.0, 500).is_none());
    }

    #[test]
    fn qualifying_pair_passes() {
        // Returns 0.2 then 0.25: mean 0.225, sample stddev ~0.0354.
        let result = result_with_trades(vec![trade(20.0, 120.0), trade(30.0, 150.0)]);
        let metrics = screen(1.2, &result, 100.0, 100).unwrap();

        assert_relative_eq!(metrics.pnl_pct, 0.5, max_relative = 1e-12);
        assert_relative_eq!(metrics.win_pct, 1.0, max_relative = 1e-12);
        assert_eq!(metrics.total_trades, 2);
        assert_relative_eq!(metrics.max_win, 30.0, max_relative = 1e-12);
        assert_relative_eq!(metrics.max_loss, 0.0, max_relative = 1e-12);

        let expected_sharpe = 0.225 / (0.00125_f64).sqrt();
        assert_relative_eq!(metrics.sharpe_ratio, expected_sharpe, max_relative = 1e-9);
    }

    #[test]
    fn non_positive_hedge_ratio_excluded() {
        let result = result_with_trades(vec![trade(20.0, 120.0), trade(30.0, 150.0)]);
        assert!(screen(0.0, &result, 100.0, 100).is_none());
        assert!(screen(-0.8, &result, 100.0, 100).is_none());
    }

    #[test]
    fn low_return_excluded() {
        // pnl_pct 0.1 < 0.3.
        let result = result_with_trades(vec![trade(5.0, 105.0), trade(5.0, 110.0)]);
        assert!(screen(1.2, &result, 100.0, 100).is_none());
    }

    #[test]
    fn low_trade_count_excluded() {
        // 2 trades over 300 dates: floor(300/100) = 3 >= 2.
        let result = result_with_trades(vec![trade(20.0, 120.0), trade(30.0, 150.0)]);
        assert!(screen(1.2, &result, 100.0, 300).is_none());
        assert!(screen(1.2, &result, 100.0, 100).is_some());
    }

    #[test]
    fn low_win_rate_excluded() {
        // 1 win of 4 trades: 25% < 30%, despite strong total return.
        let result = result_with_trades(vec![
            trade(-1.0, 99.0),
            trade(-1.0, 98.0),
            trade(-1.0, 97.0),
            trade(53.0, 150.0),
        ]);
        assert!(screen(1.2, &result, 100.0, 100).is_none());
    }

    #[test]
    fn single_trade_has_no_sharpe_and_is_excluded() {
        // One trade gives one return observation; stddev is undefined.
        let result = result_with_trades(vec![trade(50.0, 150.0)]);
        assert!(screen(1.2, &result, 100.0, 10).is_none());
    }

    #[test]
    fn zero_return_stddev_excluded() {
        // 100 -> 150 -> 225: both returns exactly 0.5.
        let result = result_with_trades(vec![trade(50.0, 150.0), trade(75.0, 225.0)]);
        assert!(screen(1.2, &result, 100.0, 100).is_none());
    }

    #[test]
    fn weak_sharpe_excluded() {
        // Wildly uneven returns: mean barely positive relative to stddev.
        let result = result_with_trades(vec![
            trade(90.0, 190.0),
            trade(-50.0, 140.0),
            trade(10.0, 150.0),
        ]);
        assert!(screen(1.2, &result, 100.0, 100).is_none());
    }

    #[test]
    fn max_loss_tracks_worst_losing_trade() {
        let result = result_with_trades(vec![
            trade(60.0, 160.0),
            trade(-10.0, 150.0),
            trade(40.0, 190.0),
            trade(-5.0, 185.0),
            trade(40.0, 225.0),
        ]);
        let metrics = screen(1.2, &result, 100.0, 100).unwrap();
        assert_relative_eq!(metrics.max_win, 60.0, max_relative = 1e-12);
        assert_relative_eq!(metrics.max_loss, -10.0, max_relative = 1e-12);
    }
}

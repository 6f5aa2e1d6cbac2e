//! CSV report adapter: screened pairs and their metrics, one row each.

use crate::domain::backtest::{BacktestParams, PairOutcome};
use crate::domain::error::PairtraderError;
use crate::ports::report_port::ReportPort;

pub struct CsvReportAdapter;

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        outcomes: &[PairOutcome],
        params: &BacktestParams,
        output_path: &str,
    ) -> Result<(), PairtraderError> {
        let mut wtr = csv::Writer::from_path(output_path).map_err(|e| PairtraderError::Data {
            reason: format!("failed to write {output_path}: {e}"),
        })?;

        wtr.write_record([
            "pair",
            "hedge_ratio",
            "total_trades",
            "pnl_pct",
            "win_pct",
            "max_win",
            "max_loss",
            "sharpe_ratio",
            "final_capital",
        ])
        .map_err(|e| PairtraderError::Data {
            reason: format!("CSV write error: {e}"),
        })?;

        for outcome in outcomes {
            let Some(metrics) = &outcome.screened else {
                continue;
            };
            let final_capital = outcome
                .result
                .trades
                .last()
                .map(|t| t.capital_after)
                .unwrap_or(params.initial_capital);

            wtr.write_record([
                outcome.pair.to_string(),
                format!("{:.6}", outcome.hedge_ratio),
                metrics.total_trades.to_string(),
                format!("{:.6}", metrics.pnl_pct),
                format!("{:.6}", metrics.win_pct),
                format!("{:.2}", metrics.max_win),
                format!("{:.2}", metrics.max_loss),
                format!("{:.4}", metrics.sharpe_ratio),
                format!("{:.2}", final_capital),
            ])
            .map_err(|e| PairtraderError::Data {
                reason: format!("CSV write error: {e}"),
            })?;
        }

        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pair::PairKey;
    use crate::domain::screening::ScreenedMetrics;
    use crate::domain::simulation::{BacktestResult, Trade};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn outcome(pair: PairKey, screened: Option<ScreenedMetrics>) -> PairOutcome {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        PairOutcome {
            pair,
            hedge_ratio: 1.2,
            result: BacktestResult {
                trades: vec![Trade {
                    entry_date: date,
                    exit_date: date,
                    pnl: 50.0,
                    capital_after: 150.0,
                }],
                spreads: vec![1.0],
            },
            screened,
        }
    }

    fn metrics() -> ScreenedMetrics {
        ScreenedMetrics {
            pnl_pct: 0.5,
            win_pct: 1.0,
            total_trades: 1,
            max_win: 50.0,
            max_loss: 0.0,
            sharpe_ratio: 1.3,
        }
    }

    #[test]
    fn writes_only_screened_pairs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("screened.csv");

        let outcomes = vec![
            outcome(PairKey::new("BHP", "RIO"), Some(metrics())),
            outcome(PairKey::new("CBA", "WBC"), None),
        ];
        let params = BacktestParams {
            initial_capital: 100.0,
            std_threshold: 2.0,
        };

        CsvReportAdapter
            .write(&outcomes, &params, path.to_str().unwrap())
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("pair,hedge_ratio"));
        assert!(lines[1].starts_with("BHP/RIO,"));
        assert!(!content.contains("CBA/WBC"));
    }

    #[test]
    fn header_only_when_nothing_survives() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("screened.csv");

        let outcomes = vec![outcome(PairKey::new("BHP", "RIO"), None)];
        let params = BacktestParams {
            initial_capital: 100.0,
            std_threshold: 2.0,
        };

        CsvReportAdapter
            .write(&outcomes, &params, path.to_str().unwrap())
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}

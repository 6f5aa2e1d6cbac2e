//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{run_backtest, BacktestParams};
use crate::domain::config_validation::validate_backtest_config;
use crate::domain::error::PairtraderError;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "pairtrader",
    about = "Pairs-trading strategy backtester and screener"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Backtest all configured pairs and screen the results
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a backtest configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            output,
            dry_run,
        } => run_backtest_cmd(&config, output.as_ref(), dry_run),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = PairtraderError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_backtest_params(adapter: &dyn ConfigPort) -> BacktestParams {
    BacktestParams {
        initial_capital: adapter.get_double("backtest", "initial_capital", 100_000.0),
        std_threshold: adapter.get_double("backtest", "std_threshold", 2.0),
    }
}

fn config_path(
    adapter: &dyn ConfigPort,
    key: &str,
) -> Result<PathBuf, PairtraderError> {
    adapter
        .get_string("backtest", key)
        .map(PathBuf::from)
        .ok_or_else(|| PairtraderError::ConfigMissing {
            section: "backtest".into(),
            key: key.into(),
        })
}

fn run_backtest_cmd(
    config_path_arg: &PathBuf,
    output_path: Option<&PathBuf>,
    dry_run: bool,
) -> ExitCode {
    // Stage 1: Load config
    eprintln!("Loading config from {}", config_path_arg.display());
    let adapter = match load_config(config_path_arg) {
        Ok(a) => a,
        Err(code) => return code,
    };

    // Stage 2: Validate config
    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let params = build_backtest_params(&adapter);
    let data_path = match config_path(&adapter, "data_path") {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let pairs_path = match config_path(&adapter, "pairs_path") {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if dry_run {
        eprintln!("Config validated successfully");
        eprintln!("  data_path:       {}", data_path.display());
        eprintln!("  pairs_path:      {}", pairs_path.display());
        eprintln!("  initial_capital: {}", params.initial_capital);
        eprintln!("  std_threshold:   {}", params.std_threshold);
        eprintln!("\nDry run complete: configuration is valid");
        return ExitCode::SUCCESS;
    }

    // Stage 3: Load market data
    let data_port = CsvAdapter::new(data_path, pairs_path);
    let data = match data_port.load_market_data() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!(
        "Loaded {} dates across {} tickers",
        data.date_count(),
        data.prices.len()
    );

    // Stage 4: Load cointegrated pairs
    let pairs = match data_port.load_pairs(&data) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if pairs.is_empty() {
        let err = PairtraderError::Data {
            reason: "no pairs configured".to_string(),
        };
        eprintln!("error: {err}");
        return (&err).into();
    }
    eprintln!("Backtesting {} pairs...", pairs.len());

    // Stage 5: Simulate and screen
    let outcomes = match run_backtest(&pairs, &data, &params) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 6: Console summary to stderr
    eprintln!("\n=== Per-Pair Results ===");
    for outcome in &outcomes {
        let final_capital = outcome
            .result
            .trades
            .last()
            .map(|t| t.capital_after)
            .unwrap_or(params.initial_capital);
        eprintln!(
            "  {}:  {} trades, final capital {:.2}",
            outcome.pair,
            outcome.result.trades.len(),
            final_capital,
        );
    }

    let screened: Vec<_> = outcomes
        .iter()
        .filter_map(|o| o.screened.as_ref().map(|m| (&o.pair, m)))
        .collect();

    eprintln!(
        "\n=== Screened Pairs ({} of {}) ===",
        screened.len(),
        outcomes.len()
    );
    for (pair, metrics) in &screened {
        eprintln!(
            "  {}:  {} trades, {:.1}% return, {:.1}% win rate, sharpe {:.2}",
            pair,
            metrics.total_trades,
            metrics.pnl_pct * 100.0,
            metrics.win_pct * 100.0,
            metrics.sharpe_ratio,
        );
    }

    // Stage 7: Write report
    let output = output_path
        .cloned()
        .or_else(|| adapter.get_string("report", "output_path").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("screened.csv"));

    match CsvReportAdapter.write(&outcomes, &params, &output.display().to_string()) {
        Ok(()) => {
            eprintln!("\nReport written to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write report: {e}");
            (&e).into()
        }
    }
}

fn run_validate(config_path_arg: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path_arg.display());
    let adapter = match load_config(config_path_arg) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match validate_backtest_config(&adapter) {
        Ok(()) => {
            let params = build_backtest_params(&adapter);
            eprintln!("  initial_capital: {}", params.initial_capital);
            eprintln!("  std_threshold:   {}", params.std_threshold);
            eprintln!("\nConfiguration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

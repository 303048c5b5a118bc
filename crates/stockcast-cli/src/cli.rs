//! CLI argument definitions.
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--base-dir` | `$STOCKCAST_BASE_DIR` or `.` | Directory the model artifact lives in |
//! | `--model-file` | `$STOCKCAST_MODEL_FILE` or `stock_model.json` | Model artifact file name |
//! | `--period` | `$STOCKCAST_HISTORY_PERIOD` or `5y` | Trailing history requested from Yahoo |
//! | `--offline` | `false` | Use the deterministic synthetic history |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | `10000` | Upstream request timeout in ms |
//!
//! ```bash
//! stockcast predict AAPL 1m --pretty
//! RUST_LOG=stockcast=debug stockcast predict MSFT 1w --offline
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use stockcast_core::HistoryPeriod;

/// Stock closing-price forecaster.
#[derive(Debug, Parser)]
#[command(
    name = "stockcast",
    author,
    version,
    about = "Autoregressive stock closing-price forecaster"
)]
pub struct Cli {
    /// Directory containing the model artifact.
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Model artifact file name, relative to the base directory.
    #[arg(long, global = true)]
    pub model_file: Option<String>,

    /// Trailing history period (1y, 2y, 5y, 10y, max).
    #[arg(long, global = true)]
    pub period: Option<HistoryPeriod>,

    /// Generate synthetic history instead of calling Yahoo Finance.
    #[arg(long, global = true, default_value_t = false)]
    pub offline: bool,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Upstream request timeout in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Forecast daily closing prices for a ticker.
    Predict(PredictArgs),
}

#[derive(Debug, Clone, Args)]
pub struct PredictArgs {
    /// Ticker symbol, e.g. AAPL.
    pub ticker: String,

    /// Horizon code: 1w, 1m or 1y. Unknown codes forecast one week.
    pub duration: String,
}

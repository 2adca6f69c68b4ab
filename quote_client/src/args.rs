//! Command-line arguments for the Quote Client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Args as ClapArgs, Parser, Subcommand};
use quote_common::alert::Direction;
use quote_common::net::{DEFAULT_SOURCE_URL, DEFAULT_TIMEOUT_MS};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Upstream URL template; `{symbol}` is replaced with the URL-encoded symbol.
    #[arg(long, env = "QUOTE_SOURCE_URL", default_value = DEFAULT_SOURCE_URL, global = true)]
    pub source_url: String,

    /// Upstream request timeout in milliseconds.
    #[arg(long, env = "QUOTE_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS, global = true)]
    pub timeout_ms: u64,

    /// What to do; defaults to an interactive `watch`.
    #[command(subcommand)]
    pub command: Option<Mode>,
}

/// Client modes.
#[derive(Debug, Subcommand)]
pub enum Mode {
    /// Poll a symbol until its price crosses a target.
    Watch(WatchArgs),
    /// Fetch a single quote and print it as JSON.
    Quote {
        /// Symbol to fetch, e.g. `AAPL.US`.
        #[arg(long)]
        symbol: String,
    },
}

/// Alert settings; anything omitted is asked for interactively.
#[derive(Debug, Default, ClapArgs)]
pub struct WatchArgs {
    /// Symbol to watch, e.g. `AAPL.US`.
    #[arg(long)]
    pub symbol: Option<String>,

    /// Target price that triggers the alert.
    #[arg(long)]
    pub target: Option<f64>,

    /// Trigger when the price goes above or below the target.
    #[arg(long, value_enum)]
    pub direction: Option<Direction>,

    /// Poll interval in milliseconds.
    #[arg(long, allow_negative_numbers = true)]
    pub interval_ms: Option<i64>,
}

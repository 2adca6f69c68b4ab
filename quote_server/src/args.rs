//! Command-line arguments for the quote relay.
use clap::Parser;
use quote_common::net::{DEFAULT_SOURCE_URL, DEFAULT_TIMEOUT_MS, RELAY_PORT, addr};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Address to listen on, `ip:port`.
    #[arg(long, env = "RELAY_BIND_ADDR", default_value_t = addr("0.0.0.0", RELAY_PORT))]
    pub bind: String,

    /// Upstream URL template; `{symbol}` is replaced with the URL-encoded symbol.
    #[arg(long, env = "QUOTE_SOURCE_URL", default_value = DEFAULT_SOURCE_URL)]
    pub source_url: String,

    /// Upstream request timeout in milliseconds.
    #[arg(long, env = "QUOTE_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,
}

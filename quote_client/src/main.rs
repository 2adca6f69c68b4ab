//! Quote Client — a terminal price alert. It collects a symbol, a target price, a
//! direction and a poll interval (from flags or interactive prompts), polls the
//! upstream quote source until the price crosses the target, prints the alert and
//! exits. Ctrl+C stops polling without an alert.
//!
//! Usage example (CLI):
//! ```bash
//! quote_client watch --symbol AAPL.US --target 180 --direction below --interval-ms 30000
//! quote_client quote --symbol MSFT.US
//! ```
//!
//! Exit codes: 0 when the alert fired, 130 when stopped with Ctrl+C, 1 on errors.
#![warn(missing_docs)]
mod args;
mod console;
mod prompt;

use crate::args::{Args, Mode, WatchArgs};
use crate::console::ConsoleObserver;
use crate::prompt::Prompter;
use clap::Parser;
use log::{error, info};
use quote_common::alert::{AlertLoop, AlertOutcome};
use quote_common::{FetcherConfig, HttpQuoteFetcher, QuoteError, Result};
use std::io;
use std::process::ExitCode;
use std::time::Duration;

/// Exit status used when the user interrupts polling.
const EXIT_CANCELLED: u8 = 130;

fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let fetcher = HttpQuoteFetcher::new(&FetcherConfig {
        url_template: args.source_url,
        timeout: Duration::from_millis(args.timeout_ms),
    })?;

    match args.command {
        Some(Mode::Quote { symbol }) => print_quote(&fetcher, &symbol),
        Some(Mode::Watch(watch)) => watch_price(fetcher, watch),
        None => watch_price(fetcher, WatchArgs::default()),
    }
}

fn print_quote(fetcher: &HttpQuoteFetcher, symbol: &str) -> Result<ExitCode> {
    let quote = fetcher.fetch(symbol)?;
    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(ExitCode::SUCCESS)
}

fn watch_price(fetcher: HttpQuoteFetcher, watch: WatchArgs) -> Result<ExitCode> {
    let config = {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        prompter.collect(watch)?
    };

    let handle = AlertLoop::new(config, fetcher, ConsoleObserver).spawn()?;
    {
        let canceller = handle.canceller();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Stopping alert...");
            canceller.cancel();
        })
        .map_err(|e| QuoteError::Format(format!("Error setting Ctrl+C handler: {}", e)))?;
    }

    info!("Alert is running. Press Ctrl+C to stop.");
    match handle.join()? {
        AlertOutcome::Triggered(_) => Ok(ExitCode::SUCCESS),
        AlertOutcome::Cancelled { .. } => Ok(ExitCode::from(EXIT_CANCELLED)),
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

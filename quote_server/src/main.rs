//! Quote relay — a small HTTP server that fetches quotes from the upstream CSV
//! source on behalf of browsers and other clients and answers with JSON.
//!
//! Routes:
//! - `GET /quote?symbol=AAPL.US` → 200 `{symbol, date, time, close}`;
//!   400 `{error}` when `symbol` is missing; 502 `{error, message}` when the
//!   upstream fetch or parse fails.
//! - `GET /health` → 200.
//!
//! The upstream client is blocking, so each fetch runs on tokio's blocking pool.
//! Ctrl+C stops accepting connections and lets in-flight requests finish.
#![warn(missing_docs)]
mod args;
mod error;
mod routes;

use crate::args::Args;
use crate::routes::{RelayState, router};
use clap::Parser;
use log::info;
use quote_common::{FetcherConfig, HttpQuoteFetcher, QuoteSource, Result};
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    let fetcher = HttpQuoteFetcher::new(&FetcherConfig {
        url_template: args.source_url,
        timeout: Duration::from_millis(args.timeout_ms),
    })?;
    // Built outside the runtime so the blocking client is created and dropped
    // on a plain thread.
    let source: Arc<dyn QuoteSource> = Arc::new(fetcher);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve(&args.bind, RelayState::new(Arc::clone(&source))))
}

async fn serve(bind: &str, state: RelayState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("quote relay listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("quote relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Ctrl+C received. Shutting down relay...");
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

//! HTTP routes of the relay.
//!
//! - `GET /quote?symbol=S` — fetch one quote through the shared [`QuoteSource`].
//! - `GET /health` — liveness probe.
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use log::{info, warn};
use quote_common::{Quote, QuoteSource};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::error::RelayError;

/// Shared handler state.
#[derive(Clone)]
pub struct RelayState {
    source: Arc<dyn QuoteSource>,
}

impl RelayState {
    /// Serve quotes from `source`.
    pub fn new(source: Arc<dyn QuoteSource>) -> Self {
        Self { source }
    }
}

#[derive(Debug, Deserialize)]
struct QuoteParams {
    symbol: Option<String>,
}

/// Build the relay router.
pub fn router(state: RelayState) -> Router {
    Router::new()
        .route("/health", get(|| async { StatusCode::OK }))
        .route("/quote", get(get_quote))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn get_quote(
    State(state): State<RelayState>,
    Query(params): Query<QuoteParams>,
) -> Result<Json<Quote>, RelayError> {
    let symbol = params
        .symbol
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(RelayError::MissingSymbol)?;

    // The upstream client blocks; keep it off the async workers.
    let source = Arc::clone(&state.source);
    let requested = symbol.clone();
    let result = tokio::task::spawn_blocking(move || source.fetch_quote(&requested))
        .await
        .map_err(|e| RelayError::Worker(e.to_string()))?;

    match result {
        Ok(quote) => {
            info!("relayed {} close={}", quote.symbol, quote.close);
            Ok(Json(quote))
        }
        Err(e) => {
            warn!("quote fetch for {} failed: {}", symbol, e);
            Err(RelayError::Upstream(e))
        }
    }
}

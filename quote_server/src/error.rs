//! Relay errors and their HTTP rendering.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use quote_common::FetchError;
use serde::Serialize;
use thiserror::Error;

/// Everything a relay request can fail with.
#[derive(Error, Debug)]
pub enum RelayError {
    /// `symbol` query parameter absent or blank.
    #[error("Missing symbol query parameter")]
    MissingSymbol,

    /// Upstream could not be reached or answered with something unusable.
    #[error("Failed to fetch quote")]
    Upstream(#[from] FetchError),

    /// Blocking fetch task died before answering.
    #[error("Quote worker failed")]
    Worker(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            RelayError::MissingSymbol => (StatusCode::BAD_REQUEST, None),
            RelayError::Upstream(e) => (StatusCode::BAD_GATEWAY, Some(e.to_string())),
            RelayError::Worker(reason) => (StatusCode::INTERNAL_SERVER_ERROR, Some(reason.clone())),
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
            message,
        });
        (status, body).into_response()
    }
}

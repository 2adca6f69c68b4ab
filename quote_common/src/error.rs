//! Error types shared between client and server.
//!
//! Failures are split by where they originate:
//! - `ParseError` — the upstream body could not be turned into a `Quote`.
//! - `FetchError` — the request itself failed (or its body failed to parse).
//! - `ConfigError` — an alert was configured with values that can never work.
//!
//! `QuoteError` unifies them with I/O and serialization failures so binaries can
//! propagate a single error type.
use std::io;

use thiserror::Error;

/// Reasons a raw upstream body is rejected, listed in the order they are checked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Body is empty or whitespace only.
    #[error("empty response body")]
    EmptyResponse,

    /// Body lacks a header line followed by a data line.
    #[error("malformed response: expected a header line and a data line")]
    MalformedStructure,

    /// Header line lacks one of the required column names.
    #[error("missing column in header: {0}")]
    MissingColumn(&'static str),

    /// Symbol field is empty or the `N/A` sentinel.
    #[error("upstream returned no data for this symbol")]
    InvalidSymbol,

    /// Date or Time field is empty.
    #[error("quote has no date or time")]
    MissingTimestamp,

    /// Close field is empty or the `N/A` sentinel.
    #[error("quote has no close price")]
    MissingPrice,

    /// Close field has no numeric prefix.
    #[error("close price is not a number: {0:?}")]
    InvalidPrice(String),
}

/// Failure of a single quote fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Symbol was empty or whitespace only; no request was made.
    #[error("symbol must not be empty")]
    EmptySymbol,

    /// Upstream answered with a non-success HTTP status.
    #[error("upstream returned HTTP {status}")]
    Http {
        /// Numeric status code.
        status: u16,
    },

    /// Connection, timeout or body-read failure; contains the transport message.
    #[error("request failed: {0}")]
    Transport(String),

    /// Upstream answered but the body was not a usable quote.
    #[error("invalid quote payload: {0}")]
    Parse(#[from] ParseError),
}

/// Invalid alert configuration, raised once before polling starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Symbol was empty or whitespace only.
    #[error("symbol must not be empty")]
    EmptySymbol,

    /// Poll interval must be strictly positive.
    #[error("interval must be greater than zero, got {0} ms")]
    NonPositiveInterval(i64),

    /// Target price must be strictly positive.
    #[error("target price must be greater than zero, got {0}")]
    NonPositiveTarget(f64),
}

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// I/O error originating from the standard library, sockets or the terminal.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Alert configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Quote could not be fetched or parsed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// The alert worker thread panicked before producing an outcome.
    #[error("Alert worker panicked: {0}")]
    WorkerPanicked(String),
}

impl From<ParseError> for QuoteError {
    fn from(err: ParseError) -> Self {
        QuoteError::Fetch(FetchError::Parse(err))
    }
}

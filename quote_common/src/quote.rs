//! Quote data model and JSON encoding helpers.
//!
//! A `Quote` is one point-in-time observation returned by the upstream source:
//! the symbol as echoed by upstream, its trading date and time (kept as the text
//! upstream sent), and the close price. Quotes are produced fresh on every fetch
//! and never stored.

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// Market quote for a single symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol identifier as reported by upstream (e.g. `AAPL.US`).
    pub symbol: String,
    /// Trading date, verbatim from upstream.
    pub date: String,
    /// Trading time, verbatim from upstream.
    pub time: String,
    /// Close (last) price.
    pub close: f64,
}

impl Quote {
    /// Encode the quote to JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, QuoteError> {
        let json = serde_json::to_vec(self)?;
        Ok(json)
    }
}

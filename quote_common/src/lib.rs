//!
//! Core of the quote alert tools, shared by the CLI client and the HTTP relay.
//!
//! This crate aggregates:
//! - `error` — `ParseError`, `FetchError`, `ConfigError` and the unified `QuoteError`.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `symbol` — validated symbol tokens.
//! - `quote` — the `Quote` record.
//! - `parser` — tolerant parsing of the upstream CSV body.
//! - `fetcher` — the `QuoteSource` seam and its HTTP implementation.
//! - `alert` — alert configuration, observers and the poll loop.
//! - `net` — upstream and relay defaults.
#![warn(missing_docs)]
pub mod alert;
pub mod error;
pub mod fetcher;
pub mod net;
pub mod parser;
pub mod quote;
pub mod result;
pub mod symbol;

pub use error::{ConfigError, FetchError, ParseError, QuoteError};
pub use fetcher::{FetcherConfig, HttpQuoteFetcher, QuoteSource};
pub use quote::Quote;
pub use result::Result;
pub use symbol::Symbol;

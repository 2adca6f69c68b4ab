//! HTTP access to the upstream quote source.
//!
//! [`QuoteSource`] is the seam the alert loop and the relay depend on. The
//! production implementation, [`HttpQuoteFetcher`], issues one blocking GET per
//! call and hands the body to [`parse_quote`]. It never retries; retrying is the
//! caller's decision.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;

use crate::error::FetchError;
use crate::net::{DEFAULT_SOURCE_URL, DEFAULT_TIMEOUT_MS, SYMBOL_PLACEHOLDER};
use crate::parser::parse_quote;
use crate::quote::Quote;

/// Anything that can produce a fresh quote for a symbol.
pub trait QuoteSource: Send + Sync {
    /// Fetch one quote for `symbol`.
    fn fetch_quote(&self, symbol: &str) -> Result<Quote, FetchError>;
}

impl<F> QuoteSource for F
where
    F: Fn(&str) -> Result<Quote, FetchError> + Send + Sync,
{
    fn fetch_quote(&self, symbol: &str) -> Result<Quote, FetchError> {
        self(symbol)
    }
}

impl<T: QuoteSource + ?Sized> QuoteSource for Arc<T> {
    fn fetch_quote(&self, symbol: &str) -> Result<Quote, FetchError> {
        (**self).fetch_quote(symbol)
    }
}

/// Settings for [`HttpQuoteFetcher`].
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// URL with a `{symbol}` placeholder.
    pub url_template: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_SOURCE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

/// Blocking HTTP client for the upstream CSV endpoint.
pub struct HttpQuoteFetcher {
    url_template: String,
    client: Client,
}

impl HttpQuoteFetcher {
    /// Build a fetcher with its own connection pool.
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| FetchError::Transport(format!("failed to build http client: {err}")))?;
        Ok(Self {
            url_template: config.url_template.clone(),
            client,
        })
    }

    /// Request URL for an already trimmed, non-empty symbol.
    pub fn request_url(&self, symbol: &str) -> String {
        self.url_template
            .replace(SYMBOL_PLACEHOLDER, &urlencoding::encode(symbol))
    }

    /// Fetch and parse one quote.
    pub fn fetch(&self, symbol: &str) -> Result<Quote, FetchError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(FetchError::EmptySymbol);
        }

        let url = self.request_url(symbol);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|err| FetchError::Transport(format!("failed to read body: {err}")))?;
        parse_quote(&body, symbol).map_err(FetchError::from)
    }
}

impl QuoteSource for HttpQuoteFetcher {
    fn fetch_quote(&self, symbol: &str) -> Result<Quote, FetchError> {
        self.fetch(symbol)
    }
}

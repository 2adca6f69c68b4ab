//! Symbol tokens accepted by the quote source.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Non-empty, trimmed upstream symbol such as `AAPL.US`.
///
/// The token is opaque: no case folding or exchange suffix handling is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Validates and trims `raw`.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptySymbol);
        }
        Ok(Symbol(trimmed.to_string()))
    }

    /// Borrow the token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::parse(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Symbol::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let symbol = Symbol::parse("  aapl.us\n").unwrap();
        assert_eq!(symbol.as_str(), "aapl.us");
    }

    #[test]
    fn rejects_blank_tokens() {
        assert_eq!(Symbol::parse(""), Err(ConfigError::EmptySymbol));
        assert_eq!(" \t ".parse::<Symbol>(), Err(ConfigError::EmptySymbol));
    }

    #[test]
    fn json_round_trip_rejects_empty() {
        let parsed: Result<Symbol, _> = serde_json::from_str("\"  \"");
        assert!(parsed.is_err());
        let ok: Symbol = serde_json::from_str("\"MSFT.US\"").unwrap();
        assert_eq!(ok.to_string(), "MSFT.US");
    }
}

//! Alert configuration and the threshold predicate.

use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::ConfigError;
use crate::symbol::Symbol;

/// Which side of the target price triggers the alert.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    Hash,
    Eq,
    PartialEq,
)]
#[clap(rename_all = "lower")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    /// Trigger once the close is at or above the target.
    Above,
    /// Trigger once the close is at or below the target.
    Below,
}

impl Direction {
    /// Whether `close` has reached `target` from this direction.
    ///
    /// Equality counts as crossed for both directions.
    pub fn is_crossed(self, close: f64, target: f64) -> bool {
        match self {
            Direction::Above => close >= target,
            Direction::Below => close <= target,
        }
    }
}

/// Validated, immutable settings for one alert loop.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertConfig {
    symbol: Symbol,
    target_price: f64,
    direction: Direction,
    interval: Duration,
}

impl AlertConfig {
    /// Validate and build a config. Rejects an empty symbol, a non-positive
    /// interval and a target price that is not strictly positive.
    pub fn new(
        symbol: &str,
        target_price: f64,
        direction: Direction,
        interval_ms: i64,
    ) -> Result<Self, ConfigError> {
        let symbol = Symbol::parse(symbol)?;
        if interval_ms <= 0 {
            return Err(ConfigError::NonPositiveInterval(interval_ms));
        }
        if target_price.is_nan() || target_price <= 0.0 {
            return Err(ConfigError::NonPositiveTarget(target_price));
        }
        Ok(Self {
            symbol,
            target_price,
            direction,
            interval: Duration::from_millis(interval_ms as u64),
        })
    }

    /// Symbol to poll.
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Price the close is compared against.
    pub fn target_price(&self) -> f64 {
        self.target_price
    }

    /// Side of the target that triggers.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Delay between the end of one cycle and the start of the next.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Threshold predicate for this alert.
    pub fn is_crossed(&self, close: f64) -> bool {
        self.direction.is_crossed(close, self.target_price)
    }
}

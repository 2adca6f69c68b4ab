//! Threshold alerts driven by periodic quote polling.
//!
//! - `config` — validated `AlertConfig` and the `Direction` predicate.
//! - `observer` — callbacks and event types the loop reports through.
//! - `runner` — the poll loop itself and its cancellable `AlertHandle`.
pub mod config;
pub mod observer;
pub mod runner;

pub use config::{AlertConfig, Direction};
pub use observer::{AlertEvent, AlertNotification, AlertObserver, LogObserver, StatusUpdate};
pub use runner::{AlertCanceller, AlertHandle, AlertLoop, AlertOutcome};

//! Observations emitted by the alert loop.
//!
//! The loop never prints or exits on its own. Hosts pass an [`AlertObserver`] and
//! decide how status lines, failures and the final alert are rendered.

use chrono::{DateTime, Utc};
use crossbeam_channel::Sender;
use log::{info, warn};
use serde::Serialize;

use crate::alert::config::Direction;
use crate::error::FetchError;
use crate::quote::Quote;

/// Result of one successful poll cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate {
    /// 1-based cycle number.
    pub cycle: u64,
    /// Quote fetched on this cycle.
    pub quote: Quote,
    /// Local wall-clock time the quote was received.
    pub observed_at: DateTime<Utc>,
}

/// One-time notification emitted when the threshold is crossed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertNotification {
    /// Symbol as reported by upstream.
    pub symbol: String,
    /// Close price that crossed the threshold.
    pub price: f64,
    /// Configured target price.
    pub target: f64,
    /// Configured direction.
    pub direction: Direction,
    /// Upstream trading date of the crossing quote.
    pub date: String,
    /// Upstream trading time of the crossing quote.
    pub time: String,
    /// Local wall-clock time the alert fired.
    pub triggered_at: DateTime<Utc>,
}

/// Callbacks invoked by the alert loop, always from the loop's own thread.
pub trait AlertObserver: Send {
    /// A quote was fetched and the threshold was evaluated.
    fn on_status(&self, status: &StatusUpdate);

    /// Cycle `cycle` failed; the loop will retry after a full interval.
    fn on_error(&self, cycle: u64, error: &FetchError);

    /// The threshold was crossed; no further callbacks follow.
    fn on_triggered(&self, notification: &AlertNotification);

    /// The loop stopped on request after `cycles` cycles.
    fn on_cancelled(&self, _cycles: u64) {}
}

/// Event form of the observer callbacks, for hosts that prefer a channel.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub enum AlertEvent {
    Status(StatusUpdate),
    Failed { cycle: u64, error: FetchError },
    Triggered(AlertNotification),
    Cancelled { cycles: u64 },
}

impl AlertObserver for Sender<AlertEvent> {
    fn on_status(&self, status: &StatusUpdate) {
        let _ = self.send(AlertEvent::Status(status.clone()));
    }

    fn on_error(&self, cycle: u64, error: &FetchError) {
        let _ = self.send(AlertEvent::Failed {
            cycle,
            error: error.clone(),
        });
    }

    fn on_triggered(&self, notification: &AlertNotification) {
        let _ = self.send(AlertEvent::Triggered(notification.clone()));
    }

    fn on_cancelled(&self, cycles: u64) {
        let _ = self.send(AlertEvent::Cancelled { cycles });
    }
}

/// Observer that only writes to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl AlertObserver for LogObserver {
    fn on_status(&self, status: &StatusUpdate) {
        info!(
            "{} close={} at {} {} (cycle {})",
            status.quote.symbol, status.quote.close, status.quote.date, status.quote.time, status.cycle
        );
    }

    fn on_error(&self, cycle: u64, error: &FetchError) {
        warn!("Cycle {} failed: {}", cycle, error);
    }

    fn on_triggered(&self, notification: &AlertNotification) {
        info!(
            "ALERT {} crossed {} {} at {}",
            notification.symbol, notification.direction, notification.target, notification.price
        );
    }

    fn on_cancelled(&self, cycles: u64) {
        info!("Alert cancelled after {} cycles", cycles);
    }
}

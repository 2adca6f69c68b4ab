//! Terminal rendering of alert loop observations.
use quote_common::FetchError;
use quote_common::alert::{AlertNotification, AlertObserver, StatusUpdate};

/// Prints status lines and the final alert to stdout.
pub struct ConsoleObserver;

impl AlertObserver for ConsoleObserver {
    fn on_status(&self, status: &StatusUpdate) {
        println!("{}", status_line(status));
    }

    fn on_error(&self, cycle: u64, error: &FetchError) {
        println!("{}", error_line(cycle, error));
    }

    fn on_triggered(&self, notification: &AlertNotification) {
        println!("{}", alert_line(notification));
    }

    fn on_cancelled(&self, cycles: u64) {
        println!("Stopped after {} checks.", cycles);
    }
}

fn status_line(status: &StatusUpdate) -> String {
    format!(
        "[{}] {} {:.2} (quote time {} {})",
        status.observed_at.format("%H:%M:%S"),
        status.quote.symbol,
        status.quote.close,
        status.quote.date,
        status.quote.time
    )
}

fn error_line(cycle: u64, error: &FetchError) -> String {
    format!("[check {}] failed: {}; will retry", cycle, error)
}

fn alert_line(notification: &AlertNotification) -> String {
    format!(
        "ALERT: {} is {} {:.2} at {:.2} ({} {})",
        notification.symbol,
        notification.direction,
        notification.target,
        notification.price,
        notification.date,
        notification.time
    )
}

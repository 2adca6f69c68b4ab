//! The poll/alert loop and its cancellable run handle.
//!
//! One loop owns one [`AlertConfig`] and runs a strict fetch → evaluate → sleep
//! sequence; a new fetch is never issued while the previous one is pending.
//!
//! State machine:
//! - fetch ok, threshold not crossed → status emitted, sleep, poll again;
//! - fetch ok, threshold crossed → status emitted, alert emitted, loop ends;
//! - fetch failed → failure logged and emitted, sleep a full interval, poll again.
//!
//! There is no retry limit. Cancellation is cooperative and is checked before each
//! cycle, while sleeping (a request wakes the sleep immediately) and right before
//! the alert would be emitted. A fetch already in flight is never interrupted.
//! When every cancel sender is dropped the loop treats it as a cancellation.

use std::any::Any;
use std::thread::{self, JoinHandle};

use chrono::Utc;
use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded, select};
use log::{debug, info, warn};

use crate::alert::config::AlertConfig;
use crate::alert::observer::{AlertNotification, AlertObserver, StatusUpdate};
use crate::error::QuoteError;
use crate::fetcher::QuoteSource;
use crate::quote::Quote;
use crate::result::Result;

/// How a loop ended.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertOutcome {
    /// The threshold was crossed.
    Triggered(AlertNotification),
    /// Stopped on request before triggering.
    Cancelled {
        /// Number of cycles that started before the stop.
        cycles: u64,
    },
}

/// A configured alert ready to run.
pub struct AlertLoop<S, O> {
    config: AlertConfig,
    source: S,
    observer: O,
}

impl<S: QuoteSource, O: AlertObserver> AlertLoop<S, O> {
    /// Bind a validated config to a quote source and an observer.
    pub fn new(config: AlertConfig, source: S, observer: O) -> Self {
        Self {
            config,
            source,
            observer,
        }
    }

    /// Config this loop was built with.
    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Run on the current thread until the alert triggers or `cancel` fires.
    pub fn run(&self, cancel: &Receiver<()>) -> AlertOutcome {
        let symbol = self.config.symbol().as_str();
        let interval = self.config.interval();
        info!(
            "Watching {} for close {} {} every {:?}",
            symbol,
            self.config.direction(),
            self.config.target_price(),
            interval
        );

        let mut cycle: u64 = 0;
        loop {
            if cancel_requested(cancel) {
                return self.cancelled(cycle);
            }
            cycle += 1;
            debug!("Cycle {}: fetching {}", cycle, symbol);

            match self.source.fetch_quote(symbol) {
                Ok(quote) => {
                    let crossed = self.config.is_crossed(quote.close);
                    let status = StatusUpdate {
                        cycle,
                        quote,
                        observed_at: Utc::now(),
                    };
                    self.observer.on_status(&status);

                    if crossed {
                        if cancel_requested(cancel) {
                            return self.cancelled(cycle);
                        }
                        let notification = self.notification(status.quote);
                        info!(
                            "{} crossed {} {} at {} on cycle {}",
                            notification.symbol,
                            notification.direction,
                            notification.target,
                            notification.price,
                            cycle
                        );
                        self.observer.on_triggered(&notification);
                        return AlertOutcome::Triggered(notification);
                    }
                }
                Err(error) => {
                    warn!(
                        "Cycle {} for {} failed: {}. Retrying in {:?}",
                        cycle, symbol, error, interval
                    );
                    self.observer.on_error(cycle, &error);
                }
            }

            select! {
                recv(cancel) -> _ => return self.cancelled(cycle),
                default(interval) => {}
            }
        }
    }

    fn notification(&self, quote: Quote) -> AlertNotification {
        AlertNotification {
            symbol: quote.symbol,
            price: quote.close,
            target: self.config.target_price(),
            direction: self.config.direction(),
            date: quote.date,
            time: quote.time,
            triggered_at: Utc::now(),
        }
    }

    fn cancelled(&self, cycles: u64) -> AlertOutcome {
        info!("Alert for {} cancelled after {} cycles", self.config.symbol(), cycles);
        self.observer.on_cancelled(cycles);
        AlertOutcome::Cancelled { cycles }
    }
}

impl<S, O> AlertLoop<S, O>
where
    S: QuoteSource + 'static,
    O: AlertObserver + 'static,
{
    /// Move the loop onto its own named thread and return a handle to it.
    pub fn spawn(self) -> Result<AlertHandle> {
        let (cancel_tx, cancel_rx) = bounded::<()>(1);
        let worker = thread::Builder::new()
            .name(format!("alert-{}", self.config.symbol()))
            .spawn(move || self.run(&cancel_rx))?;
        Ok(AlertHandle {
            canceller: AlertCanceller { tx: cancel_tx },
            worker,
        })
    }
}

/// Cloneable stop switch for a running loop.
#[derive(Debug, Clone)]
pub struct AlertCanceller {
    tx: Sender<()>,
}

impl AlertCanceller {
    /// Request a stop. Repeated requests are no-ops.
    pub fn cancel(&self) {
        let _ = self.tx.try_send(());
    }
}

/// Handle to a loop started with [`AlertLoop::spawn`].
///
/// Dropping the handle (and every [`AlertCanceller`] cloned from it) stops the loop.
pub struct AlertHandle {
    canceller: AlertCanceller,
    worker: JoinHandle<AlertOutcome>,
}

impl AlertHandle {
    /// Request a stop; takes effect at the loop's next suspension point.
    pub fn cancel(&self) {
        self.canceller.cancel();
    }

    /// A cancel switch that can outlive a borrow of the handle.
    pub fn canceller(&self) -> AlertCanceller {
        self.canceller.clone()
    }

    /// Whether the loop has already ended.
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Wait for the loop to end.
    pub fn join(self) -> Result<AlertOutcome> {
        self.worker
            .join()
            .map_err(|panic| QuoteError::WorkerPanicked(panic_message(panic.as_ref())))
    }
}

fn cancel_requested(cancel: &Receiver<()>) -> bool {
    !matches!(cancel.try_recv(), Err(TryRecvError::Empty))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::config::Direction;
    use crate::alert::observer::{AlertEvent, LogObserver};
    use crate::error::{FetchError, ParseError};
    use crossbeam_channel::unbounded;
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    fn quote(close: f64) -> Quote {
        Quote {
            symbol: "TEST.US".into(),
            date: "2024-01-02".into(),
            time: "16:00:00".into(),
            close,
        }
    }

    fn scripted(
        steps: Vec<std::result::Result<f64, FetchError>>,
    ) -> (impl QuoteSource + 'static, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let steps = Mutex::new(VecDeque::from(steps));
        let source = move |_symbol: &str| -> std::result::Result<Quote, FetchError> {
            counter.fetch_add(1, Ordering::SeqCst);
            match steps.lock().unwrap().pop_front() {
                Some(step) => step.map(quote),
                None => Err(FetchError::Transport("script exhausted".into())),
            }
        };
        (source, calls)
    }

    fn config(direction: Direction, target: f64, interval_ms: i64) -> AlertConfig {
        AlertConfig::new("TEST.US", target, direction, interval_ms).unwrap()
    }

    #[test]
    fn below_alert_triggers_on_first_crossing() {
        let (source, calls) = scripted(vec![Ok(105.0), Ok(102.0), Ok(99.0), Ok(98.0)]);
        let (events_tx, events_rx) = unbounded();
        let alert = AlertLoop::new(config(Direction::Below, 100.0, 1), source, events_tx);
        let (_cancel_tx, cancel_rx) = bounded(1);

        let outcome = alert.run(&cancel_rx);

        match outcome {
            AlertOutcome::Triggered(notification) => {
                assert_eq!(notification.price, 99.0);
                assert_eq!(notification.target, 100.0);
                assert_eq!(notification.direction, Direction::Below);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        let events: Vec<AlertEvent> = events_rx.try_iter().collect();
        assert_eq!(events.len(), 4);
        let cycles: Vec<u64> = events
            .iter()
            .filter_map(|event| match event {
                AlertEvent::Status(status) => Some(status.cycle),
                _ => None,
            })
            .collect();
        assert_eq!(cycles, vec![1, 2, 3]);
        assert!(matches!(events.last(), Some(AlertEvent::Triggered(_))));
    }

    #[test]
    fn failures_are_reported_and_retried() {
        let (source, calls) = scripted(vec![
            Err(FetchError::Http { status: 503 }),
            Err(FetchError::Parse(ParseError::InvalidSymbol)),
            Ok(150.0),
        ]);
        let (events_tx, events_rx) = unbounded();
        let alert = AlertLoop::new(config(Direction::Above, 120.0, 1), source, events_tx);
        let (_cancel_tx, cancel_rx) = bounded(1);

        assert!(matches!(alert.run(&cancel_rx), AlertOutcome::Triggered(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        let events: Vec<AlertEvent> = events_rx.try_iter().collect();
        assert_eq!(
            events[0],
            AlertEvent::Failed {
                cycle: 1,
                error: FetchError::Http { status: 503 }
            }
        );
        assert_eq!(
            events[1],
            AlertEvent::Failed {
                cycle: 2,
                error: FetchError::Parse(ParseError::InvalidSymbol)
            }
        );
        assert!(matches!(&events[2], AlertEvent::Status(status) if status.cycle == 3));
        assert!(matches!(&events[3], AlertEvent::Triggered(n) if n.price == 150.0));
    }

    #[test]
    fn pending_cancel_stops_before_first_fetch() {
        let (source, calls) = scripted(vec![Ok(1.0)]);
        let alert = AlertLoop::new(config(Direction::Below, 100.0, 1), source, LogObserver);
        let (cancel_tx, cancel_rx) = bounded(1);
        cancel_tx.send(()).unwrap();

        assert_eq!(alert.run(&cancel_rx), AlertOutcome::Cancelled { cycles: 0 });
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn dropped_cancel_sender_stops_the_loop() {
        let (source, calls) = scripted(vec![Ok(1.0)]);
        let alert = AlertLoop::new(config(Direction::Below, 100.0, 1), source, LogObserver);
        let (cancel_tx, cancel_rx) = bounded::<()>(1);
        drop(cancel_tx);

        assert_eq!(alert.run(&cancel_rx), AlertOutcome::Cancelled { cycles: 0 });
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn cancel_during_in_flight_fetch_suppresses_alert() {
        let (cancel_tx, cancel_rx) = bounded(1);
        let source = move |_symbol: &str| -> std::result::Result<Quote, FetchError> {
            let _ = cancel_tx.try_send(());
            Ok(quote(50.0))
        };
        let (events_tx, events_rx) = unbounded();
        let alert = AlertLoop::new(config(Direction::Below, 100.0, 1), source, events_tx);

        assert_eq!(alert.run(&cancel_rx), AlertOutcome::Cancelled { cycles: 1 });

        let events: Vec<AlertEvent> = events_rx.try_iter().collect();
        assert!(matches!(&events[0], AlertEvent::Status(_)));
        assert_eq!(events[1], AlertEvent::Cancelled { cycles: 1 });
        assert!(!events.iter().any(|e| matches!(e, AlertEvent::Triggered(_))));
    }

    #[test]
    fn spawned_loop_wakes_from_sleep_on_cancel() {
        let (source, _calls) = scripted(vec![Ok(50.0), Ok(50.0)]);
        let (events_tx, events_rx) = unbounded();
        let handle = AlertLoop::new(config(Direction::Above, 100.0, 60_000), source, events_tx)
            .spawn()
            .unwrap();

        let first = events_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(first, AlertEvent::Status(_)));
        assert!(!handle.is_finished());

        let started = Instant::now();
        handle.canceller().cancel();
        handle.cancel();
        let outcome = handle.join().unwrap();

        assert_eq!(outcome, AlertOutcome::Cancelled { cycles: 1 });
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(
            events_rx.recv_timeout(Duration::from_secs(1)).unwrap(),
            AlertEvent::Cancelled { cycles: 1 }
        );
    }

    #[test]
    fn worker_panic_surfaces_as_error() {
        let source = |_symbol: &str| -> std::result::Result<Quote, FetchError> {
            panic!("source blew up");
        };
        let handle = AlertLoop::new(config(Direction::Above, 1.0, 1), source, LogObserver)
            .spawn()
            .unwrap();

        match handle.join() {
            Err(QuoteError::WorkerPanicked(message)) => assert_eq!(message, "source blew up"),
            other => panic!("unexpected join result {other:?}"),
        }
    }
}

//! Trailing-edge debouncing driven by the host clock.

use web_time::{Duration, Instant};

/// Holds the most recent value until `wait` has passed without a newer one.
///
/// Every [`trigger`](Debouncer::trigger) replaces the pending value and pushes
/// the deadline out; [`poll`](Debouncer::poll) hands the value back exactly once.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    pub fn from_millis(wait_ms: u64) -> Self {
        Self::new(Duration::from_millis(wait_ms))
    }

    /// Replace any pending value and restart the wait.
    pub fn trigger(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.wait, value));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(due, _)| *due)
    }

    /// Take the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((due, _)) if now >= *due => self.pending.take().map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }
}

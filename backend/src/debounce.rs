use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Holds back a value until no newer value has been scheduled for `quiet`.
///
/// Only the most recent value survives; scheduling again restarts the timer.
/// Uses the tokio clock, so it can be driven by a paused runtime in tests.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Returns `true` when a previously pending value was replaced.
    pub fn schedule(&mut self, value: T) -> bool {
        let deadline = Instant::now() + self.quiet;
        self.pending.replace((value, deadline)).is_some()
    }

    pub fn cancel_pending(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if deadline <= now => self.cancel_pending(),
            _ => None,
        }
    }

    /// Resolves with the pending value once its quiet interval has elapsed.
    /// Never resolves while nothing is pending. Safe to drop mid-wait: the
    /// value is only taken once it is due.
    pub async fn fired(&mut self) -> T {
        loop {
            match self.deadline() {
                None => std::future::pending::<()>().await,
                Some(deadline) => {
                    sleep_until(deadline).await;
                    if let Some(value) = self.take_due(Instant::now()) {
                        return value;
                    }
                }
            }
        }
    }
}

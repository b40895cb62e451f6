//! Periodic tick timer.
//!
//! The timer does not sleep by itself. The control loop polls it with
//! [`TickTimer::is_ready`] and calls [`TickTimer::call`] when a firing is due,
//! so firing latency is bounded by the polling interval.

use std::time::Duration;

use tokio::time::Instant;

/// Fixed-period timer.
#[derive(Debug, Clone)]
pub struct TickTimer {
    period: Duration,
    next_call: Instant,
    last_call: Option<Instant>,
}

impl TickTimer {
    /// Starts a timer whose first firing is one period after `now`.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    #[must_use]
    pub fn new(period: Duration, now: Instant) -> Self {
        assert!(!period.is_zero(), "timer period must be non-zero");
        Self {
            period,
            next_call: now + period,
            last_call: None,
        }
    }

    /// Whether a firing is due at `now`.
    #[must_use]
    pub fn is_ready(&self, now: Instant) -> bool {
        now >= self.next_call
    }

    /// Time left until the next firing (zero if already due).
    #[must_use]
    pub fn time_until_next_call(&self, now: Instant) -> Duration {
        self.next_call.saturating_duration_since(now)
    }

    /// Marks a firing at `now` and schedules the next one.
    ///
    /// Firings missed by more than a whole period are skipped rather than
    /// replayed back to back. Returns the time since the previous firing.
    pub fn call(&mut self, now: Instant) -> Option<Duration> {
        let since_last = self.last_call.map(|last| now.saturating_duration_since(last));

        self.last_call = Some(now);
        while self.next_call <= now {
            self.next_call += self.period;
        }

        since_last
    }

    /// Instant of the previous firing, if any.
    #[must_use]
    pub fn last_call(&self) -> Option<Instant> {
        self.last_call
    }
}

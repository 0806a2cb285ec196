//! Manually driven clock for deterministic tests and simulations

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use crate::traits::Clock;

/// Clock whose time only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    #[must_use]
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(start_millis),
        }
    }

    /// Move the clock to `millis`; earlier values are ignored
    pub fn set(&self, millis: i64) {
        self.now.fetch_max(millis, Ordering::AcqRel);
    }

    /// Move the clock forward by `millis`
    pub fn advance(&self, millis: i64) {
        if millis > 0 {
            self.now.fetch_add(millis, Ordering::AcqRel);
        }
    }

    /// Move the clock forward by a duration
    pub fn advance_by(&self, duration: Duration) {
        self.advance(i64::try_from(duration.as_millis()).unwrap_or(i64::MAX));
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::Acquire)
    }
}

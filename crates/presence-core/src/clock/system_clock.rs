//! Wall clock backed by `chrono::Utc`

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::traits::Clock;

/// UTC wall clock in epoch milliseconds.
///
/// Readings are clamped so they never go backwards, even if the system
/// clock is stepped back (NTP corrections, manual changes).
#[derive(Debug, Default)]
pub struct SystemClock {
    last: AtomicI64,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        let wall = Utc::now().timestamp_millis();
        let previous = self.last.fetch_max(wall, Ordering::AcqRel);
        wall.max(previous)
    }
}

//! Test fixtures and data generators

use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Collection key unique to this process and call
pub fn unique_key(name: &str) -> String {
    format!("test:presence:{}:{name}:{}", std::process::id(), unique_suffix())
}

/// Fixed start time for manual clocks (2024-01-01T00:00:00Z)
pub const TEST_EPOCH_MS: i64 = 1_704_067_200_000;

pub const SECOND_MS: i64 = 1_000;

/// Source of the current time in UTC epoch milliseconds.
///
/// Readings must never decrease within a process; expiry comparisons assume
/// that a later call sees a timestamp at least as large as an earlier one.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

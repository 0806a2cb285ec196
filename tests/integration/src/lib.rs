//! Integration test utilities for the presence tracker
//!
//! Runs presence sets against a real Redis. Every test gets its own
//! collection key so tests can run in parallel against one database.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;

//! Presence error types

mod presence_error;

pub use presence_error::{PresenceError, PresenceResult};

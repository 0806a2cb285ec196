//! Presence set - membership with an expiry deadline

mod presence_set;

pub use presence_set::{OnlineMember, PresenceSet, DEFAULT_PRESENCE_KEY};

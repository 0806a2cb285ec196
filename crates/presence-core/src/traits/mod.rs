//! Ports the presence set depends on
//!
//! The presence set owns no state of its own. Membership lives in an
//! [`OrderedStore`] and "now" comes from a [`Clock`]; both are injected.

mod clock;
mod ordered_store;

pub use clock::Clock;
pub use ordered_store::{OrderedStore, ScoreBound, ScoreRange, ScoredMember};

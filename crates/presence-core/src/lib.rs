//! # presence-core
//!
//! Time-windowed presence tracking: a member is online while its expiry
//! deadline lies in the future.
//!
//! Each member is stored in an ordered collection with its expiry timestamp
//! (UTC epoch milliseconds) as the score. Refreshing a member overwrites the
//! score, expired members are removed in a single range delete, and online
//! counts only ever look at the `(now, +inf)` score range.
//!
//! The backing store and the clock are injected, so the same [`PresenceSet`]
//! runs against Redis in production and against [`InMemoryStore`] +
//! [`ManualClock`] in tests.
//!
//! ## Example
//!
//! ```ignore
//! use presence_core::{InMemoryStore, ManualClock, PresenceSet};
//! use std::sync::Arc;
//!
//! let clock = Arc::new(ManualClock::new(0));
//! let presence = PresenceSet::new(Arc::new(InMemoryStore::new()), clock.clone());
//!
//! presence.touch("session-1", 60_000).await?;
//! clock.advance(75_000);
//! assert_eq!(presence.count().await?, 0);
//! ```

pub mod clock;
pub mod error;
pub mod memory;
pub mod presence;
pub mod traits;
pub mod value_objects;

pub use clock::{ManualClock, SystemClock};
pub use error::{PresenceError, PresenceResult};
pub use memory::InMemoryStore;
pub use presence::{OnlineMember, PresenceSet, DEFAULT_PRESENCE_KEY};
pub use traits::{Clock, OrderedStore, ScoreBound, ScoreRange, ScoredMember};
pub use value_objects::Member;

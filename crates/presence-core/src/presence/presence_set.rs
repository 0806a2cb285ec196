//! Presence set over an ordered store.
//!
//! Every member is stored with its expiry timestamp as the score:
//!
//! - `touch` upserts `now + ttl`, so a refresh replaces the old deadline
//! - `sweep` deletes the score range `(-inf, now]` in one store call
//! - `count` sweeps and then reads the cardinality, so stale entries are
//!   never counted; `count_online` reads only the `(now, +inf)` range and
//!   leaves the collection untouched
//!
//! Methods without a time argument read "now" from the injected clock; the
//! `*_at` variants take it explicitly.

use serde::Serialize;
use std::sync::Arc;

use crate::error::PresenceResult;
use crate::traits::{Clock, OrderedStore, ScoreRange, ScoredMember};
use crate::value_objects::Member;

/// Collection key used when none is configured
pub const DEFAULT_PRESENCE_KEY: &str = "online";

/// A member that is currently online, with its expiry deadline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnlineMember {
    pub member: Member,
    /// Expiry timestamp (UTC epoch milliseconds)
    pub expires_at: i64,
}

impl OnlineMember {
    /// Milliseconds left before the member expires
    #[must_use]
    pub fn remaining_millis(&self, now: i64) -> i64 {
        self.expires_at.saturating_sub(now).max(0)
    }
}

impl TryFrom<ScoredMember> for OnlineMember {
    type Error = crate::error::PresenceError;

    fn try_from(entry: ScoredMember) -> Result<Self, Self::Error> {
        Ok(Self {
            member: Member::new(entry.member)?,
            expires_at: entry.score,
        })
    }
}

/// Time-windowed membership set backed by an [`OrderedStore`]
#[derive(Clone)]
pub struct PresenceSet {
    store: Arc<dyn OrderedStore>,
    clock: Arc<dyn Clock>,
    key: String,
}

impl std::fmt::Debug for PresenceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceSet").field("key", &self.key).finish()
    }
}

impl PresenceSet {
    /// Create a presence set stored under [`DEFAULT_PRESENCE_KEY`]
    pub fn new(store: Arc<dyn OrderedStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_key(store, clock, DEFAULT_PRESENCE_KEY)
    }

    /// Create a presence set stored under a custom collection key
    pub fn with_key(
        store: Arc<dyn OrderedStore>,
        clock: Arc<dyn Clock>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            clock,
            key: key.into(),
        }
    }

    /// Collection key in the backing store
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current time from the injected clock
    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    // =========================================================================
    // Touch
    // =========================================================================

    /// Mark `member` online for the next `ttl_millis` milliseconds
    pub async fn touch(&self, member: &str, ttl_millis: i64) -> PresenceResult<()> {
        self.touch_at(member, ttl_millis, self.now()).await
    }

    /// Set `member`'s expiry to `now + ttl_millis`, replacing any previous expiry.
    ///
    /// A zero or negative TTL is accepted: the member is stored already
    /// expired and disappears on the next sweep.
    pub async fn touch_at(&self, member: &str, ttl_millis: i64, now: i64) -> PresenceResult<()> {
        let member = Member::new(member)?;
        let expires_at = now.saturating_add(ttl_millis);

        self.store
            .upsert(&self.key, member.as_str(), expires_at)
            .await?;

        tracing::debug!(
            key = %self.key,
            member = %member,
            expires_at,
            "Touched presence"
        );

        Ok(())
    }

    // =========================================================================
    // Sweep
    // =========================================================================

    /// Remove every member that has expired by now
    pub async fn sweep(&self) -> PresenceResult<u64> {
        self.sweep_at(self.now()).await
    }

    /// Remove every member whose expiry is at or before `now`.
    ///
    /// The range has no lower bound, so negative scores are swept as well.
    pub async fn sweep_at(&self, now: i64) -> PresenceResult<u64> {
        let removed = self
            .store
            .remove_range_by_score(&self.key, ScoreRange::up_to(now))
            .await?;

        if removed > 0 {
            tracing::debug!(key = %self.key, now, removed, "Swept expired members");
        } else {
            tracing::trace!(key = %self.key, now, "Sweep found nothing to remove");
        }

        Ok(removed)
    }

    // =========================================================================
    // Count
    // =========================================================================

    /// Sweep expired members, then count the rest
    pub async fn count(&self) -> PresenceResult<u64> {
        self.count_at(self.now()).await
    }

    /// Sweep at `now`, then return the cardinality of what is left.
    ///
    /// Two store round-trips: a touch landing in between is counted.
    pub async fn count_at(&self, now: i64) -> PresenceResult<u64> {
        self.sweep_at(now).await?;
        self.store.cardinality(&self.key).await
    }

    /// Count members online now without removing stale entries
    pub async fn count_online(&self) -> PresenceResult<u64> {
        self.count_online_at(self.now()).await
    }

    /// Count members whose expiry is after `now`, without mutating the set
    pub async fn count_online_at(&self, now: i64) -> PresenceResult<u64> {
        self.store
            .count_range_by_score(&self.key, ScoreRange::above(now))
            .await
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Check whether `member` is online now
    pub async fn is_online(&self, member: &str) -> PresenceResult<bool> {
        self.is_online_at(member, self.now()).await
    }

    /// Check whether `member` is present with an expiry after `now`
    pub async fn is_online_at(&self, member: &str, now: i64) -> PresenceResult<bool> {
        Ok(self
            .expiry_of(member)
            .await?
            .is_some_and(|expires_at| expires_at > now))
    }

    /// Stored expiry of `member`, whether or not it has passed
    pub async fn expiry_of(&self, member: &str) -> PresenceResult<Option<i64>> {
        let member = Member::new(member)?;
        self.store.score(&self.key, member.as_str()).await
    }

    /// List members online now, soonest expiry first
    pub async fn online_members(&self) -> PresenceResult<Vec<OnlineMember>> {
        self.online_members_at(self.now()).await
    }

    /// List members whose expiry is after `now`, soonest expiry first
    pub async fn online_members_at(&self, now: i64) -> PresenceResult<Vec<OnlineMember>> {
        let entries = self
            .store
            .range_by_score(&self.key, ScoreRange::above(now))
            .await?;

        // Entries not written through `touch` may carry an empty member
        Ok(entries
            .into_iter()
            .filter_map(|entry| OnlineMember::try_from(entry).ok())
            .collect())
    }

    // =========================================================================
    // Explicit removal
    // =========================================================================

    /// Remove `member` immediately (e.g. on logout)
    pub async fn remove(&self, member: &str) -> PresenceResult<bool> {
        let member = Member::new(member)?;
        let removed = self.store.remove(&self.key, member.as_str()).await?;

        tracing::debug!(key = %self.key, member = %member, removed, "Removed presence");

        Ok(removed)
    }

    /// Drop the whole collection
    pub async fn clear(&self) -> PresenceResult<bool> {
        let cleared = self.store.clear(&self.key).await?;
        tracing::debug!(key = %self.key, cleared, "Cleared presence set");
        Ok(cleared)
    }
}

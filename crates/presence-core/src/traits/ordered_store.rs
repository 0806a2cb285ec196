//! Ordered associative store port (sorted-set semantics)
//!
//! A store holds any number of collections, each addressed by a key. A
//! collection maps members to integer scores and answers range queries by
//! score. Every method is a single atomic round-trip to the store.

use async_trait::async_trait;

use crate::error::PresenceResult;

/// One end of a score range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBound {
    /// No limit on this side (`-inf` or `+inf`)
    Unbounded,
    Inclusive(i64),
    Exclusive(i64),
}

/// Score interval used by range queries and range deletes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRange {
    pub min: ScoreBound,
    pub max: ScoreBound,
}

impl ScoreRange {
    #[must_use]
    pub const fn new(min: ScoreBound, max: ScoreBound) -> Self {
        Self { min, max }
    }

    /// `(-inf, max]`
    #[must_use]
    pub const fn up_to(max: i64) -> Self {
        Self::new(ScoreBound::Unbounded, ScoreBound::Inclusive(max))
    }

    /// `(min, +inf)`
    #[must_use]
    pub const fn above(min: i64) -> Self {
        Self::new(ScoreBound::Exclusive(min), ScoreBound::Unbounded)
    }

    /// `[min, max]`
    #[must_use]
    pub const fn between(min: i64, max: i64) -> Self {
        Self::new(ScoreBound::Inclusive(min), ScoreBound::Inclusive(max))
    }

    /// Check whether a score falls inside the range
    #[must_use]
    pub fn contains(&self, score: i64) -> bool {
        let above_min = match self.min {
            ScoreBound::Unbounded => true,
            ScoreBound::Inclusive(min) => score >= min,
            ScoreBound::Exclusive(min) => score > min,
        };
        let below_max = match self.max {
            ScoreBound::Unbounded => true,
            ScoreBound::Inclusive(max) => score <= max,
            ScoreBound::Exclusive(max) => score < max,
        };
        above_min && below_max
    }

    /// Check whether every score above `score` is also outside the range
    #[must_use]
    pub fn ends_before(&self, score: i64) -> bool {
        match self.max {
            ScoreBound::Unbounded => false,
            ScoreBound::Inclusive(max) => score > max,
            ScoreBound::Exclusive(max) => score >= max,
        }
    }
}

/// A member together with its score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMember {
    pub member: String,
    pub score: i64,
}

impl ScoredMember {
    pub fn new(member: impl Into<String>, score: i64) -> Self {
        Self {
            member: member.into(),
            score,
        }
    }
}

#[async_trait]
pub trait OrderedStore: Send + Sync {
    /// Set the member's score, inserting the member if absent
    async fn upsert(&self, key: &str, member: &str, score: i64) -> PresenceResult<()>;

    /// Remove every member whose score lies in `range`, returning how many were removed
    async fn remove_range_by_score(&self, key: &str, range: ScoreRange) -> PresenceResult<u64>;

    /// Count all members of the collection
    async fn cardinality(&self, key: &str) -> PresenceResult<u64>;

    /// Count members whose score lies in `range`
    async fn count_range_by_score(&self, key: &str, range: ScoreRange) -> PresenceResult<u64>;

    /// List members whose score lies in `range`, ascending by score
    async fn range_by_score(&self, key: &str, range: ScoreRange)
        -> PresenceResult<Vec<ScoredMember>>;

    /// Get a member's score
    async fn score(&self, key: &str, member: &str) -> PresenceResult<Option<i64>>;

    /// Remove a single member, returning whether it was present
    async fn remove(&self, key: &str, member: &str) -> PresenceResult<bool>;

    /// Drop the whole collection, returning whether it existed
    async fn clear(&self, key: &str) -> PresenceResult<bool>;
}

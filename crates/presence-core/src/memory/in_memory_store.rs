//! In-memory sorted-set store.
//!
//! Mirrors the Redis sorted-set contract closely enough to stand in for it
//! in tests and single-process deployments: each collection keeps a
//! member -> score index plus a `(score, member)` ordered set, so range
//! queries and range deletes cost O(log n + k). Empty collections are
//! dropped, as Redis drops empty keys.

use std::collections::{BTreeSet, HashMap};
use std::ops::Bound;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::PresenceResult;
use crate::traits::{OrderedStore, ScoreBound, ScoreRange, ScoredMember};

#[derive(Debug, Default)]
struct SortedSet {
    scores: HashMap<String, i64>,
    ordered: BTreeSet<(i64, String)>,
}

impl SortedSet {
    fn upsert(&mut self, member: &str, score: i64) {
        if let Some(previous) = self.scores.insert(member.to_string(), score) {
            self.ordered.remove(&(previous, member.to_string()));
        }
        self.ordered.insert((score, member.to_string()));
    }

    fn remove(&mut self, member: &str) -> bool {
        match self.scores.remove(member) {
            Some(score) => {
                self.ordered.remove(&(score, member.to_string()));
                true
            }
            None => false,
        }
    }

    fn range(&self, range: ScoreRange) -> impl Iterator<Item = &(i64, String)> + '_ {
        let start = match range.min {
            ScoreBound::Unbounded => Bound::Unbounded,
            ScoreBound::Inclusive(min) | ScoreBound::Exclusive(min) => {
                Bound::Included((min, String::new()))
            }
        };

        self.ordered
            .range((start, Bound::Unbounded))
            .skip_while(move |(score, _)| !range.contains(*score) && !range.ends_before(*score))
            .take_while(move |(score, _)| range.contains(*score))
    }

    fn len(&self) -> usize {
        self.scores.len()
    }

    fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Ordered store kept entirely in process memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: Mutex<HashMap<String, SortedSet>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-empty collections held
    pub fn collection_count(&self) -> usize {
        self.collections.lock().len()
    }
}

#[async_trait]
impl OrderedStore for InMemoryStore {
    async fn upsert(&self, key: &str, member: &str, score: i64) -> PresenceResult<()> {
        self.collections
            .lock()
            .entry(key.to_string())
            .or_default()
            .upsert(member, score);
        Ok(())
    }

    async fn remove_range_by_score(&self, key: &str, range: ScoreRange) -> PresenceResult<u64> {
        let mut collections = self.collections.lock();
        let Some(set) = collections.get_mut(key) else {
            return Ok(0);
        };

        let doomed: Vec<String> = set.range(range).map(|(_, member)| member.clone()).collect();
        for member in &doomed {
            set.remove(member);
        }
        if set.is_empty() {
            collections.remove(key);
        }

        Ok(doomed.len() as u64)
    }

    async fn cardinality(&self, key: &str) -> PresenceResult<u64> {
        Ok(self
            .collections
            .lock()
            .get(key)
            .map_or(0, |set| set.len() as u64))
    }

    async fn count_range_by_score(&self, key: &str, range: ScoreRange) -> PresenceResult<u64> {
        Ok(self
            .collections
            .lock()
            .get(key)
            .map_or(0, |set| set.range(range).count() as u64))
    }

    async fn range_by_score(
        &self,
        key: &str,
        range: ScoreRange,
    ) -> PresenceResult<Vec<ScoredMember>> {
        Ok(self
            .collections
            .lock()
            .get(key)
            .map(|set| {
                set.range(range)
                    .map(|(score, member)| ScoredMember::new(member.clone(), *score))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn score(&self, key: &str, member: &str) -> PresenceResult<Option<i64>> {
        Ok(self
            .collections
            .lock()
            .get(key)
            .and_then(|set| set.scores.get(member).copied()))
    }

    async fn remove(&self, key: &str, member: &str) -> PresenceResult<bool> {
        let mut collections = self.collections.lock();
        let Some(set) = collections.get_mut(key) else {
            return Ok(false);
        };

        let removed = set.remove(member);
        if set.is_empty() {
            collections.remove(key);
        }
        Ok(removed)
    }

    async fn clear(&self, key: &str) -> PresenceResult<bool> {
        Ok(self.collections.lock().remove(key).is_some())
    }
}

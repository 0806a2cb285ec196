//! Ordered store backed by Redis sorted sets.
//!
//! Each presence operation maps to exactly one Redis command, so every call
//! is atomic on the server:
//!
//! | operation               | command            |
//! |-------------------------|--------------------|
//! | `upsert`                | `ZADD`             |
//! | `remove_range_by_score` | `ZREMRANGEBYSCORE` |
//! | `cardinality`           | `ZCARD`            |
//! | `count_range_by_score`  | `ZCOUNT`           |
//! | `range_by_score`        | `ZRANGEBYSCORE`    |
//! | `score`                 | `ZSCORE`           |
//! | `remove`                | `ZREM`             |
//! | `clear`                 | `DEL`              |
//!
//! Redis keeps scores as doubles; epoch-millisecond scores stay exact up to 2^53.

use async_trait::async_trait;
use presence_core::{OrderedStore, PresenceResult, ScoreBound, ScoreRange, ScoredMember};

use crate::pool::{RedisPool, RedisPoolError};

/// Render a range bound as a Redis score argument
fn bound_arg(bound: ScoreBound, infinity: &str) -> String {
    match bound {
        ScoreBound::Unbounded => infinity.to_string(),
        ScoreBound::Inclusive(score) => score.to_string(),
        ScoreBound::Exclusive(score) => format!("({score}"),
    }
}

fn range_args(range: ScoreRange) -> (String, String) {
    (bound_arg(range.min, "-inf"), bound_arg(range.max, "+inf"))
}

/// Redis sorted-set implementation of [`OrderedStore`]
#[derive(Debug, Clone)]
pub struct RedisOrderedStore {
    pool: RedisPool,
}

impl RedisOrderedStore {
    /// Create a new sorted-set store
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Run one command on a pooled connection
    async fn query<T: redis::FromRedisValue>(&self, cmd: &redis::Cmd) -> PresenceResult<T> {
        let mut conn = self.pool.get().await?;
        let value = cmd
            .query_async::<T>(&mut conn)
            .await
            .map_err(RedisPoolError::from)?;
        Ok(value)
    }
}

#[async_trait]
impl OrderedStore for RedisOrderedStore {
    async fn upsert(&self, key: &str, member: &str, score: i64) -> PresenceResult<()> {
        let mut cmd = redis::cmd("ZADD");
        cmd.arg(key).arg(score).arg(member);
        self.query::<i64>(&cmd).await?;
        Ok(())
    }

    async fn remove_range_by_score(&self, key: &str, range: ScoreRange) -> PresenceResult<u64> {
        let (min, max) = range_args(range);
        let mut cmd = redis::cmd("ZREMRANGEBYSCORE");
        cmd.arg(key).arg(min).arg(max);
        self.query(&cmd).await
    }

    async fn cardinality(&self, key: &str) -> PresenceResult<u64> {
        let mut cmd = redis::cmd("ZCARD");
        cmd.arg(key);
        self.query(&cmd).await
    }

    async fn count_range_by_score(&self, key: &str, range: ScoreRange) -> PresenceResult<u64> {
        let (min, max) = range_args(range);
        let mut cmd = redis::cmd("ZCOUNT");
        cmd.arg(key).arg(min).arg(max);
        self.query(&cmd).await
    }

    async fn range_by_score(
        &self,
        key: &str,
        range: ScoreRange,
    ) -> PresenceResult<Vec<ScoredMember>> {
        let (min, max) = range_args(range);
        let mut cmd = redis::cmd("ZRANGEBYSCORE");
        cmd.arg(key).arg(min).arg(max).arg("WITHSCORES");

        let entries: Vec<(String, f64)> = self.query(&cmd).await?;
        Ok(entries
            .into_iter()
            .map(|(member, score)| ScoredMember::new(member, score as i64))
            .collect())
    }

    async fn score(&self, key: &str, member: &str) -> PresenceResult<Option<i64>> {
        let mut cmd = redis::cmd("ZSCORE");
        cmd.arg(key).arg(member);
        let score: Option<f64> = self.query(&cmd).await?;
        Ok(score.map(|s| s as i64))
    }

    async fn remove(&self, key: &str, member: &str) -> PresenceResult<bool> {
        let mut cmd = redis::cmd("ZREM");
        cmd.arg(key).arg(member);
        let removed: u64 = self.query(&cmd).await?;
        Ok(removed > 0)
    }

    async fn clear(&self, key: &str) -> PresenceResult<bool> {
        let mut cmd = redis::cmd("DEL");
        cmd.arg(key);
        let deleted: u64 = self.query(&cmd).await?;
        Ok(deleted > 0)
    }
}

//! Test helpers for integration tests

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use presence_cache::{RedisOrderedStore, RedisPool, RedisPoolConfig};
use presence_core::{ManualClock, PresenceSet};
use presence_demo::Pause;

use crate::fixtures::{unique_key, TEST_EPOCH_MS};

/// Check whether a Redis is configured for integration tests
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("REDIS_URL").is_err() {
        eprintln!("Skipping test: REDIS_URL not set");
        return false;
    }
    true
}

/// Create a pool for the configured Redis
pub async fn test_pool() -> Result<RedisPool> {
    let url = std::env::var("REDIS_URL")?;
    let pool = RedisPool::new(RedisPoolConfig {
        url,
        max_connections: 4,
        timeout: Some(Duration::from_secs(5)),
    })?;
    pool.health_check().await?;
    Ok(pool)
}

/// Presence set on a fresh Redis key, driven by a manual clock
pub struct TestPresence {
    pub presence: PresenceSet,
    pub store: Arc<RedisOrderedStore>,
    pub clock: Arc<ManualClock>,
}

impl TestPresence {
    pub async fn start(name: &str) -> Result<Self> {
        let store = Arc::new(RedisOrderedStore::new(test_pool().await?));
        let clock = Arc::new(ManualClock::new(TEST_EPOCH_MS));
        let presence = PresenceSet::with_key(store.clone(), clock.clone(), unique_key(name));
        Ok(Self {
            presence,
            store,
            clock,
        })
    }

    pub fn key(&self) -> &str {
        self.presence.key()
    }

    /// Drop the test collection
    pub async fn cleanup(self) -> Result<()> {
        self.presence.clear().await?;
        Ok(())
    }
}

/// Pause that advances a manual clock instead of sleeping
pub struct ClockPause(pub Arc<ManualClock>);

#[async_trait]
impl Pause for ClockPause {
    async fn pause(&self, duration: Duration) {
        self.0.advance_by(duration);
    }
}

//! # presence-demo
//!
//! Drives a presence set the way a deployment would: a background sweeper
//! on a fixed period, and the reference scenario that logs in five members
//! one step apart, waits, sweeps and counts who is still online.

pub mod scenario;
pub mod sweeper;

use std::sync::Arc;

use presence_cache::{RedisOrderedStore, RedisPool};
use presence_common::AppConfig;
use presence_core::{PresenceSet, SystemClock};
use tracing::info;

pub use scenario::{Pause, Scenario, ScenarioConfig, ScenarioReport, TokioPause};
pub use sweeper::{Sweeper, SweeperStats};

/// Run the reference scenario against the configured Redis
pub async fn run(config: AppConfig) -> anyhow::Result<ScenarioReport> {
    let pool = RedisPool::from_config(&config.redis)?;
    pool.health_check().await?;

    let presence = PresenceSet::with_key(
        Arc::new(RedisOrderedStore::new(pool)),
        Arc::new(SystemClock::new()),
        config.presence.key.clone(),
    );

    let sweeper = Sweeper::spawn(presence.clone(), config.presence.sweep_interval());
    let scenario = Scenario::new(
        presence,
        Arc::new(TokioPause),
        ScenarioConfig::reference(&config.presence, &config.demo),
    );

    let report = scenario.run().await;
    let stats = sweeper.shutdown().await?;
    info!(
        runs = stats.runs,
        removed = stats.removed,
        failures = stats.failures,
        "Sweeper stopped"
    );

    Ok(report?)
}

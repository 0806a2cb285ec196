//! Reference login scenario
//!
//! Logs in one member per step, waits for a settle period, sweeps and counts.
//! With the default timing (10 s steps, 35 s settle, 60 s TTL) the first two
//! members have expired by the time of the count and three remain online.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use presence_common::{DemoConfig, PresenceConfig};
use presence_core::{OnlineMember, PresenceResult, PresenceSet};
use tracing::info;

/// Waits between scenario steps
#[async_trait]
pub trait Pause: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Real-time pause using the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPause;

#[async_trait]
impl Pause for TokioPause {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Scenario timing and participants
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    pub members: Vec<String>,
    pub ttl_ms: i64,
    /// Delay before each login
    pub step: Duration,
    /// Wait after the last login before sweeping
    pub settle: Duration,
}

impl ScenarioConfig {
    /// Members "1" to "5" with the configured TTL and demo timing
    #[must_use]
    pub fn reference(presence: &PresenceConfig, demo: &DemoConfig) -> Self {
        Self {
            members: (1..=5).map(|i| i.to_string()).collect(),
            ttl_ms: presence.ttl_ms,
            step: Duration::from_millis(demo.step_ms),
            settle: Duration::from_millis(demo.settle_ms),
        }
    }

    /// Number of members that should still be online at the final count
    #[must_use]
    pub fn expected_online(&self) -> u64 {
        let step = self.step.as_millis() as i64;
        let settle = self.settle.as_millis() as i64;
        let logins = self.members.len() as i64;
        let end = logins * step + settle;

        (1..=logins)
            .filter(|i| i * step + self.ttl_ms > end)
            .count() as u64
    }
}

/// Outcome of a scenario run
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub logged_in: usize,
    /// Members removed by the final sweep
    pub swept: u64,
    pub online: u64,
    pub expected_online: u64,
    pub online_members: Vec<OnlineMember>,
}

impl ScenarioReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.online == self.expected_online
    }
}

/// Scenario driving a presence set
pub struct Scenario {
    presence: PresenceSet,
    pause: Arc<dyn Pause>,
    config: ScenarioConfig,
}

impl Scenario {
    pub fn new(presence: PresenceSet, pause: Arc<dyn Pause>, config: ScenarioConfig) -> Self {
        Self {
            presence,
            pause,
            config,
        }
    }

    /// Run the scenario from an empty presence set.
    ///
    /// Clears the configured collection first, so leftovers from an earlier
    /// run cannot skew the count.
    pub async fn run(&self) -> PresenceResult<ScenarioReport> {
        info!(key = %self.presence.key(), "Resetting presence set");
        self.presence.clear().await?;

        info!(
            step_ms = self.config.step.as_millis() as u64,
            "Logging in one member per step"
        );
        for member in &self.config.members {
            self.pause.pause(self.config.step).await;
            self.presence.touch(member, self.config.ttl_ms).await?;
            info!(member = %member, "Logged in");
        }

        info!(
            settle_ms = self.config.settle.as_millis() as u64,
            "Waiting before cleaning expired members"
        );
        self.pause.pause(self.config.settle).await;

        let swept = self.presence.sweep().await?;
        let online = self.presence.count().await?;
        let online_members = self.presence.online_members().await?;
        let expected_online = self.config.expected_online();

        info!(swept, online, expected_online, "Online member count");

        Ok(ScenarioReport {
            logged_in: self.config.members.len(),
            swept,
            online,
            expected_online,
            online_members,
        })
    }
}

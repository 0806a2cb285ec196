//! Background sweeper
//!
//! Sweeps a presence set on a fixed period until shut down. Store failures
//! are logged and the next tick tries again.

use std::time::Duration;

use presence_core::PresenceSet;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Totals collected by a sweeper over its lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweeperStats {
    /// Sweeps that reached the store successfully
    pub runs: u64,
    /// Members removed across all sweeps
    pub removed: u64,
    /// Sweeps that failed
    pub failures: u64,
}

/// Handle to a running sweeper task
#[derive(Debug)]
pub struct Sweeper {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<SweeperStats>,
}

impl Sweeper {
    /// Spawn a task sweeping `presence` every `period`.
    ///
    /// # Panics
    /// Panics if `period` is zero.
    pub fn spawn(presence: PresenceSet, period: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut stats = SweeperStats::default();

            tracing::debug!(
                key = %presence.key(),
                period_ms = period.as_millis() as u64,
                "Sweeper started"
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match presence.sweep().await {
                            Ok(removed) => {
                                stats.runs += 1;
                                stats.removed += removed;
                            }
                            Err(e) => {
                                stats.failures += 1;
                                tracing::warn!(
                                    key = %presence.key(),
                                    error = %e,
                                    code = e.code(),
                                    "Sweep failed"
                                );
                            }
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        // A dropped sender also stops the task
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            stats
        });

        Self {
            shutdown_tx,
            handle,
        }
    }

    /// Check whether the task is still running
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop the task and wait for its totals
    pub async fn shutdown(self) -> Result<SweeperStats, tokio::task::JoinError> {
        let _ = self.shutdown_tx.send(true);
        self.handle.await
    }
}

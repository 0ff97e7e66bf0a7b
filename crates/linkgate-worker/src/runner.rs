//! Interval loop that repeats the expiry sweep until cancelled.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time;
use tracing;

use linkgate_core::config::SweeperConfig;

use crate::jobs::expiry::SweepJob;

/// Drives [`SweepJob`] on a fixed interval until cancelled.
#[derive(Debug)]
pub struct SweeperRunner {
    /// The sweep job to repeat.
    job: Arc<SweepJob>,
    /// Sweeper configuration.
    config: SweeperConfig,
}

impl SweeperRunner {
    /// Create a new sweeper runner.
    pub fn new(job: Arc<SweepJob>, config: SweeperConfig) -> Self {
        Self { job, config }
    }

    /// Start the runner. Sweeps immediately, then on every interval,
    /// until the cancel signal is received. A cancel arriving mid-sweep
    /// may cut it short at a store call; each sweep half is one bulk
    /// write, so nothing is left half done.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        if !self.config.enabled {
            tracing::info!("Expiry sweeper disabled by configuration");
            return;
        }

        tracing::info!(
            "Expiry sweeper started with interval={}s, retention={}d",
            self.config.interval_seconds,
            self.config.access_log_retention_days
        );

        let interval = Duration::from_secs(self.config.interval_seconds);

        loop {
            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        tracing::info!("Expiry sweeper received shutdown signal");
                        break;
                    }
                }
                _ = self.sweep() => {
                    tokio::select! {
                        _ = cancel.changed() => {
                            if *cancel.borrow() {
                                tracing::info!("Expiry sweeper shutting down");
                                break;
                            }
                        }
                        _ = time::sleep(interval) => {}
                    }
                }
            }
        }

        tracing::info!("Expiry sweeper shut down complete");
    }

    /// Run one sweep, logging instead of propagating failures so a store
    /// outage never kills the loop.
    async fn sweep(&self) {
        match self.job.run_once(Utc::now()).await {
            Ok(report) => {
                tracing::debug!(
                    links_expired = report.links_expired,
                    logs_pruned = report.logs_pruned,
                    "Sweep complete"
                );
            }
            Err(e) => {
                tracing::error!("Sweep failed: {}", e);
            }
        }
    }
}

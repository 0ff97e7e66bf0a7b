//! Expiry sweeper configuration.

use serde::{Deserialize, Serialize};

/// Settings for the periodic expiry sweeper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweeperConfig {
    /// Whether the sweeper is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Interval in seconds between sweeps.
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
    /// Days to retain access-log rows. `0` disables pruning.
    #[serde(default = "default_retention_days")]
    pub access_log_retention_days: i64,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            interval_seconds: default_interval(),
            access_log_retention_days: default_retention_days(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_interval() -> u64 {
    3600
}

fn default_retention_days() -> i64 {
    90
}

//! Access admission configuration.

use serde::{Deserialize, Serialize};

/// Settings for the admission guard chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionConfig {
    /// Whether the per-accessor rate limit is enforced.
    #[serde(default = "default_true")]
    pub rate_limit_enabled: bool,
    /// Maximum admission attempts per accessor per window.
    #[serde(default = "default_max_attempts")]
    pub rate_limit_max_attempts: u32,
    /// Length of the rate-limit window in seconds.
    #[serde(default = "default_window_seconds")]
    pub rate_limit_window_seconds: u64,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            rate_limit_enabled: default_true(),
            rate_limit_max_attempts: default_max_attempts(),
            rate_limit_window_seconds: default_window_seconds(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    20
}

fn default_window_seconds() -> u64 {
    60
}

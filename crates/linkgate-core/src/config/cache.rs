//! Counter cache configuration.

use serde::{Deserialize, Serialize};

/// Top-level cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache provider type. Only `"memory"` ships with this workspace;
    /// deployments may register their own [`CounterCache`]
    /// implementation.
    ///
    /// [`CounterCache`]: crate::traits::cache::CounterCache
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Fallback TTL in seconds for counters created without an explicit
    /// expiry.
    #[serde(default = "default_ttl")]
    pub default_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            default_ttl_seconds: default_ttl(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_ttl() -> u64 {
    300
}

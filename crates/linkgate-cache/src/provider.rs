//! Counter cache construction from configuration.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use linkgate_core::config::cache::CacheConfig;
use linkgate_core::error::AppError;
use linkgate_core::result::AppResult;
use linkgate_core::traits::cache::CounterCache;

use crate::memory::MemoryCounterCache;

/// Build the configured counter cache backend.
///
/// Deployments wanting a shared backend (one rate-limit window across
/// processes) pass their own [`CounterCache`] to the composition layer
/// instead of going through this selector.
pub fn build_counter_cache(config: &CacheConfig) -> AppResult<Arc<dyn CounterCache>> {
    match config.provider.as_str() {
        "memory" => {
            info!("Initializing in-memory counter cache");
            Ok(Arc::new(MemoryCounterCache::new(Duration::from_secs(
                config.default_ttl_seconds,
            ))))
        }
        other => Err(AppError::configuration(format!(
            "Unknown cache provider: '{other}'. Supported: memory"
        ))),
    }
}

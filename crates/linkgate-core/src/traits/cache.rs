//! Counter cache trait for pluggable admission-counter backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for TTL-bounded integer counters.
///
/// This is the narrow slice of a cache backend the admission path needs:
/// atomic increments with expiry, used by the rate-limit guard. The
/// backend is responsible for evicting counters whose TTL has passed.
#[async_trait]
pub trait CounterCache: Send + Sync + std::fmt::Debug + 'static {
    /// Increment an integer value by 1, creating it at 1 if absent.
    /// Returns the new value.
    async fn incr(&self, key: &str) -> AppResult<i64>;

    /// Set the TTL on an existing key. Returns `false` if the key does
    /// not exist.
    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool>;

    /// Get a counter value. Returns `None` if the key does not exist or
    /// has expired.
    async fn get(&self, key: &str) -> AppResult<Option<i64>>;

    /// Delete a key from the cache.
    async fn delete(&self, key: &str) -> AppResult<()>;
}

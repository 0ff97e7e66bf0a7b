//! In-memory counter cache over a concurrent map.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use linkgate_core::result::AppResult;
use linkgate_core::traits::cache::CounterCache;

#[derive(Debug)]
struct CounterEntry {
    value: i64,
    expires_at: Instant,
}

impl CounterEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// In-memory counter cache.
///
/// Counters created by `incr` start with the fallback TTL; callers that
/// need a specific window (the rate-limit guard) follow up with
/// `expire`, mirroring the INCR-then-EXPIRE pattern of a shared cache
/// server. Expired entries behave as absent and are reclaimed on the
/// next write to their key.
#[derive(Debug, Clone)]
pub struct MemoryCounterCache {
    counters: Arc<DashMap<String, CounterEntry>>,
    default_ttl: Duration,
}

impl MemoryCounterCache {
    /// Create a counter cache with a fallback TTL for new counters.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            counters: Arc::new(DashMap::new()),
            default_ttl,
        }
    }
}

#[async_trait]
impl CounterCache for MemoryCounterCache {
    async fn incr(&self, key: &str) -> AppResult<i64> {
        let now = Instant::now();
        match self.counters.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if entry.is_expired(now) {
                    entry.value = 1;
                    entry.expires_at = now + self.default_ttl;
                } else {
                    entry.value += 1;
                }
                Ok(entry.value)
            }
            Entry::Vacant(vacant) => {
                vacant.insert(CounterEntry {
                    value: 1,
                    expires_at: now + self.default_ttl,
                });
                Ok(1)
            }
        }
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        let now = Instant::now();
        match self.counters.get_mut(key) {
            Some(mut entry) if !entry.is_expired(now) => {
                entry.expires_at = now + ttl;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn get(&self, key: &str) -> AppResult<Option<i64>> {
        let now = Instant::now();
        Ok(self
            .counters
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.counters.remove(key);
        Ok(())
    }
}

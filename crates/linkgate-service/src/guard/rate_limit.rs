//! Sliding-window rate limiting over the counter cache.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use linkgate_cache::keys;
use linkgate_core::AppResult;
use linkgate_core::config::AdmissionConfig;
use linkgate_core::traits::CounterCache;
use linkgate_entity::link::DenialReason;

use super::{AccessRequest, AdmissionGuard};

/// Caps admission attempts per accessor per window.
///
/// Each attempt increments a windowed counter in the cache. The counter
/// key is the accessor's user id when known, otherwise the origin
/// address; requests carrying neither cannot be bucketed and pass
/// through.
#[derive(Debug)]
pub struct RateLimitGuard {
    cache: Arc<dyn CounterCache>,
    config: AdmissionConfig,
}

impl RateLimitGuard {
    /// Creates a rate-limit guard over the given counter cache.
    pub fn new(cache: Arc<dyn CounterCache>, config: AdmissionConfig) -> Self {
        Self { cache, config }
    }

    fn bucket_key(&self, request: &AccessRequest) -> Option<String> {
        if let Some(accessor_id) = request.accessor_id {
            return Some(keys::admission_rate_limit_user(accessor_id));
        }
        request
            .ip_address
            .as_deref()
            .map(keys::admission_rate_limit_addr)
    }
}

#[async_trait]
impl AdmissionGuard for RateLimitGuard {
    fn name(&self) -> &str {
        "rate_limit"
    }

    async fn check(&self, request: &AccessRequest) -> AppResult<Option<DenialReason>> {
        if !self.config.rate_limit_enabled {
            return Ok(None);
        }
        let Some(key) = self.bucket_key(request) else {
            return Ok(None);
        };

        let attempts = self.cache.incr(&key).await?;
        if attempts == 1 {
            // First attempt in this window owns setting the window TTL.
            self.cache
                .expire(&key, Duration::from_secs(self.config.rate_limit_window_seconds))
                .await?;
        }

        if attempts > i64::from(self.config.rate_limit_max_attempts) {
            return Ok(Some(DenialReason::RateLimited));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkgate_cache::MemoryCounterCache;
    use linkgate_core::types::{LinkId, UserId};

    fn guard(max_attempts: u32, enabled: bool) -> RateLimitGuard {
        let config = AdmissionConfig {
            rate_limit_enabled: enabled,
            rate_limit_max_attempts: max_attempts,
            rate_limit_window_seconds: 60,
        };
        RateLimitGuard::new(
            Arc::new(MemoryCounterCache::new(Duration::from_secs(300))),
            config,
        )
    }

    fn request_from(user: i64) -> AccessRequest {
        AccessRequest::new(LinkId::from("aB3xK9mQ2pLw")).with_accessor(UserId::new(user))
    }

    #[tokio::test]
    async fn denies_after_the_limit() {
        let guard = guard(3, true);
        for _ in 0..3 {
            assert_eq!(guard.check(&request_from(7)).await.unwrap(), None);
        }
        assert_eq!(
            guard.check(&request_from(7)).await.unwrap(),
            Some(DenialReason::RateLimited)
        );
    }

    #[tokio::test]
    async fn buckets_are_per_accessor() {
        let guard = guard(1, true);
        assert_eq!(guard.check(&request_from(7)).await.unwrap(), None);
        assert_eq!(
            guard.check(&request_from(7)).await.unwrap(),
            Some(DenialReason::RateLimited)
        );
        assert_eq!(guard.check(&request_from(8)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn anonymous_requests_bucket_by_address() {
        let guard = guard(1, true);
        let request =
            AccessRequest::new(LinkId::from("aB3xK9mQ2pLw")).with_origin("10.0.0.9", None);
        assert_eq!(guard.check(&request).await.unwrap(), None);
        assert_eq!(
            guard.check(&request).await.unwrap(),
            Some(DenialReason::RateLimited)
        );
    }

    #[tokio::test]
    async fn unbucketable_requests_pass() {
        let guard = guard(0, true);
        let request = AccessRequest::new(LinkId::from("aB3xK9mQ2pLw"));
        assert_eq!(guard.check(&request).await.unwrap(), None);
    }

    #[tokio::test]
    async fn disabled_guard_passes_everything() {
        let guard = guard(0, false);
        for _ in 0..5 {
            assert_eq!(guard.check(&request_from(7)).await.unwrap(), None);
        }
    }
}

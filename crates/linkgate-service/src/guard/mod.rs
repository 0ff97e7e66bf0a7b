//! Admission guards, the pre-checks that run before a link record is fetched.
//!
//! Guards inspect the incoming request only. A tripped guard yields a
//! typed denial; it never touches the link store, so denied accessors
//! learn nothing about whether the link exists.

pub mod ban;
pub mod rate_limit;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use linkgate_core::AppResult;
use linkgate_core::types::{LinkId, UserId};
use linkgate_entity::link::DenialReason;

pub use ban::BanGuard;
pub use rate_limit::RateLimitGuard;

/// An attempt to access a link, as presented to the admission service.
///
/// Carries *who* is asking and *what* they presented; the link record
/// itself is fetched later, after the guards have passed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRequest {
    /// The link identifier being accessed.
    pub link_id: LinkId,
    /// Password presented alongside the request, if any.
    pub password: Option<String>,
    /// The accessor's user id, when the front end knows it.
    pub accessor_id: Option<UserId>,
    /// IP address of the request origin.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl AccessRequest {
    /// Creates a request for the given link, timestamped now.
    pub fn new(link_id: LinkId) -> Self {
        Self {
            link_id,
            password: None,
            accessor_id: None,
            ip_address: None,
            user_agent: None,
            request_time: Utc::now(),
        }
    }

    /// Attaches a presented password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Attaches the accessor's user id.
    pub fn with_accessor(mut self, accessor_id: UserId) -> Self {
        self.accessor_id = Some(accessor_id);
        self
    }

    /// Attaches request origin metadata.
    pub fn with_origin(
        mut self,
        ip_address: impl Into<String>,
        user_agent: Option<String>,
    ) -> Self {
        self.ip_address = Some(ip_address.into());
        self.user_agent = user_agent;
        self
    }
}

/// Trait for admission guard implementations.
#[async_trait]
pub trait AdmissionGuard: Send + Sync + std::fmt::Debug {
    /// Get the guard's name, used in logs.
    fn name(&self) -> &str;

    /// Check the request. `Ok(None)` passes it on to the next stage;
    /// `Ok(Some(reason))` denies it. Errors are infrastructure failures.
    async fn check(&self, request: &AccessRequest) -> AppResult<Option<DenialReason>>;
}

/// Runs registered guards in order and stops at the first denial.
#[derive(Debug, Default)]
pub struct GuardChain {
    guards: Vec<Arc<dyn AdmissionGuard>>,
}

impl GuardChain {
    /// Create an empty guard chain.
    pub fn new() -> Self {
        Self { guards: Vec::new() }
    }

    /// Register a guard. Guards run in registration order.
    pub fn register(&mut self, guard: Arc<dyn AdmissionGuard>) {
        tracing::info!("Registered admission guard '{}'", guard.name());
        self.guards.push(guard);
    }

    /// Run every guard against the request, in order.
    pub async fn check(&self, request: &AccessRequest) -> AppResult<Option<DenialReason>> {
        for guard in &self.guards {
            if let Some(reason) = guard.check(request).await? {
                tracing::debug!(
                    guard = guard.name(),
                    reason = %reason,
                    link_id = %request.link_id,
                    "Admission guard denied request"
                );
                return Ok(Some(reason));
            }
        }
        Ok(None)
    }

    /// Number of registered guards.
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Whether no guards are registered.
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

//! Access admission: the decision path between a presented link id and
//! the file handle behind it.

use std::sync::Arc;

use tracing::{debug, info, warn};

use linkgate_core::error::AppError;
use linkgate_core::result::AppResult;
use linkgate_entity::access_log::{AccessLogStore, CreateAccessLogEntry};
use linkgate_entity::link::{
    AccessDecision, DenialReason, Link, LinkCommand, LinkStore, UpdateCondition,
};

use crate::guard::{AccessRequest, GuardChain};
use crate::password::PasswordHasher;

/// Outcome of an admission attempt.
///
/// Denials are ordinary values; an `Err` from [`AdmissionService::admit`]
/// always means infrastructure failure, so a caller can never mistake a
/// store outage for an invalid link.
#[derive(Debug, Clone)]
pub enum AdmitOutcome {
    /// The access was admitted and counted. `link` is the updated record;
    /// its `file_id` is the handle the front end serves bytes for, and
    /// its `access_count` already includes this admission.
    Permitted {
        /// The link record after the admission commit.
        link: Link,
    },
    /// The access was refused.
    Denied(DenialReason),
}

impl AdmitOutcome {
    /// Whether the attempt was admitted.
    pub fn is_permitted(&self) -> bool {
        matches!(self, Self::Permitted { .. })
    }
}

/// Admits or denies access attempts against stored links.
///
/// The order of operations is fixed: guards, fetch, lifecycle
/// evaluation, password gate, then the atomic counting commit. The
/// commit does not re-check revocation; a revoke landing inside that
/// gap loses to the in-flight admission.
#[derive(Debug, Clone)]
pub struct AdmissionService {
    /// Link store.
    links: Arc<dyn LinkStore>,
    /// Access log store.
    access_log: Arc<dyn AccessLogStore>,
    /// Pre-fetch admission guards.
    guards: Arc<GuardChain>,
    /// Password verifier for protected links.
    hasher: Arc<PasswordHasher>,
}

impl AdmissionService {
    /// Creates a new admission service.
    pub fn new(
        links: Arc<dyn LinkStore>,
        access_log: Arc<dyn AccessLogStore>,
        guards: Arc<GuardChain>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            links,
            access_log,
            guards,
            hasher,
        }
    }

    /// Decide one access attempt.
    ///
    /// The presented id is not format-checked here; that contract sits
    /// with the caller (`LinkId::is_well_formed`). Any id without a
    /// stored row denies with `NotFound`.
    pub async fn admit(&self, request: &AccessRequest) -> AppResult<AdmitOutcome> {
        if let Some(reason) = self.guards.check(request).await? {
            return Ok(AdmitOutcome::Denied(reason));
        }

        let Some(link) = self.links.find_by_id(&request.link_id).await? else {
            debug!(link_id = %request.link_id, "Unknown link id");
            return Ok(AdmitOutcome::Denied(DenialReason::NotFound));
        };

        let now = request.request_time;
        if let AccessDecision::Deny { reason, expire_now } = link.evaluate_access(now) {
            if expire_now {
                self.persist_lazy_expiry(&link).await;
            }
            return Ok(self.deny(request, &link, reason).await);
        }

        if let Some(hash) = link.password_hash.as_deref() {
            match request.password.as_deref() {
                None => {
                    return Ok(self.deny(request, &link, DenialReason::PasswordRequired).await);
                }
                Some(password) => {
                    if !self.hasher.verify_password(password, hash)? {
                        return Ok(self.deny(request, &link, DenialReason::PasswordInvalid).await);
                    }
                }
            }
        }

        let updated = self
            .links
            .apply(
                &request.link_id,
                UpdateCondition::Any,
                &LinkCommand::admission_plan(now),
            )
            .await?
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Link {} vanished during admission commit",
                    request.link_id
                ))
            })?;

        self.append_log_entry(request, &updated, true, None).await;

        info!(
            link_id = %updated.link_id,
            file_id = %updated.file_id,
            access_count = updated.access_count,
            "Access admitted"
        );

        Ok(AdmitOutcome::Permitted { link: updated })
    }

    /// Record a post-fetch denial and wrap it in an outcome.
    ///
    /// Pre-fetch refusals (guards, unknown ids) never reach here; with no
    /// fetched record there is no `file_id` to log against.
    async fn deny(
        &self,
        request: &AccessRequest,
        link: &Link,
        reason: DenialReason,
    ) -> AdmitOutcome {
        debug!(link_id = %link.link_id, reason = %reason, "Access denied");
        self.append_log_entry(request, link, false, Some(reason.as_str()))
            .await;
        AdmitOutcome::Denied(reason)
    }

    async fn persist_lazy_expiry(&self, link: &Link) {
        // `ActiveOnly` keeps a concurrent revocation from being
        // overwritten; losing that race is fine.
        let result = self
            .links
            .apply(
                &link.link_id,
                UpdateCondition::ActiveOnly,
                &LinkCommand::lazy_expiry_plan(),
            )
            .await;
        match result {
            Ok(Some(_)) => {
                info!(link_id = %link.link_id, "Link expired on access");
            }
            Ok(None) => {}
            Err(error) => {
                warn!(link_id = %link.link_id, error = %error, "Failed to persist lazy expiry");
            }
        }
    }

    async fn append_log_entry(
        &self,
        request: &AccessRequest,
        link: &Link,
        success: bool,
        error: Option<&str>,
    ) {
        let entry = CreateAccessLogEntry {
            link_id: link.link_id.clone(),
            file_id: link.file_id.clone(),
            accessor_id: request.accessor_id,
            ip_address: request.ip_address.clone(),
            user_agent: request.user_agent.clone(),
            success,
            error: error.map(str::to_string),
        };
        // Auditing is best effort and never changes the outcome.
        if let Err(error) = self.access_log.append(&entry).await {
            warn!(link_id = %link.link_id, error = %error, "Failed to append access log entry");
        }
    }
}

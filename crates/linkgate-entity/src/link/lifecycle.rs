//! Accessibility evaluation for links.
//!
//! Evaluation is a pure function of a [`Link`] snapshot and a
//! caller-supplied clock. It never touches a store and never mutates the
//! link; persisting its consequences (the lazy expiry transition, the
//! admission commit) is the admission service's job.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::model::Link;
use super::status::LinkStatus;

/// Why an access attempt was not admitted.
///
/// Denials are ordinary values, not errors: an exhausted or revoked link
/// is the system working as designed. Infrastructure failures travel as
/// `AppError` instead, so callers can always tell a dead store from a
/// dead link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// No record exists for the presented identifier.
    NotFound,
    /// The owner withdrew the link.
    Revoked,
    /// The link's lifetime has elapsed.
    Expired,
    /// The admitted-access limit has been reached.
    AccessLimitReached,
    /// The self-destruct window after first access has elapsed.
    SelfDestructed,
    /// The link requires a password and none was presented.
    PasswordRequired,
    /// The presented password did not verify.
    PasswordInvalid,
    /// The accessor is banned from the service.
    Banned,
    /// The accessor exceeded the admission rate limit.
    RateLimited,
}

impl DenialReason {
    /// Return the reason as a snake_case string, as recorded in the
    /// access log.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Revoked => "revoked",
            Self::Expired => "expired",
            Self::AccessLimitReached => "access_limit_reached",
            Self::SelfDestructed => "self_destructed",
            Self::PasswordRequired => "password_required",
            Self::PasswordInvalid => "password_invalid",
            Self::Banned => "banned",
            Self::RateLimited => "rate_limited",
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of evaluating a link snapshot against the lifecycle rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The attempt may proceed to the admission commit.
    Permit,
    /// The attempt is refused.
    Deny {
        /// Why the attempt was refused.
        reason: DenialReason,
        /// Whether the stored status should lazily move to `Expired`.
        /// Set only when an `Active` record is found past its expiry.
        expire_now: bool,
    },
}

impl AccessDecision {
    fn deny(reason: DenialReason) -> Self {
        Self::Deny {
            reason,
            expire_now: false,
        }
    }

    fn deny_and_expire() -> Self {
        Self::Deny {
            reason: DenialReason::Expired,
            expire_now: true,
        }
    }

    /// Whether the decision admits the access.
    pub fn is_permit(&self) -> bool {
        matches!(self, Self::Permit)
    }
}

impl Link {
    /// Evaluate whether an access attempt against this snapshot may be
    /// admitted at `now`.
    ///
    /// Rules run in a fixed order so that owner and administrative intent
    /// (revocation, elapsed lifetime) is always reported ahead of
    /// counter-derived conditions. A record that is both revoked and past
    /// its expiry answers `Revoked`.
    pub fn evaluate_access(&self, now: DateTime<Utc>) -> AccessDecision {
        match self.status {
            LinkStatus::Revoked => return AccessDecision::deny(DenialReason::Revoked),
            LinkStatus::Expired => return AccessDecision::deny(DenialReason::Expired),
            LinkStatus::Active => {}
        }

        if let Some(expires_at) = self.expires_at {
            if expires_at < now {
                return AccessDecision::deny_and_expire();
            }
        }

        if let Some(max_access) = self.max_access {
            if self.access_count >= max_access {
                return AccessDecision::deny(DenialReason::AccessLimitReached);
            }
        }

        // The self-destruct window opens at the first admitted access;
        // an untouched link cannot have burned.
        if self.self_destruct {
            if let (Some(after), Some(first)) = (self.self_destruct_after, self.first_accessed_at)
            {
                if let Some(window) = Duration::try_seconds(after) {
                    if now.signed_duration_since(first) > window {
                        return AccessDecision::deny(DenialReason::SelfDestructed);
                    }
                }
            }
        }

        AccessDecision::Permit
    }
}

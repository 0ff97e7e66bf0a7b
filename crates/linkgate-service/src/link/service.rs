//! Link issuance and revocation.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use linkgate_core::config::LinkPolicyConfig;
use linkgate_core::error::AppError;
use linkgate_core::result::AppResult;
use linkgate_core::traits::UserDirectory;
use linkgate_core::types::{FileId, LinkId, UserId};
use linkgate_entity::link::{CreateLink, Link, LinkCommand, LinkStore, UpdateCondition};

use crate::password::PasswordHasher;
use crate::token::TokenGenerator;

/// Manages link creation, listing, and revocation.
#[derive(Debug, Clone)]
pub struct LinkService {
    /// Link store.
    links: Arc<dyn LinkStore>,
    /// External user directory, consulted for the active-link quota.
    directory: Arc<dyn UserDirectory>,
    /// Identifier generator.
    tokens: Arc<TokenGenerator>,
    /// Password hasher for protected links.
    hasher: Arc<PasswordHasher>,
    /// Link policy settings.
    config: LinkPolicyConfig,
}

/// Request to create a new link.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateLinkRequest {
    /// Handle of the file to share.
    pub file_id: FileId,
    /// User issuing the link.
    pub owner_id: UserId,
    /// Lifetime in days (None = configured default, 0 = never expires).
    pub expiry_days: Option<i64>,
    /// Maximum admitted accesses (None = unlimited).
    pub max_access: Option<i64>,
    /// Whether the link self-destructs after first access.
    pub self_destruct: bool,
    /// Self-destruct window in seconds.
    pub self_destruct_after: Option<i64>,
    /// Password protection (optional, plaintext in).
    pub password: Option<String>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        links: Arc<dyn LinkStore>,
        directory: Arc<dyn UserDirectory>,
        tokens: Arc<TokenGenerator>,
        hasher: Arc<PasswordHasher>,
        config: LinkPolicyConfig,
    ) -> Self {
        Self {
            links,
            directory,
            tokens,
            hasher,
            config,
        }
    }

    /// Creates a new link.
    ///
    /// Mints the identifier, applies the default-expiry policy, hashes
    /// the password, and enforces the owner's active-link quota from the
    /// user directory.
    pub async fn create(&self, req: CreateLinkRequest) -> AppResult<Link> {
        if let Some(max_access) = req.max_access {
            if max_access <= 0 {
                return Err(AppError::validation("max_access must be positive"));
            }
        }
        if req.self_destruct {
            match req.self_destruct_after {
                Some(seconds) if seconds > 0 => {}
                _ => {
                    return Err(AppError::validation(
                        "self_destruct requires a positive self_destruct_after",
                    ));
                }
            }
        }

        let expiry_days = req.expiry_days.unwrap_or(self.config.default_expiry_days);
        if expiry_days < 0 {
            return Err(AppError::validation("expiry_days must be non-negative"));
        }

        if let Some(quota) = self.directory.active_link_quota(req.owner_id).await? {
            let active = self.links.count_active(Some(req.owner_id)).await?;
            if active >= quota {
                return Err(AppError::quota(format!(
                    "Active link limit of {quota} reached"
                )));
            }
        }

        let password_hash = if let Some(ref password) = req.password {
            Some(self.hasher.hash_password(password)?)
        } else {
            None
        };

        let expires_at = if expiry_days > 0 {
            Some(Utc::now() + Duration::days(expiry_days))
        } else {
            None
        };

        let create = CreateLink {
            link_id: self.tokens.generate_link_id(),
            file_id: req.file_id,
            owner_id: req.owner_id,
            max_access: req.max_access,
            self_destruct: req.self_destruct,
            self_destruct_after: req.self_destruct_after,
            password_hash,
            expires_at,
        };

        let link = self.links.insert(&create).await?;

        info!(
            owner_id = %link.owner_id,
            link_id = %link.link_id,
            file_id = %link.file_id,
            "Link created"
        );

        Ok(link)
    }

    /// Gets a link by id.
    pub async fn get(&self, link_id: &LinkId) -> AppResult<Option<Link>> {
        self.links.find_by_id(link_id).await
    }

    /// Lists links issued by one owner, newest first, capped by the
    /// configured listing limit.
    pub async fn list_by_owner(&self, owner_id: UserId, active_only: bool) -> AppResult<Vec<Link>> {
        self.links
            .find_by_owner(owner_id, active_only, self.config.list_limit)
            .await
    }

    /// Lists links exposing one file, newest first.
    pub async fn list_by_file(&self, file_id: &FileId) -> AppResult<Vec<Link>> {
        self.links.find_by_file(file_id, self.config.list_limit).await
    }

    /// Counts active links, optionally for one owner.
    pub async fn count_active(&self, owner_id: Option<UserId>) -> AppResult<i64> {
        self.links.count_active(owner_id).await
    }

    /// Revokes a link on behalf of `requester`.
    ///
    /// Returns `false` when no such link exists or the requester does not
    /// own it; neither case is a system error. Revoking an
    /// already-revoked link returns `true` without moving `revoked_at`.
    pub async fn revoke(&self, link_id: &LinkId, requester: UserId) -> AppResult<bool> {
        let Some(link) = self.links.find_by_id(link_id).await? else {
            warn!(link_id = %link_id, requester = %requester, "Revoke of unknown link");
            return Ok(false);
        };

        if link.owner_id != requester {
            warn!(
                link_id = %link_id,
                requester = %requester,
                owner_id = %link.owner_id,
                "Revoke denied, requester does not own the link"
            );
            return Ok(false);
        }

        let updated = self
            .links
            .apply(
                link_id,
                UpdateCondition::OwnedAndNotRevoked(requester),
                &LinkCommand::revocation_plan(Utc::now()),
            )
            .await?;

        // `None` here means the row was already revoked, either before
        // this call or by a concurrent one. The outcome the caller asked
        // for holds either way.
        if updated.is_some() {
            info!(link_id = %link_id, requester = %requester, "Link revoked");
        }
        Ok(true)
    }
}

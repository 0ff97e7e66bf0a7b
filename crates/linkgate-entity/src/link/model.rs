//! Link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use linkgate_core::types::{FileId, LinkId, UserId};

use super::status::LinkStatus;

/// A shareable link granting time-bounded, access-limited entry to one
/// file in the external file store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Link {
    /// Unguessable public identifier; primary key.
    pub link_id: LinkId,
    /// Handle of the file this link exposes.
    pub file_id: FileId,
    /// User who issued the link.
    pub owner_id: UserId,
    /// Stored lifecycle state.
    pub status: LinkStatus,
    /// Number of admitted accesses. Monotonic; moved only by the
    /// admission commit.
    pub access_count: i64,
    /// Maximum admitted accesses (None = unlimited).
    pub max_access: Option<i64>,
    /// Whether the link self-destructs after a window following its
    /// first access.
    pub self_destruct: bool,
    /// Width of the self-destruct window in seconds.
    pub self_destruct_after: Option<i64>,
    /// Argon2 hash of the link password, if the link is protected.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Absolute expiry time (None = never expires).
    pub expires_at: Option<DateTime<Utc>>,
    /// When the first access was admitted. Set at most once.
    pub first_accessed_at: Option<DateTime<Utc>>,
    /// When the most recent access was admitted.
    pub last_accessed_at: Option<DateTime<Utc>>,
    /// When the link was issued.
    pub created_at: DateTime<Utc>,
    /// When the link was revoked.
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Whether an accessor must present a password.
    pub fn is_password_protected(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Data required to insert a new link row.
///
/// The service layer resolves policy (identifier minting, default expiry,
/// password hashing) before constructing this; the store writes it
/// verbatim with `status = active` and a zero access count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLink {
    /// Generated link identifier.
    pub link_id: LinkId,
    /// Handle of the file being shared.
    pub file_id: FileId,
    /// User issuing the link.
    pub owner_id: UserId,
    /// Maximum admitted accesses (None = unlimited).
    pub max_access: Option<i64>,
    /// Whether the link self-destructs after first access.
    pub self_destruct: bool,
    /// Self-destruct window in seconds.
    pub self_destruct_after: Option<i64>,
    /// Argon2 hash of the link password (None = open link).
    pub password_hash: Option<String>,
    /// Absolute expiry time (None = never).
    pub expires_at: Option<DateTime<Utc>>,
}

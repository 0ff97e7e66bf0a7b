//! Access log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use linkgate_core::types::{FileId, LinkId, UserId};

/// An immutable log entry recording one access attempt against a link.
///
/// Both admitted and denied attempts are recorded; `success` tells them
/// apart and `error` carries the denial reason text for denied ones.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccessLogEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// The link that was attempted.
    pub link_id: LinkId,
    /// The file the link exposes.
    pub file_id: FileId,
    /// Who attempted the access (None for anonymous attempts).
    pub accessor_id: Option<UserId>,
    /// IP address of the accessor, when the front end knows it.
    pub ip_address: Option<String>,
    /// User-Agent of the accessor, when the front end knows it.
    pub user_agent: Option<String>,
    /// Whether the attempt was admitted.
    pub success: bool,
    /// Denial reason text for refused attempts.
    pub error: Option<String>,
    /// When the attempt occurred.
    pub accessed_at: DateTime<Utc>,
}

/// Data required to append a new access log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccessLogEntry {
    /// The link that was attempted.
    pub link_id: LinkId,
    /// The file the link exposes.
    pub file_id: FileId,
    /// Who attempted the access.
    pub accessor_id: Option<UserId>,
    /// Accessor's IP address.
    pub ip_address: Option<String>,
    /// Accessor's User-Agent.
    pub user_agent: Option<String>,
    /// Whether the attempt was admitted.
    pub success: bool,
    /// Denial reason text for refused attempts.
    pub error: Option<String>,
}

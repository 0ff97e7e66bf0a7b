//! Tagged update commands for link rows.
//!
//! Every mutation of a stored link is expressed as a batch of commands
//! plus a precondition. A store translates a batch into **one** atomic
//! native write (a single SQL `UPDATE`, a single mutation under the map
//! entry lock), so concurrent admissions can never interleave a
//! read-modify-write on the counter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use linkgate_core::types::UserId;

use super::model::Link;
use super::status::LinkStatus;

/// One field mutation within an atomic update batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkCommand {
    /// Add 1 to the admitted-access counter.
    IncrementAccessCount,
    /// Stamp the first-access time, only if it has never been set.
    SetFirstAccessIfUnset(DateTime<Utc>),
    /// Stamp the most-recent-access time.
    TouchLastAccess(DateTime<Utc>),
    /// Move the stored lifecycle status.
    SetStatus(LinkStatus),
    /// Stamp the revocation time.
    SetRevokedAt(DateTime<Utc>),
}

impl LinkCommand {
    /// Commands applied by a successful admission commit.
    pub fn admission_plan(now: DateTime<Utc>) -> Vec<LinkCommand> {
        vec![
            LinkCommand::SetFirstAccessIfUnset(now),
            LinkCommand::IncrementAccessCount,
            LinkCommand::TouchLastAccess(now),
        ]
    }

    /// Commands applied when an owner revokes a link.
    pub fn revocation_plan(now: DateTime<Utc>) -> Vec<LinkCommand> {
        vec![
            LinkCommand::SetStatus(LinkStatus::Revoked),
            LinkCommand::SetRevokedAt(now),
        ]
    }

    /// Commands applied when an overdue record is lazily expired.
    pub fn lazy_expiry_plan() -> Vec<LinkCommand> {
        vec![LinkCommand::SetStatus(LinkStatus::Expired)]
    }
}

/// Precondition a row must satisfy for an update batch to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateCondition {
    /// Apply to any existing row.
    Any,
    /// Apply only while the row is still `Active`. Used by the lazy
    /// expiry transition so it can never overwrite a revocation.
    ActiveOnly,
    /// Apply only when the row belongs to this owner and is not already
    /// revoked. Keeps the first `revoked_at` stamp under double revoke.
    OwnedAndNotRevoked(UserId),
}

impl UpdateCondition {
    /// Whether the condition holds for a row snapshot.
    pub fn holds_for(&self, link: &Link) -> bool {
        match self {
            Self::Any => true,
            Self::ActiveOnly => link.status == LinkStatus::Active,
            Self::OwnedAndNotRevoked(owner_id) => {
                link.owner_id == *owner_id && link.status != LinkStatus::Revoked
            }
        }
    }
}

impl Link {
    /// Apply a command batch to this snapshot in order.
    ///
    /// This is the reference semantics of a batch: the in-memory store
    /// runs it under its entry lock, and the SQL translation in the
    /// database crate must agree with it field for field.
    pub fn apply_commands(&mut self, commands: &[LinkCommand]) {
        for command in commands {
            match command {
                LinkCommand::IncrementAccessCount => {
                    self.access_count += 1;
                }
                LinkCommand::SetFirstAccessIfUnset(ts) => {
                    if self.first_accessed_at.is_none() {
                        self.first_accessed_at = Some(*ts);
                    }
                }
                LinkCommand::TouchLastAccess(ts) => {
                    self.last_accessed_at = Some(*ts);
                }
                LinkCommand::SetStatus(status) => {
                    self.status = *status;
                }
                LinkCommand::SetRevokedAt(ts) => {
                    self.revoked_at = Some(*ts);
                }
            }
        }
    }
}

//! Link lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stored lifecycle state of a link.
///
/// `Expired` and `Revoked` are terminal: no command sequence moves a link
/// out of them. Exhaustion of the access limit is not a stored state; it
/// is computed from the counter at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "link_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    /// Link may admit accesses, subject to evaluation.
    Active,
    /// Lifetime elapsed; set lazily on a denied access or by the sweeper.
    Expired,
    /// Withdrawn by its owner.
    Revoked,
}

impl LinkStatus {
    /// Whether this state can never be left.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Expired | Self::Revoked)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LinkStatus {
    type Err = linkgate_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "expired" => Ok(Self::Expired),
            "revoked" => Ok(Self::Revoked),
            _ => Err(linkgate_core::AppError::validation(format!(
                "Invalid link status: '{s}'. Expected one of: active, expired, revoked"
            ))),
        }
    }
}

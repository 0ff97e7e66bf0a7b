//! Store seam for access log entries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use linkgate_core::result::AppResult;
use linkgate_core::types::LinkId;

use super::model::{AccessLogEntry, CreateAccessLogEntry};

/// Append-only persistence seam for access log entries.
#[async_trait]
pub trait AccessLogStore: Send + Sync + std::fmt::Debug + 'static {
    /// Append one entry. Returns the stored row.
    async fn append(&self, entry: &CreateAccessLogEntry) -> AppResult<AccessLogEntry>;

    /// List the most recent entries for one link, newest first.
    async fn find_recent_by_link(
        &self,
        link_id: &LinkId,
        limit: i64,
    ) -> AppResult<Vec<AccessLogEntry>>;

    /// Delete entries older than `cutoff`. Returns the number removed.
    async fn prune_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;
}

//! Store seam for link rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use linkgate_core::result::AppResult;
use linkgate_core::types::{FileId, LinkId, UserId};

use super::command::{LinkCommand, UpdateCondition};
use super::model::{CreateLink, Link};

/// Persistence seam for links.
///
/// Implemented over PostgreSQL and over an in-process map in
/// `linkgate-database`. The contract is narrow: exact-id lookup, insert,
/// one atomic conditional update, the sweeper's bulk expiry, and the
/// listing queries. Nothing else.
#[async_trait]
pub trait LinkStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a link by its identifier.
    async fn find_by_id(&self, link_id: &LinkId) -> AppResult<Option<Link>>;

    /// Insert a new link with `status = active` and a zero access count.
    /// Returns the stored row.
    async fn insert(&self, link: &CreateLink) -> AppResult<Link>;

    /// Atomically apply a command batch to one row if `condition` holds
    /// for its current state.
    ///
    /// Returns the updated row, or `None` when no row matched (missing
    /// id, or condition not satisfied). The whole batch is applied as a
    /// single store-native write; partial application is impossible.
    async fn apply(
        &self,
        link_id: &LinkId,
        condition: UpdateCondition,
        commands: &[LinkCommand],
    ) -> AppResult<Option<Link>>;

    /// Move every `active` row whose expiry has passed to `expired`.
    /// Returns the number of rows transitioned. Idempotent.
    async fn expire_overdue(&self, now: DateTime<Utc>) -> AppResult<u64>;

    /// List links issued by one owner, newest first.
    async fn find_by_owner(
        &self,
        owner_id: UserId,
        active_only: bool,
        limit: i64,
    ) -> AppResult<Vec<Link>>;

    /// List links exposing one file, newest first.
    async fn find_by_file(&self, file_id: &FileId, limit: i64) -> AppResult<Vec<Link>>;

    /// Count `active` rows, optionally for one owner.
    async fn count_active(&self, owner_id: Option<UserId>) -> AppResult<i64>;
}

//! User directory trait for the external account system.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::UserId;

/// Trait for the external user directory.
///
/// LinkGate never stores accounts itself; the embedding application
/// answers account questions through this seam. Both methods are
/// consulted on hot paths, so implementations should cache upstream
/// lookups where the source of truth is remote.
#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Whether the user is banned from accessing links.
    async fn is_banned(&self, user_id: UserId) -> AppResult<bool>;

    /// Maximum number of active links the user may hold, or `None` for
    /// unlimited. Tier limits live with the billing system, not here.
    async fn active_link_quota(&self, user_id: UserId) -> AppResult<Option<i64>>;
}

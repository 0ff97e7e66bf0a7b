//! Ban check against the external user directory.

use std::sync::Arc;

use async_trait::async_trait;

use linkgate_core::AppResult;
use linkgate_core::traits::UserDirectory;
use linkgate_entity::link::DenialReason;

use super::{AccessRequest, AdmissionGuard};

/// Denies accessors the user directory reports as banned.
///
/// Anonymous requests pass through; the directory only knows about
/// identified users.
#[derive(Debug)]
pub struct BanGuard {
    directory: Arc<dyn UserDirectory>,
}

impl BanGuard {
    /// Creates a ban guard backed by the given directory.
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl AdmissionGuard for BanGuard {
    fn name(&self) -> &str {
        "ban"
    }

    async fn check(&self, request: &AccessRequest) -> AppResult<Option<DenialReason>> {
        let Some(accessor_id) = request.accessor_id else {
            return Ok(None);
        };

        if self.directory.is_banned(accessor_id).await? {
            return Ok(Some(DenialReason::Banned));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkgate_core::types::{LinkId, UserId};

    #[derive(Debug)]
    struct StubDirectory {
        banned: Vec<UserId>,
    }

    #[async_trait]
    impl UserDirectory for StubDirectory {
        async fn is_banned(&self, user_id: UserId) -> AppResult<bool> {
            Ok(self.banned.contains(&user_id))
        }

        async fn active_link_quota(&self, _user_id: UserId) -> AppResult<Option<i64>> {
            Ok(None)
        }
    }

    fn guard() -> BanGuard {
        BanGuard::new(Arc::new(StubDirectory {
            banned: vec![UserId::new(13)],
        }))
    }

    #[tokio::test]
    async fn banned_accessor_is_denied() {
        let request =
            AccessRequest::new(LinkId::from("aB3xK9mQ2pLw")).with_accessor(UserId::new(13));
        assert_eq!(
            guard().check(&request).await.unwrap(),
            Some(DenialReason::Banned)
        );
    }

    #[tokio::test]
    async fn clean_accessor_passes() {
        let request =
            AccessRequest::new(LinkId::from("aB3xK9mQ2pLw")).with_accessor(UserId::new(7));
        assert_eq!(guard().check(&request).await.unwrap(), None);
    }

    #[tokio::test]
    async fn anonymous_request_passes() {
        let request = AccessRequest::new(LinkId::from("aB3xK9mQ2pLw"));
        assert_eq!(guard().check(&request).await.unwrap(), None);
    }
}

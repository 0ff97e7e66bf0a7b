//! Integration tests for the access admission path.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use linkgate::{
    AccessRequest, AdmissionService, AdmitOutcome, AppError, AppResult, CreateLink,
    CreateLinkRequest, DenialReason, ErrorKind, FileId, GuardChain, Link, LinkCommand, LinkId,
    LinkStore, MemoryAccessLogStore, PasswordHasher, UpdateCondition, UserId,
};

use common::TestApp;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_admissions_count_every_access() {
    let app = TestApp::new();
    let link = app.issue_link(7).await;

    let mut handles = Vec::new();
    for _ in 0..50 {
        let admission = app.app.admission();
        let link_id = link.link_id.clone();
        handles.push(tokio::spawn(async move {
            admission.admit(&AccessRequest::new(link_id)).await
        }));
    }
    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        assert!(outcome.is_permitted());
    }

    let stored = app
        .app
        .link_service()
        .get(&link.link_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.access_count, 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_first_accesses_stamp_exactly_once() {
    let app = TestApp::new();
    let link = app.issue_link(7).await;

    let mut handles = Vec::new();
    for _ in 0..20 {
        let admission = app.app.admission();
        let request = AccessRequest::new(link.link_id.clone());
        handles.push(tokio::spawn(async move {
            let stamp = request.request_time;
            let outcome = admission.admit(&request).await.unwrap();
            (stamp, outcome)
        }));
    }

    let mut stamps: Vec<DateTime<Utc>> = Vec::new();
    for handle in handles {
        let (stamp, outcome) = handle.await.unwrap();
        assert!(outcome.is_permitted());
        stamps.push(stamp);
    }

    let stored = app
        .app
        .link_service()
        .get(&link.link_id)
        .await
        .unwrap()
        .unwrap();
    let first = stored.first_accessed_at.expect("first access not stamped");
    // The winner is one of the contenders, and the stamp never moves.
    assert!(stamps.contains(&first));
    assert_eq!(stored.access_count, 20);
}

#[tokio::test]
async fn test_banned_accessor_is_denied_before_the_store() {
    let app = TestApp::new();
    let link = app.issue_link(7).await;
    app.directory.ban(UserId::new(13));

    let request = AccessRequest::new(link.link_id.clone()).with_accessor(UserId::new(13));
    let outcome = app.app.admission().admit(&request).await.unwrap();
    assert!(matches!(outcome, AdmitOutcome::Denied(DenialReason::Banned)));

    // Guard denials never touch the link or the log.
    let stored = app
        .app
        .link_service()
        .get(&link.link_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.access_count, 0);
    let entries = app
        .app
        .access_log_store()
        .find_recent_by_link(&link.link_id, 10)
        .await
        .unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_rate_limit_denies_past_the_window_budget() {
    let mut config = common::test_config();
    config.admission.rate_limit_max_attempts = 3;
    let app = TestApp::with_config(config);
    let link = app.issue_link(7).await;

    let request = AccessRequest::new(link.link_id.clone()).with_accessor(UserId::new(9));
    for _ in 0..3 {
        let outcome = app.app.admission().admit(&request).await.unwrap();
        assert!(outcome.is_permitted());
    }
    let outcome = app.app.admission().admit(&request).await.unwrap();
    assert!(matches!(
        outcome,
        AdmitOutcome::Denied(DenialReason::RateLimited)
    ));

    // Only admitted attempts reached the counter.
    let stored = app
        .app
        .link_service()
        .get(&link.link_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.access_count, 3);
}

#[tokio::test]
async fn test_rate_limit_disabled_admits_everything() {
    let mut config = common::test_config();
    config.admission.rate_limit_enabled = false;
    config.admission.rate_limit_max_attempts = 1;
    let app = TestApp::with_config(config);
    let link = app.issue_link(7).await;

    let request = AccessRequest::new(link.link_id.clone()).with_accessor(UserId::new(9));
    for _ in 0..5 {
        let outcome = app.app.admission().admit(&request).await.unwrap();
        assert!(outcome.is_permitted());
    }
}

#[tokio::test]
async fn test_malformed_ids_still_burn_rate_limit_budget() {
    let mut config = common::test_config();
    config.admission.rate_limit_max_attempts = 3;
    let app = TestApp::with_config(config);

    // A malformed id resolves through the same path as any other miss,
    // so repeated guesses spend budget like real attempts.
    let request = AccessRequest::new(LinkId::from("???")).with_accessor(UserId::new(9));
    for _ in 0..3 {
        let outcome = app.app.admission().admit(&request).await.unwrap();
        assert!(matches!(
            outcome,
            AdmitOutcome::Denied(DenialReason::NotFound)
        ));
    }
    let outcome = app.app.admission().admit(&request).await.unwrap();
    assert!(matches!(
        outcome,
        AdmitOutcome::Denied(DenialReason::RateLimited)
    ));
}

#[tokio::test]
async fn test_password_gate_full_flow() {
    let app = TestApp::new();
    let link = app
        .issue(CreateLinkRequest {
            file_id: FileId::from("f-abc123"),
            owner_id: UserId::new(7),
            expiry_days: None,
            max_access: None,
            self_destruct: false,
            self_destruct_after: None,
            password: Some("open sesame".to_string()),
        })
        .await;

    let bare = AccessRequest::new(link.link_id.clone());
    assert!(matches!(
        app.app.admission().admit(&bare).await.unwrap(),
        AdmitOutcome::Denied(DenialReason::PasswordRequired)
    ));

    let wrong = AccessRequest::new(link.link_id.clone()).with_password("open says me");
    assert!(matches!(
        app.app.admission().admit(&wrong).await.unwrap(),
        AdmitOutcome::Denied(DenialReason::PasswordInvalid)
    ));

    let right = AccessRequest::new(link.link_id.clone()).with_password("open sesame");
    let outcome = app.app.admission().admit(&right).await.unwrap();
    let AdmitOutcome::Permitted { link: admitted } = outcome else {
        panic!("expected permit with the correct password");
    };
    assert_eq!(admitted.access_count, 1);

    // Both refusals were logged with their reasons; the success row too.
    let entries = app
        .app
        .access_log_store()
        .find_recent_by_link(&link.link_id, 10)
        .await
        .unwrap();
    assert_eq!(entries.len(), 3);
    let errors: Vec<_> = entries
        .iter()
        .filter_map(|e| e.error.as_deref())
        .collect();
    assert!(errors.contains(&"password_required"));
    assert!(errors.contains(&"password_invalid"));
    assert_eq!(entries.iter().filter(|e| e.success).count(), 1);
}

#[tokio::test]
async fn test_unknown_link_denies_with_not_found() {
    let app = TestApp::new();
    let request = AccessRequest::new(LinkId::from("nosuchlink0x"));
    let outcome = app.app.admission().admit(&request).await.unwrap();
    assert!(matches!(
        outcome,
        AdmitOutcome::Denied(DenialReason::NotFound)
    ));
}

/// Link store whose every call fails, standing in for an unreachable
/// database.
#[derive(Debug)]
struct FailingLinkStore;

#[async_trait]
impl LinkStore for FailingLinkStore {
    async fn find_by_id(&self, _link_id: &LinkId) -> AppResult<Option<Link>> {
        Err(AppError::service_unavailable("Link store is unreachable"))
    }

    async fn insert(&self, _link: &CreateLink) -> AppResult<Link> {
        Err(AppError::service_unavailable("Link store is unreachable"))
    }

    async fn apply(
        &self,
        _link_id: &LinkId,
        _condition: UpdateCondition,
        _commands: &[LinkCommand],
    ) -> AppResult<Option<Link>> {
        Err(AppError::service_unavailable("Link store is unreachable"))
    }

    async fn expire_overdue(&self, _now: DateTime<Utc>) -> AppResult<u64> {
        Err(AppError::service_unavailable("Link store is unreachable"))
    }

    async fn find_by_owner(
        &self,
        _owner_id: UserId,
        _active_only: bool,
        _limit: i64,
    ) -> AppResult<Vec<Link>> {
        Err(AppError::service_unavailable("Link store is unreachable"))
    }

    async fn find_by_file(&self, _file_id: &FileId, _limit: i64) -> AppResult<Vec<Link>> {
        Err(AppError::service_unavailable("Link store is unreachable"))
    }

    async fn count_active(&self, _owner_id: Option<UserId>) -> AppResult<i64> {
        Err(AppError::service_unavailable("Link store is unreachable"))
    }
}

#[tokio::test]
async fn test_store_outage_is_an_error_not_a_denial() {
    let admission = AdmissionService::new(
        Arc::new(FailingLinkStore),
        Arc::new(MemoryAccessLogStore::new()),
        Arc::new(GuardChain::new()),
        Arc::new(PasswordHasher::new()),
    );

    let request = AccessRequest::new(LinkId::from("aB3xK9mQ2pLw"));
    let err = admission.admit(&request).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
}

//! Integration tests for the expiry sweeper.

mod common;

use chrono::{Duration, Utc};

use linkgate::{
    AccessRequest, AdmitOutcome, CreateLink, DenialReason, FileId, LinkId, LinkStatus, UserId,
};

use common::TestApp;

async fn plant_link(app: &TestApp, link_id: &str, expires_at: Option<chrono::DateTime<Utc>>) {
    app.app
        .link_store()
        .insert(&CreateLink {
            link_id: LinkId::from(link_id),
            file_id: FileId::from("f-abc123"),
            owner_id: UserId::new(7),
            max_access: None,
            self_destruct: false,
            self_destruct_after: None,
            password_hash: None,
            expires_at,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_sweep_expires_overdue_and_spares_the_rest() {
    let app = TestApp::new();
    let now = Utc::now();

    plant_link(&app, "overdue00001", Some(now - Duration::minutes(30))).await;
    plant_link(&app, "overdue00002", Some(now - Duration::hours(2))).await;
    plant_link(&app, "overdue00003", Some(now - Duration::days(1))).await;
    plant_link(&app, "freshAAAAAAA", Some(now + Duration::hours(1))).await;
    plant_link(&app, "eternalAAAAA", None).await;

    let report = app.app.sweep_job().run_once(now).await.unwrap();
    assert_eq!(report.links_expired, 3);

    for link_id in ["overdue00001", "overdue00002", "overdue00003"] {
        let stored = app
            .app
            .link_store()
            .find_by_id(&LinkId::from(link_id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, LinkStatus::Expired);
    }
    for link_id in ["freshAAAAAAA", "eternalAAAAA"] {
        let stored = app
            .app
            .link_store()
            .find_by_id(&LinkId::from(link_id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, LinkStatus::Active);
    }

    // Re-running over the same instant is a no-op.
    let report = app.app.sweep_job().run_once(now).await.unwrap();
    assert_eq!(report.links_expired, 0);
}

#[tokio::test]
async fn test_swept_links_deny_without_a_lazy_transition() {
    let app = TestApp::new();
    let now = Utc::now();
    plant_link(&app, "overdueAAAAA", Some(now - Duration::minutes(5))).await;

    app.app.sweep_job().run_once(now).await.unwrap();

    // Already expired in storage, the admission path just reads it.
    let request = AccessRequest::new(LinkId::from("overdueAAAAA"));
    assert!(matches!(
        app.app.admission().admit(&request).await.unwrap(),
        AdmitOutcome::Denied(DenialReason::Expired)
    ));
}

#[tokio::test]
async fn test_retention_prunes_access_log_rows() {
    let app = TestApp::new();
    let link = app.issue_link(7).await;

    // Two admissions write two success rows.
    for _ in 0..2 {
        let request = AccessRequest::new(link.link_id.clone());
        assert!(app.app.admission().admit(&request).await.unwrap().is_permitted());
    }

    // Rows are fresh, so a sweep now keeps them.
    let report = app.app.sweep_job().run_once(Utc::now()).await.unwrap();
    assert_eq!(report.logs_pruned, 0);

    // A sweep far past the 90-day retention window prunes them.
    let report = app
        .app
        .sweep_job()
        .run_once(Utc::now() + Duration::days(91))
        .await
        .unwrap();
    assert_eq!(report.logs_pruned, 2);
    let entries = app
        .app
        .access_log_store()
        .find_recent_by_link(&link.link_id, 10)
        .await
        .unwrap();
    assert!(entries.is_empty());
}

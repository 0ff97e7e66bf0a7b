//! Expiry sweep and access-log retention job.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use linkgate_core::config::SweeperConfig;
use linkgate_core::result::AppResult;
use linkgate_entity::access_log::AccessLogStore;
use linkgate_entity::link::LinkStore;

/// Counts of what one sweep changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Active links moved to `expired`.
    pub links_expired: u64,
    /// Access-log rows removed by retention.
    pub logs_pruned: u64,
}

/// Sweeps overdue links into `expired` and prunes aged access-log rows.
///
/// Both halves are single bulk writes against the store, so a cancelled
/// runner never leaves partial state, and re-running a sweep over the
/// same instant is a no-op.
#[derive(Debug)]
pub struct SweepJob {
    /// Link store.
    links: Arc<dyn LinkStore>,
    /// Access log store.
    access_log: Arc<dyn AccessLogStore>,
    /// Sweeper configuration.
    config: SweeperConfig,
}

impl SweepJob {
    /// Create a new sweep job.
    pub fn new(
        links: Arc<dyn LinkStore>,
        access_log: Arc<dyn AccessLogStore>,
        config: SweeperConfig,
    ) -> Self {
        Self {
            links,
            access_log,
            config,
        }
    }

    /// Run one sweep against the given instant.
    pub async fn run_once(&self, now: DateTime<Utc>) -> AppResult<SweepReport> {
        let links_expired = self.links.expire_overdue(now).await?;
        if links_expired > 0 {
            info!("Expired {} overdue links", links_expired);
        }

        let logs_pruned = if self.config.access_log_retention_days > 0 {
            let cutoff = now - Duration::days(self.config.access_log_retention_days);
            let pruned = self.access_log.prune_older_than(cutoff).await?;
            if pruned > 0 {
                info!("Pruned {} access log rows past retention", pruned);
            }
            pruned
        } else {
            0
        };

        Ok(SweepReport {
            links_expired,
            logs_pruned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkgate_core::types::{FileId, LinkId, UserId};
    use linkgate_database::{MemoryAccessLogStore, MemoryLinkStore};
    use linkgate_entity::access_log::CreateAccessLogEntry;
    use linkgate_entity::link::{CreateLink, LinkStatus};

    fn create(link_id: &str, expires_at: Option<DateTime<Utc>>) -> CreateLink {
        CreateLink {
            link_id: LinkId::from(link_id),
            file_id: FileId::from("f-abc123"),
            owner_id: UserId::new(7),
            max_access: None,
            self_destruct: false,
            self_destruct_after: None,
            password_hash: None,
            expires_at,
        }
    }

    fn job(
        links: Arc<MemoryLinkStore>,
        log: Arc<MemoryAccessLogStore>,
        retention_days: i64,
    ) -> SweepJob {
        let config = SweeperConfig {
            enabled: true,
            interval_seconds: 3600,
            access_log_retention_days: retention_days,
        };
        SweepJob::new(links, log, config)
    }

    #[tokio::test]
    async fn sweep_expires_only_overdue_links() {
        let links = Arc::new(MemoryLinkStore::new());
        let log = Arc::new(MemoryAccessLogStore::new());
        let now = Utc::now();

        for i in 0..3 {
            links
                .insert(&create(
                    &format!("overdue{i:05}"),
                    Some(now - Duration::minutes(5)),
                ))
                .await
                .unwrap();
        }
        links
            .insert(&create("freshAAAAAAA", Some(now + Duration::hours(1))))
            .await
            .unwrap();
        links.insert(&create("eternalAAAAA", None)).await.unwrap();

        let report = job(links.clone(), log, 0).run_once(now).await.unwrap();
        assert_eq!(report.links_expired, 3);

        let fresh = links
            .find_by_id(&LinkId::from("freshAAAAAAA"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fresh.status, LinkStatus::Active);
        let eternal = links
            .find_by_id(&LinkId::from("eternalAAAAA"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(eternal.status, LinkStatus::Active);
    }

    #[tokio::test]
    async fn sweep_is_idempotent() {
        let links = Arc::new(MemoryLinkStore::new());
        let log = Arc::new(MemoryAccessLogStore::new());
        let now = Utc::now();

        links
            .insert(&create("overdueAAAAA", Some(now - Duration::minutes(5))))
            .await
            .unwrap();

        let job = job(links, log, 0);
        assert_eq!(job.run_once(now).await.unwrap().links_expired, 1);
        assert_eq!(job.run_once(now).await.unwrap().links_expired, 0);
    }

    #[tokio::test]
    async fn retention_prunes_only_aged_rows() {
        let links = Arc::new(MemoryLinkStore::new());
        let log = Arc::new(MemoryAccessLogStore::new());
        let now = Utc::now();

        for _ in 0..2 {
            log.append(&CreateAccessLogEntry {
                link_id: LinkId::from("aB3xK9mQ2pLw"),
                file_id: FileId::from("f-abc123"),
                accessor_id: None,
                ip_address: None,
                user_agent: None,
                success: true,
                error: None,
            })
            .await
            .unwrap();
        }

        // Rows just written are inside any positive retention window.
        let report = job(links.clone(), log.clone(), 90)
            .run_once(now)
            .await
            .unwrap();
        assert_eq!(report.logs_pruned, 0);

        // Sweeping from far in the future prunes them.
        let later = now + Duration::days(91);
        let report = job(links, log.clone(), 90).run_once(later).await.unwrap();
        assert_eq!(report.logs_pruned, 2);
    }

    #[tokio::test]
    async fn zero_retention_disables_pruning() {
        let links = Arc::new(MemoryLinkStore::new());
        let log = Arc::new(MemoryAccessLogStore::new());

        log.append(&CreateAccessLogEntry {
            link_id: LinkId::from("aB3xK9mQ2pLw"),
            file_id: FileId::from("f-abc123"),
            accessor_id: None,
            ip_address: None,
            user_agent: None,
            success: true,
            error: None,
        })
        .await
        .unwrap();

        let later = Utc::now() + Duration::days(365);
        let report = job(links, log.clone(), 0).run_once(later).await.unwrap();
        assert_eq!(report.logs_pruned, 0);
        assert_eq!(
            log.find_recent_by_link(&LinkId::from("aB3xK9mQ2pLw"), 10)
                .await
                .unwrap()
                .len(),
            1
        );
    }
}

//! In-memory access log store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use linkgate_core::result::AppResult;
use linkgate_core::types::LinkId;
use linkgate_entity::access_log::{AccessLogEntry, AccessLogStore, CreateAccessLogEntry};

/// Concurrent-map-backed access log store.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccessLogStore {
    entries: Arc<DashMap<Uuid, AccessLogEntry>>,
}

impl MemoryAccessLogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl AccessLogStore for MemoryAccessLogStore {
    async fn append(&self, entry: &CreateAccessLogEntry) -> AppResult<AccessLogEntry> {
        let row = AccessLogEntry {
            id: Uuid::new_v4(),
            link_id: entry.link_id.clone(),
            file_id: entry.file_id.clone(),
            accessor_id: entry.accessor_id,
            ip_address: entry.ip_address.clone(),
            user_agent: entry.user_agent.clone(),
            success: entry.success,
            error: entry.error.clone(),
            accessed_at: Utc::now(),
        };
        self.entries.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_recent_by_link(
        &self,
        link_id: &LinkId,
        limit: i64,
    ) -> AppResult<Vec<AccessLogEntry>> {
        let mut entries: Vec<AccessLogEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.link_id == *link_id)
            .map(|entry| entry.clone())
            .collect();
        entries.sort_by(|a, b| b.accessed_at.cmp(&a.accessed_at));
        entries.truncate(limit.max(0) as usize);
        Ok(entries)
    }

    async fn prune_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.accessed_at >= cutoff);
        Ok((before - self.entries.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkgate_core::types::FileId;

    fn attempt(link_id: &str, success: bool) -> CreateAccessLogEntry {
        CreateAccessLogEntry {
            link_id: LinkId::from(link_id),
            file_id: FileId::from("f-abc123"),
            accessor_id: None,
            ip_address: None,
            user_agent: None,
            success,
            error: (!success).then(|| "expired".to_string()),
        }
    }

    #[tokio::test]
    async fn test_append_and_list_newest_first() {
        let store = MemoryAccessLogStore::new();
        store.append(&attempt("aB3xK9mQ2pLw", true)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        store.append(&attempt("aB3xK9mQ2pLw", false)).await.unwrap();
        store.append(&attempt("other-link-1", true)).await.unwrap();

        let entries = store
            .find_recent_by_link(&LinkId::from("aB3xK9mQ2pLw"), 10)
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert!(!entries[0].success);
        assert_eq!(entries[0].error.as_deref(), Some("expired"));
        assert!(entries[1].success);
    }

    #[tokio::test]
    async fn test_prune_removes_only_old_entries() {
        let store = MemoryAccessLogStore::new();
        store.append(&attempt("aB3xK9mQ2pLw", true)).await.unwrap();
        let cutoff = Utc::now() - chrono::Duration::minutes(5);
        assert_eq!(store.prune_older_than(cutoff).await.unwrap(), 0);
        assert_eq!(store.prune_older_than(Utc::now()).await.unwrap(), 1);
        assert!(store.is_empty());
    }
}

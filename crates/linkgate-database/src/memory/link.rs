//! In-memory link store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use linkgate_core::error::AppError;
use linkgate_core::result::AppResult;
use linkgate_core::types::{FileId, LinkId, UserId};
use linkgate_entity::link::{CreateLink, Link, LinkCommand, LinkStatus, LinkStore, UpdateCondition};

/// Concurrent-map-backed link store.
///
/// `apply` holds the entry's write guard for the whole
/// check-condition-then-mutate sequence, so concurrent command batches
/// against one link serialize exactly as rows do under the SQL backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryLinkStore {
    links: Arc<DashMap<LinkId, Link>>,
}

impl MemoryLinkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the store holds no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn find_by_id(&self, link_id: &LinkId) -> AppResult<Option<Link>> {
        Ok(self.links.get(link_id).map(|entry| entry.clone()))
    }

    async fn insert(&self, link: &CreateLink) -> AppResult<Link> {
        let row = Link {
            link_id: link.link_id.clone(),
            file_id: link.file_id.clone(),
            owner_id: link.owner_id,
            status: LinkStatus::Active,
            access_count: 0,
            max_access: link.max_access,
            self_destruct: link.self_destruct,
            self_destruct_after: link.self_destruct_after,
            password_hash: link.password_hash.clone(),
            expires_at: link.expires_at,
            first_accessed_at: None,
            last_accessed_at: None,
            created_at: Utc::now(),
            revoked_at: None,
        };
        match self.links.entry(link.link_id.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Link '{}' already exists",
                link.link_id
            ))),
            Entry::Vacant(vacant) => {
                vacant.insert(row.clone());
                Ok(row)
            }
        }
    }

    async fn apply(
        &self,
        link_id: &LinkId,
        condition: UpdateCondition,
        commands: &[LinkCommand],
    ) -> AppResult<Option<Link>> {
        if commands.is_empty() {
            return Err(AppError::validation("Empty link command batch"));
        }
        let Some(mut entry) = self.links.get_mut(link_id) else {
            return Ok(None);
        };
        if !condition.holds_for(&entry) {
            return Ok(None);
        }
        entry.apply_commands(commands);
        Ok(Some(entry.clone()))
    }

    async fn expire_overdue(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut transitioned = 0u64;
        for mut entry in self.links.iter_mut() {
            if entry.status == LinkStatus::Active
                && entry.expires_at.is_some_and(|expires_at| expires_at < now)
            {
                entry.status = LinkStatus::Expired;
                transitioned += 1;
            }
        }
        Ok(transitioned)
    }

    async fn find_by_owner(
        &self,
        owner_id: UserId,
        active_only: bool,
        limit: i64,
    ) -> AppResult<Vec<Link>> {
        let mut links: Vec<Link> = self
            .links
            .iter()
            .filter(|entry| {
                entry.owner_id == owner_id && (!active_only || entry.status == LinkStatus::Active)
            })
            .map(|entry| entry.clone())
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        links.truncate(limit.max(0) as usize);
        Ok(links)
    }

    async fn find_by_file(&self, file_id: &FileId, limit: i64) -> AppResult<Vec<Link>> {
        let mut links: Vec<Link> = self
            .links
            .iter()
            .filter(|entry| entry.file_id == *file_id)
            .map(|entry| entry.clone())
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        links.truncate(limit.max(0) as usize);
        Ok(links)
    }

    async fn count_active(&self, owner_id: Option<UserId>) -> AppResult<i64> {
        let count = self
            .links
            .iter()
            .filter(|entry| {
                entry.status == LinkStatus::Active
                    && owner_id.is_none_or(|owner_id| entry.owner_id == owner_id)
            })
            .count();
        Ok(count as i64)
    }
}

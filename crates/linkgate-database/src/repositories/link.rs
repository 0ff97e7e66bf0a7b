//! Link store implementation over PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use linkgate_core::error::{AppError, ErrorKind};
use linkgate_core::result::AppResult;
use linkgate_core::types::{FileId, LinkId, UserId};
use linkgate_entity::link::{CreateLink, Link, LinkCommand, LinkStore, UpdateCondition};

/// PostgreSQL-backed link store.
///
/// Command batches are translated into a single `UPDATE`: the counter
/// moves with an atomic add, the first-access stamp with `COALESCE`, so
/// concurrent admissions are serialized by the row lock rather than by
/// any read-modify-write in this process.
#[derive(Debug, Clone)]
pub struct PgLinkStore {
    pool: PgPool,
}

impl PgLinkStore {
    /// Create a new link store over a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn set_clause(command: &LinkCommand, param_idx: &mut u32) -> String {
        match command {
            LinkCommand::IncrementAccessCount => {
                "access_count = access_count + 1".to_string()
            }
            LinkCommand::SetFirstAccessIfUnset(_) => {
                let clause =
                    format!("first_accessed_at = COALESCE(first_accessed_at, ${param_idx})");
                *param_idx += 1;
                clause
            }
            LinkCommand::TouchLastAccess(_) => {
                let clause = format!("last_accessed_at = ${param_idx}");
                *param_idx += 1;
                clause
            }
            LinkCommand::SetStatus(_) => {
                let clause = format!("status = ${param_idx}");
                *param_idx += 1;
                clause
            }
            LinkCommand::SetRevokedAt(_) => {
                let clause = format!("revoked_at = ${param_idx}");
                *param_idx += 1;
                clause
            }
        }
    }
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn find_by_id(&self, link_id: &LinkId) -> AppResult<Option<Link>> {
        sqlx::query_as::<_, Link>("SELECT * FROM links WHERE link_id = $1")
            .bind(link_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find link", e))
    }

    async fn insert(&self, link: &CreateLink) -> AppResult<Link> {
        sqlx::query_as::<_, Link>(
            "INSERT INTO links (link_id, file_id, owner_id, max_access, self_destruct, \
             self_destruct_after, password_hash, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&link.link_id)
        .bind(&link.file_id)
        .bind(link.owner_id)
        .bind(link.max_access)
        .bind(link.self_destruct)
        .bind(link.self_destruct_after)
        .bind(&link.password_hash)
        .bind(link.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create link", e))
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

        // $1 is the link id; command and condition params follow in order.
        let mut param_idx = 2u32;
        let set_clauses: Vec<String> = commands
            .iter()
            .map(|command| Self::set_clause(command, &mut param_idx))
            .collect();

        let mut where_clause = String::from("link_id = $1");
        match condition {
            UpdateCondition::Any => {}
            UpdateCondition::ActiveOnly => {
                where_clause.push_str(" AND status = 'active'");
            }
            UpdateCondition::OwnedAndNotRevoked(_) => {
                where_clause
                    .push_str(&format!(" AND owner_id = ${param_idx} AND status <> 'revoked'"));
            }
        }

        let sql = format!(
            "UPDATE links SET {} WHERE {} RETURNING *",
            set_clauses.join(", "),
            where_clause
        );

        let mut query = sqlx::query_as::<_, Link>(&sql).bind(link_id);
        for command in commands {
            match command {
                LinkCommand::IncrementAccessCount => {}
                LinkCommand::SetFirstAccessIfUnset(ts)
                | LinkCommand::TouchLastAccess(ts)
                | LinkCommand::SetRevokedAt(ts) => {
                    query = query.bind(*ts);
                }
                LinkCommand::SetStatus(status) => {
                    query = query.bind(*status);
                }
            }
        }
        if let UpdateCondition::OwnedAndNotRevoked(owner_id) = condition {
            query = query.bind(owner_id);
        }

        query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update link", e))
    }

    async fn expire_overdue(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE links SET status = 'expired' \
             WHERE status = 'active' AND expires_at IS NOT NULL AND expires_at < $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to expire overdue links", e)
        })?;
        Ok(result.rows_affected())
    }

    async fn find_by_owner(
        &self,
        owner_id: UserId,
        active_only: bool,
        limit: i64,
    ) -> AppResult<Vec<Link>> {
        let sql = if active_only {
            "SELECT * FROM links WHERE owner_id = $1 AND status = 'active' \
             ORDER BY created_at DESC LIMIT $2"
        } else {
            "SELECT * FROM links WHERE owner_id = $1 ORDER BY created_at DESC LIMIT $2"
        };
        sqlx::query_as::<_, Link>(sql)
            .bind(owner_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list links by owner", e)
            })
    }

    async fn find_by_file(&self, file_id: &FileId, limit: i64) -> AppResult<Vec<Link>> {
        sqlx::query_as::<_, Link>(
            "SELECT * FROM links WHERE file_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(file_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list links by file", e)
        })
    }

    async fn count_active(&self, owner_id: Option<UserId>) -> AppResult<i64> {
        let count: i64 = match owner_id {
            Some(owner_id) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM links WHERE status = 'active' AND owner_id = $1",
                )
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE status = 'active'")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count active links", e)
        })?;
        Ok(count)
    }
}

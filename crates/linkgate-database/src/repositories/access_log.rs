//! Access log store implementation over PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use linkgate_core::error::{AppError, ErrorKind};
use linkgate_core::result::AppResult;
use linkgate_core::types::LinkId;
use linkgate_entity::access_log::{AccessLogEntry, AccessLogStore, CreateAccessLogEntry};

/// PostgreSQL-backed access log store.
#[derive(Debug, Clone)]
pub struct PgAccessLogStore {
    pool: PgPool,
}

impl PgAccessLogStore {
    /// Create a new access log store over a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessLogStore for PgAccessLogStore {
    async fn append(&self, entry: &CreateAccessLogEntry) -> AppResult<AccessLogEntry> {
        sqlx::query_as::<_, AccessLogEntry>(
            "INSERT INTO access_log (link_id, file_id, accessor_id, ip_address, user_agent, \
             success, error) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&entry.link_id)
        .bind(&entry.file_id)
        .bind(entry.accessor_id)
        .bind(&entry.ip_address)
        .bind(&entry.user_agent)
        .bind(entry.success)
        .bind(&entry.error)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to append access log entry", e)
        })
    }

    async fn find_recent_by_link(
        &self,
        link_id: &LinkId,
        limit: i64,
    ) -> AppResult<Vec<AccessLogEntry>> {
        sqlx::query_as::<_, AccessLogEntry>(
            "SELECT * FROM access_log WHERE link_id = $1 ORDER BY accessed_at DESC LIMIT $2",
        )
        .bind(link_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list access log entries", e)
        })
    }

    async fn prune_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM access_log WHERE accessed_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to prune access log", e)
            })?;
        Ok(result.rows_affected())
    }
}

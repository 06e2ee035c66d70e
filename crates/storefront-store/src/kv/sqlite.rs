//! # SQLite Backend
//!
//! `KeyValueStore` over the `kv_store` table.
//!
//! ```text
//! kv_store
//! ┌──────────┬──────────────────────────────┬──────────────────────┐
//! │ key (PK) │ value (JSON text)            │ updated_at           │
//! ├──────────┼──────────────────────────────┼──────────────────────┤
//! │ cart     │ [{"id":"tee-01-M-...", ...}] │ 2026-10-18T04:05:00Z │
//! │ orders   │ [{"id":"ORD-...", ...}]      │ ...                  │
//! │ wishlist │ ["tee-01","bag-02"]          │ ...                  │
//! └──────────┴──────────────────────────────┴──────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::KeyValueStore;
use crate::error::StoreResult;

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteStore { pool }
    }

    /// Every key currently stored, sorted.
    pub async fn keys(&self) -> StoreResult<Vec<String>> {
        let keys: Vec<String> = sqlx::query_scalar("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }
}

impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing snapshot");

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        debug!(key = %key, "Removing snapshot");

        sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

//! SQLite-backed save-game storage.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{ClockPort, KeyValueStore, StorageError};

/// SQLite implementation of the key-value port.
///
/// One row per key; `updated_at` records the last write.
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteKeyValueStore {
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, StorageError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| StorageError::backend("connect", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StorageError::backend("migrate", e))?;

        tracing::debug!(db_path, "Opened save database");
        Ok(Self { pool, clock })
    }

    /// Timestamp of the last write to `key`.
    pub async fn updated_at(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT updated_at FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::backend("updated_at", e))?;

        Ok(row.map(|row| row.get("updated_at")))
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::backend("get", e))?;

        Ok(row.map(|row| row.get("value")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let now = self.clock.now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO kv (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::backend("set", e))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM kv WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::backend("remove", e))?;

        Ok(())
    }
}

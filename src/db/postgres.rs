use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::store::{ApiKeyStore, StoreError};
use crate::config::Config;
use crate::models::{ApiKeyRecord, NewApiKey};

const SELECT_COLUMNS: &str =
    "id, name, key_hash, key_hint, usage, usage_limit, created_at, updated_at";

/// PostgreSQL-backed key store.
#[derive(Clone)]
pub struct PgApiKeyStore {
    pool: PgPool,
}

impl PgApiKeyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build the connection pool from configuration. The access token is
    /// applied as the connection password, overriding any in the URL.
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        let options = PgConnectOptions::from_str(&config.database_url)
            .map_err(|e| StoreError::Connection(format!("invalid DATABASE_URL: {}", e)))?
            .password(&config.database_token);

        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(Duration::from_secs(config.database_acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Query(format!("migration failed: {}", e)))
    }
}

fn record_from_row(row: &PgRow) -> Result<ApiKeyRecord, StoreError> {
    Ok(ApiKeyRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        key_hash: row.try_get("key_hash")?,
        key_hint: row.try_get("key_hint")?,
        usage: row.try_get("usage")?,
        usage_limit: row.try_get("usage_limit")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl ApiKeyStore for PgApiKeyStore {
    async fn list(&self) -> Result<Vec<ApiKeyRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM api_keys ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(record_from_row).collect()
    }

    async fn insert(&self, new_key: &NewApiKey) -> Result<ApiKeyRecord, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO api_keys (name, key_hash, key_hint, usage, usage_limit)
            VALUES ($1, $2, $3, 0, $4)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(&new_key.name)
        .bind(&new_key.key_hash)
        .bind(&new_key.key_hint)
        .bind(new_key.usage_limit)
        .fetch_one(&self.pool)
        .await?;

        record_from_row(&row)
    }

    async fn rename(&self, id: Uuid, name: &str) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE api_keys
            SET name = $1, updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(name)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM api_keys WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn find_by_hash(&self, key_hash: &str) -> Result<Option<ApiKeyRecord>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM api_keys WHERE key_hash = $1",
            SELECT_COLUMNS
        ))
        .bind(key_hash)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(record_from_row).transpose()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

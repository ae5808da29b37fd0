use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{ApiKeyRecord, NewApiKey};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("no matching row")]
    NotFound,
}

impl StoreError {
    /// Stable machine-readable code surfaced to HTTP callers.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Connection(_) => "DB_UNAVAILABLE",
            StoreError::Query(_) => "DB_QUERY_FAILED",
            StoreError::Conflict(_) => "DB_CONFLICT",
            StoreError::NotFound => "KEY_NOT_FOUND",
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => StoreError::Connection(err.to_string()),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(db_err.message().to_string())
            }
            other => StoreError::Query(other.to_string()),
        }
    }
}

/// Row-level access to the `api_keys` table.
///
/// Mutations report the number of affected rows; deciding what zero means is
/// left to the caller.
#[async_trait]
pub trait ApiKeyStore: Send + Sync {
    /// All keys, newest first.
    async fn list(&self) -> Result<Vec<ApiKeyRecord>, StoreError>;
    /// Insert a key and return exactly what was stored.
    async fn insert(&self, new_key: &NewApiKey) -> Result<ApiKeyRecord, StoreError>;
    /// Set `name` and refresh `updated_at`.
    async fn rename(&self, id: Uuid, name: &str) -> Result<u64, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<u64, StoreError>;
    /// Exact match on the key digest.
    async fn find_by_hash(&self, key_hash: &str) -> Result<Option<ApiKeyRecord>, StoreError>;
    /// Cheap connectivity probe for health checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

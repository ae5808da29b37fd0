//! In-memory key store for tests and local runs without PostgreSQL.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{ApiKeyStore, StoreError};
use crate::models::{ApiKeyRecord, NewApiKey};

#[derive(Debug, Default)]
pub struct InMemoryApiKeyStore {
    // Insertion order; listing sorts on top of it.
    rows: Arc<RwLock<Vec<ApiKeyRecord>>>,
    queries: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryApiKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations issued so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Make every subsequent operation fail with a connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn begin(&self) -> Result<(), StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Connection("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ApiKeyStore for InMemoryApiKeyStore {
    async fn list(&self) -> Result<Vec<ApiKeyRecord>, StoreError> {
        self.begin()?;
        let rows = self.rows.read().await;

        // Newest insert first so equal timestamps still list newest first.
        let mut result: Vec<ApiKeyRecord> = rows.iter().rev().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn insert(&self, new_key: &NewApiKey) -> Result<ApiKeyRecord, StoreError> {
        self.begin()?;
        let mut rows = self.rows.write().await;

        if rows.iter().any(|r| r.key_hash == new_key.key_hash) {
            return Err(StoreError::Conflict(
                "duplicate key value violates unique constraint \"api_keys_key_hash_key\""
                    .to_string(),
            ));
        }

        let now = Utc::now();
        let record = ApiKeyRecord {
            id: Uuid::new_v4(),
            name: new_key.name.clone(),
            key_hash: new_key.key_hash.clone(),
            key_hint: new_key.key_hint.clone(),
            usage: 0,
            usage_limit: new_key.usage_limit,
            created_at: now,
            updated_at: now,
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn rename(&self, id: Uuid, name: &str) -> Result<u64, StoreError> {
        self.begin()?;
        let mut rows = self.rows.write().await;

        match rows.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                row.name = name.to_string();
                row.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<u64, StoreError> {
        self.begin()?;
        let mut rows = self.rows.write().await;

        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok((before - rows.len()) as u64)
    }

    async fn find_by_hash(&self, key_hash: &str) -> Result<Option<ApiKeyRecord>, StoreError> {
        self.begin()?;
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.key_hash == key_hash).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.begin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_key(name: &str, hash: &str) -> NewApiKey {
        NewApiKey {
            name: name.to_string(),
            key_hash: hash.to_string(),
            key_hint: "abcd".to_string(),
            usage_limit: 100,
        }
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let store = InMemoryApiKeyStore::new();
        let first = store.insert(&new_key("first", "h1")).await.unwrap();
        let second = store.insert(&new_key("second", "h2")).await.unwrap();

        let listed = store.list().await.unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn duplicate_hash_is_rejected() {
        let store = InMemoryApiKeyStore::new();
        store.insert(&new_key("a", "same")).await.unwrap();

        let err = store.insert(&new_key("b", "same")).await.unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn mutations_on_missing_id_affect_no_rows() {
        let store = InMemoryApiKeyStore::new();

        assert_eq!(store.rename(Uuid::new_v4(), "x").await.unwrap(), 0);
        assert_eq!(store.delete(Uuid::new_v4()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unavailable_store_fails_and_counts_queries() {
        let store = InMemoryApiKeyStore::new();
        store.set_unavailable(true);

        let err = store.list().await.unwrap_err();

        assert!(matches!(err, StoreError::Connection(_)));
        assert_eq!(store.query_count(), 1);
    }
}

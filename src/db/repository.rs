use std::sync::Arc;

use uuid::Uuid;

use super::store::{ApiKeyStore, StoreError};
use crate::models::{ApiKeyRecord, CreatedApiKey, NewApiKey};
use crate::utils::{generate_api_key, hash_api_key, key_hint};

/// Key operations used by the HTTP layer.
///
/// Owns key generation and hashing so no store adapter ever sees a plaintext
/// key, and turns zero-row mutations into [`StoreError::NotFound`].
#[derive(Clone)]
pub struct KeyRepository {
    store: Arc<dyn ApiKeyStore>,
}

impl KeyRepository {
    pub fn new(store: Arc<dyn ApiKeyStore>) -> Self {
        Self { store }
    }

    pub async fn list_all(&self) -> Result<Vec<ApiKeyRecord>, StoreError> {
        self.store.list().await
    }

    /// Mint a new `sk-` key with zero usage.
    pub async fn insert(&self, name: &str, usage_limit: i64) -> Result<CreatedApiKey, StoreError> {
        let key = generate_api_key();
        let new_key = NewApiKey {
            name: name.to_string(),
            key_hash: hash_api_key(&key),
            key_hint: key_hint(&key),
            usage_limit,
        };

        let record = self.store.insert(&new_key).await?;
        tracing::info!(key_id = %record.id, "API key created");

        Ok(CreatedApiKey { record, key })
    }

    pub async fn update_name(&self, id: Uuid, name: &str) -> Result<(), StoreError> {
        match self.store.rename(id, name).await? {
            0 => Err(StoreError::NotFound),
            _ => Ok(()),
        }
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        match self.store.delete(id).await? {
            0 => Err(StoreError::NotFound),
            _ => {
                tracing::info!(key_id = %id, "API key deleted");
                Ok(())
            }
        }
    }

    /// Look up the record owning a plaintext key.
    pub async fn find_by_key(&self, key: &str) -> Result<Option<ApiKeyRecord>, StoreError> {
        self.store.find_by_hash(&hash_api_key(key)).await
    }

    pub async fn is_healthy(&self) -> bool {
        self.store.ping().await.is_ok()
    }
}

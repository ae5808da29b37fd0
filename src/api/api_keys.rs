use std::borrow::Cow;

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::extract::{KeyId, ValidatedJson};
use super::{ApiError, AppState};
use crate::models::{ApiKeyRecord, CreatedApiKey};
use crate::utils::mask_api_key;

// ============================================
// Request/Response Types
// ============================================

#[derive(Debug, Deserialize, Validate)]
pub struct CreateApiKeyRequest {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    /// Stored as `usage_limit`; informational only.
    #[validate(range(min = 0))]
    pub limit: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RenameApiKeyRequest {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
}

/// A key as shown in listings. Only the masked form of the secret is available.
#[derive(Debug, Serialize)]
pub struct ApiKeyItem {
    pub id: Uuid,
    pub name: String,
    pub masked_key: String,
    pub usage: i64,
    pub usage_limit: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ApiKeyRecord> for ApiKeyItem {
    fn from(record: ApiKeyRecord) -> Self {
        Self {
            id: record.id,
            masked_key: mask_api_key(&record.key_hint),
            name: record.name,
            usage: record.usage,
            usage_limit: record.usage_limit,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Creation response; the only response that carries the plaintext key.
#[derive(Debug, Serialize)]
pub struct CreateApiKeyResponse {
    #[serde(flatten)]
    pub item: ApiKeyItem,
    pub key: String,
}

impl From<CreatedApiKey> for CreateApiKeyResponse {
    fn from(created: CreatedApiKey) -> Self {
        Self {
            item: created.record.into(),
            key: created.key,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be empty")));
    }
    Ok(())
}

// ============================================
// Handlers
// ============================================

/// List all API keys, newest first
///
/// GET /keys
pub async fn list_api_keys(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApiKeyItem>>, ApiError> {
    let records = state
        .keys
        .list_all()
        .await
        .map_err(ApiError::store("list API keys"))?;

    Ok(Json(records.into_iter().map(ApiKeyItem::from).collect()))
}

/// Create a new API key
///
/// POST /keys
pub async fn create_api_key(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateApiKeyRequest>,
) -> Result<Json<CreateApiKeyResponse>, ApiError> {
    let created = state
        .keys
        .insert(req.name.trim(), req.limit)
        .await
        .map_err(ApiError::store("create API key"))?;

    Ok(Json(created.into()))
}

/// Rename an API key
///
/// PUT /keys/{key_id}
pub async fn rename_api_key(
    State(state): State<AppState>,
    KeyId(key_id): KeyId,
    ValidatedJson(req): ValidatedJson<RenameApiKeyRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .keys
        .update_name(key_id, req.name.trim())
        .await
        .map_err(ApiError::store("rename API key"))?;

    Ok(Json(SuccessResponse { success: true }))
}

/// Delete an API key
///
/// DELETE /keys/{key_id}
pub async fn delete_api_key(
    State(state): State<AppState>,
    KeyId(key_id): KeyId,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .keys
        .delete_by_id(key_id)
        .await
        .map_err(ApiError::store("delete API key"))?;

    Ok(Json(SuccessResponse { success: true }))
}

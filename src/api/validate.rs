use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AppState;
use crate::models::ApiKeyRecord;
use crate::utils::{key_hint, mask_api_key};

#[derive(Debug, Deserialize)]
pub struct ValidateKeyRequest {
    #[serde(default)]
    pub key: Option<String>,
}

/// Usage metadata returned for a valid key. The key itself is never echoed.
#[derive(Debug, Serialize)]
pub struct KeyUsage {
    pub id: Uuid,
    pub name: String,
    pub usage: i64,
    pub usage_limit: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ApiKeyRecord> for KeyUsage {
    fn from(record: ApiKeyRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            usage: record.usage,
            usage_limit: record.usage_limit,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ValidateKeyResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<KeyUsage>,
}

/// Every way a validation request can end.
#[derive(Debug)]
pub enum ValidationOutcome {
    Valid(KeyUsage),
    InvalidFormat,
    KeyRequired,
    QueryFailed,
    UnknownKey,
}

impl ValidationOutcome {
    fn status(&self) -> StatusCode {
        match self {
            ValidationOutcome::Valid(_) => StatusCode::OK,
            ValidationOutcome::InvalidFormat | ValidationOutcome::KeyRequired => {
                StatusCode::BAD_REQUEST
            }
            ValidationOutcome::QueryFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ValidationOutcome::UnknownKey => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ValidationOutcome::Valid(_) => "API key is valid",
            ValidationOutcome::InvalidFormat => "invalid request format",
            ValidationOutcome::KeyRequired => "key required",
            ValidationOutcome::QueryFailed => "database query failed",
            ValidationOutcome::UnknownKey => "invalid API key",
        }
    }
}

impl IntoResponse for ValidationOutcome {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        let data = match self {
            ValidationOutcome::Valid(usage) => Some(usage),
            _ => None,
        };

        let body = ValidateKeyResponse {
            success: data.is_some(),
            message,
            data,
        };

        (status, Json(body)).into_response()
    }
}

/// Check whether a submitted key exists
///
/// POST /validate
pub async fn validate_api_key(
    State(state): State<AppState>,
    payload: Result<Json<ValidateKeyRequest>, JsonRejection>,
) -> ValidationOutcome {
    let Json(req) = match payload {
        Ok(req) => req,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected validation request body");
            return ValidationOutcome::InvalidFormat;
        }
    };

    // Blank means missing; anything else is looked up exactly as sent.
    let key = match req.key.as_deref() {
        Some(key) if !key.trim().is_empty() => key,
        _ => return ValidationOutcome::KeyRequired,
    };

    match state.keys.find_by_key(key).await {
        Ok(Some(record)) => ValidationOutcome::Valid(record.into()),
        Ok(None) => {
            tracing::debug!(key = %mask_api_key(&key_hint(key)), "Unknown API key");
            ValidationOutcome::UnknownKey
        }
        Err(e) => {
            tracing::error!(error = %e, "API key lookup failed");
            ValidationOutcome::QueryFailed
        }
    }
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::StoreError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Errors returned by the key management handlers.
///
/// This is the only place store failures become HTTP responses: the full error
/// is logged, the caller gets a generic message and a stable code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("failed to {action}: {source}")]
    Store {
        action: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// Adapter for `map_err` naming the operation that failed.
    pub fn store(action: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| ApiError::Store { action, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidRequest(details) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Invalid request", "INVALID_REQUEST").with_details(details),
            ),
            ApiError::Store {
                source: StoreError::NotFound,
                ..
            } => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("API key not found", "KEY_NOT_FOUND"),
            ),
            ApiError::Store { action, source } => {
                tracing::error!(error = %source, "Failed to {}", action);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(format!("Failed to {}", action), source.code()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

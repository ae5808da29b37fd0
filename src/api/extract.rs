//! Extractors whose rejections use the `{error, code}` envelope.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

use super::ApiError;

/// JSON body that is deserialized and then checked with `validator`.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection, "Rejected request body");
                ApiError::InvalidRequest(body_problem(&rejection).to_string())
            })?;

        value
            .validate()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        Ok(ValidatedJson(value))
    }
}

// Parser wording stays in the logs.
fn body_problem(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::JsonDataError(_) => "request body has missing or mistyped fields",
        JsonRejection::JsonSyntaxError(_) => "request body is not valid JSON",
        JsonRejection::MissingJsonContentType(_) => "expected content-type: application/json",
        _ => "request body could not be read",
    }
}

/// `{key_id}` path segment parsed as a UUID.
pub struct KeyId(pub Uuid);

impl<S> FromRequestParts<S> for KeyId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection, "Rejected key id");
                ApiError::InvalidRequest("key id must be a UUID".to_string())
            })?;

        Ok(KeyId(id))
    }
}

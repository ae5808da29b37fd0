use axum::{
    Router,
    routing::{get, post, put},
};

use super::AppState;
use super::{api_keys, validate};

/// Key management routes
///
/// ## API Key Management
/// - GET    /keys       - List API keys (masked)
/// - POST   /keys       - Create API key (plaintext returned once)
/// - PUT    /keys/{id}  - Rename API key
/// - DELETE /keys/{id}  - Delete API key
///
/// ## Validation
/// - POST /validate - Check a key and return its usage metadata
pub fn key_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/keys",
            get(api_keys::list_api_keys).post(api_keys::create_api_key),
        )
        .route(
            "/keys/{key_id}",
            put(api_keys::rename_api_key).delete(api_keys::delete_api_key),
        )
        .route("/validate", post(validate::validate_api_key))
}

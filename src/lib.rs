use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod utils;

pub use api::AppState;

/// Build the HTTP application: health probes plus the key routes.
///
/// CORS and compression are applied by the binary so tests exercise the bare
/// router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health::health_check))
        .route("/ping", get(api::health::ping))
        .merge(api::routes::key_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

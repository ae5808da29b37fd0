use std::sync::Arc;

use crate::db::{ApiKeyStore, KeyRepository};

pub mod api_keys;
pub mod error;
pub mod extract;
pub mod health;
pub mod routes;
pub mod validate;

pub use error::{ApiError, ErrorResponse};

// ============================================
// Application State
// ============================================

#[derive(Clone)]
pub struct AppState {
    pub keys: KeyRepository,
}

impl AppState {
    pub fn new(store: Arc<dyn ApiKeyStore>) -> Self {
        Self {
            keys: KeyRepository::new(store),
        }
    }
}

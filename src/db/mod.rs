pub mod memory;
pub mod postgres;
pub mod repository;
pub mod store;

pub use memory::InMemoryApiKeyStore;
pub use postgres::PgApiKeyStore;
pub use repository::KeyRepository;
pub use store::{ApiKeyStore, StoreError};

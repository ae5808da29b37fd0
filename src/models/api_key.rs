use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A row of the `api_keys` table.
///
/// The secret itself is never stored: `key_hash` is the SHA-256 digest used for
/// lookups and `key_hint` holds the trailing characters shown in listings.
/// `usage` and `usage_limit` are informational only; nothing meters or enforces
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiKeyRecord {
    pub id: Uuid,
    pub name: String,
    pub key_hash: String,
    pub key_hint: String,
    pub usage: i64,
    pub usage_limit: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values written by an insert; the store assigns `id` and timestamps.
#[derive(Debug, Clone)]
pub struct NewApiKey {
    pub name: String,
    pub key_hash: String,
    pub key_hint: String,
    pub usage_limit: i64,
}

/// Result of creating a key: the stored record plus the plaintext secret,
/// which exists only for the lifetime of this value.
#[derive(Debug, Clone)]
pub struct CreatedApiKey {
    pub record: ApiKeyRecord,
    pub key: String,
}

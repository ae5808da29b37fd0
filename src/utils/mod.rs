// Utility functions

use sha2::{Digest, Sha256};

/// Prefix carried by every generated API key.
pub const KEY_PREFIX: &str = "sk-";

/// Number of trailing key characters kept in clear for display.
pub const KEY_HINT_LEN: usize = 4;

const MASK_WIDTH: usize = 20;

/// Hash an API key for storage
pub fn hash_api_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generate a new API key: `sk-` followed by a hyphenated v4 UUID.
pub fn generate_api_key() -> String {
    format!("{}{}", KEY_PREFIX, uuid::Uuid::new_v4())
}

/// Last characters of a key, stored next to the hash so listings can show
/// which key is which without keeping the secret.
pub fn key_hint(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let start = chars.len().saturating_sub(KEY_HINT_LEN);
    chars[start..].iter().collect()
}

/// Display form of a key: `sk-********************abcd`.
pub fn mask_api_key(hint: &str) -> String {
    format!("{}{}{}", KEY_PREFIX, "*".repeat(MASK_WIDTH), hint)
}

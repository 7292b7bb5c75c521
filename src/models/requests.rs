//! Request DTOs for the read-through service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::cache::{MAX_BATCH_KEYS, MAX_KEY_LENGTH};

/// Request body for a batch lookup (POST /lookup)
#[derive(Debug, Clone, Deserialize)]
pub struct LookupRequest {
    /// Keys to resolve; order and duplicates are preserved in the response
    pub keys: Vec<String>,
}

impl LookupRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.keys.is_empty() {
            return Some("At least one key is required".to_string());
        }
        if self.keys.len() > MAX_BATCH_KEYS {
            return Some(format!(
                "Batch exceeds maximum of {} keys",
                MAX_BATCH_KEYS
            ));
        }
        self.keys.iter().find_map(|key| validate_key(key))
    }
}

/// Request body for writing a record to the origin (PUT /origin/:key)
#[derive(Debug, Clone, Deserialize)]
pub struct OriginPutRequest {
    pub value: String,
}

/// Checks a single key against the length limits.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

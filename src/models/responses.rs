//! Response DTOs for the read-through service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::{CacheStats, EntryExpiry};

/// Response body for a batch lookup (POST /lookup)
#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    /// Resolved values in request order; unresolved keys are omitted
    pub values: Vec<String>,
    /// Number of keys in the request
    pub requested: usize,
    /// Number of values returned
    pub resolved: usize,
}

impl LookupResponse {
    pub fn new(requested: usize, values: Vec<String>) -> Self {
        Self {
            resolved: values.len(),
            requested,
            values,
        }
    }
}

/// Response body for a single-key lookup (GET /lookup/:key)
#[derive(Debug, Clone, Serialize)]
pub struct ValueResponse {
    pub key: String,
    pub value: String,
}

impl ValueResponse {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for PUT /origin/:key
#[derive(Debug, Clone, Serialize)]
pub struct OriginPutResponse {
    pub message: String,
    pub key: String,
}

impl OriginPutResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Record '{}' written to origin", key),
            key,
        }
    }
}

/// One cached key with its expiry
#[derive(Debug, Clone, Serialize)]
pub struct KeyInfo {
    pub key: String,
    /// Expiry as RFC 3339; entries past it are still listed until refreshed
    pub expires_at: Option<String>,
    /// Milliseconds until the entry goes stale, `0` if it already is
    pub ttl_remaining_ms: u64,
}

impl From<EntryExpiry<String>> for KeyInfo {
    fn from(expiry: EntryExpiry<String>) -> Self {
        Self {
            key: expiry.key,
            expires_at: format_timestamp_ms(expiry.expire_at),
            ttl_remaining_ms: expiry.ttl_remaining_ms,
        }
    }
}

/// Response body for GET /keys
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    pub keys: Vec<KeyInfo>,
    pub total: usize,
}

impl KeysResponse {
    pub fn new(keys: Vec<KeyInfo>) -> Self {
        Self {
            total: keys.len(),
            keys,
        }
    }
}

/// Response body for DELETE /keys/:key
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for DELETE /keys
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    pub removed: usize,
}

impl ClearResponse {
    pub fn new(removed: usize) -> Self {
        Self {
            message: format!("Cleared {} entries", removed),
            removed,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Cache label
    pub name: String,
    /// Batch TTL in seconds
    pub ttl_seconds: u64,
    /// Requested keys served fresh
    pub hits: u64,
    /// Stale or missing keys sent to the origin
    pub misses: u64,
    /// Successful origin loads
    pub loads: u64,
    /// Failed origin loads
    pub load_failures: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(name: impl Into<String>, ttl_seconds: u64, stats: &CacheStats) -> Self {
        Self {
            name: name.into(),
            ttl_seconds,
            hits: stats.hits,
            misses: stats.misses,
            loads: stats.loads,
            load_failures: stats.load_failures,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

fn format_timestamp_ms(ms: u64) -> Option<String> {
    let ms = i64::try_from(ms).ok()?;
    DateTime::<Utc>::from_timestamp_millis(ms).map(|t| t.to_rfc3339())
}

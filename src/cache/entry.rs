//! Cache Entry Module
//!
//! Defines stored entries and the loader's result element.

use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// A cached value together with its absolute expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration timestamp (Unix milliseconds)
    pub expire_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    pub fn new(value: V, expire_at: u64) -> Self {
        Self { value, expire_at }
    }

    // == Is Stale ==
    /// Checks whether the entry must be refreshed at instant `now_ms`.
    ///
    /// Boundary condition: an entry whose expiry equals `now_ms` is stale, so a
    /// zero-second TTL always forces a refresh on the next lookup.
    pub fn is_stale(&self, now_ms: u64) -> bool {
        self.expire_at <= now_ms
    }

    // == Time To Live ==
    /// Returns remaining lifetime in milliseconds, `0` once stale.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expire_at.saturating_sub(now_ms)
    }
}

// == Entry Expiry ==
/// Expiry snapshot of one stored key, taken at a single instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryExpiry<K> {
    pub key: K,
    /// Expiration timestamp (Unix milliseconds)
    pub expire_at: u64,
    /// Milliseconds left at snapshot time, `0` once stale
    pub ttl_remaining_ms: u64,
}

// == Id Value ==
/// One record produced by a loader, addressed by its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdValue<K, V> {
    pub id: K,
    pub value: V,
}

impl<K, V> IdValue<K, V> {
    pub fn new(id: K, value: V) -> Self {
        Self { id, value }
    }
}

impl<K, V> From<(K, V)> for IdValue<K, V> {
    fn from((id, value): (K, V)) -> Self {
        Self { id, value }
    }
}

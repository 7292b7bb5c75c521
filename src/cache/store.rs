//! Cache Store Module
//!
//! Keyed storage of cache entries. Staleness is only evaluated when a batch is
//! partitioned; the maintenance operations never look at expiry.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::cache::{CacheEntry, CacheStats, EntryExpiry, IdValue};

// == Cache Store ==
/// In-memory map from key to entry plus lookup statistics.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
}

/// Result of splitting a requested key list against the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<K> {
    /// Requested slots (duplicates counted) backed by a fresh entry
    pub fresh_slots: usize,
    /// Distinct keys that are absent or expired, in first-seen order
    pub stale: Vec<K>,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
        }
    }

    // == Partition ==
    /// Splits `keys` into fresh slots and distinct stale-or-missing keys.
    pub fn partition(&self, keys: &[K], now_ms: u64) -> Partition<K> {
        let mut seen = HashSet::new();
        let mut stale = Vec::new();
        let mut fresh_slots = 0;

        for key in keys {
            match self.entries.get(key) {
                Some(entry) if !entry.is_stale(now_ms) => fresh_slots += 1,
                _ => {
                    if seen.insert(key) {
                        stale.push(key.clone());
                    }
                }
            }
        }

        Partition { fresh_slots, stale }
    }

    // == Upsert Batch ==
    /// Writes every loaded item with the batch's shared expiry.
    pub fn upsert_batch(&mut self, items: Vec<IdValue<K, V>>, expire_at: u64) {
        for item in items {
            self.entries
                .insert(item.id, CacheEntry::new(item.value, expire_at));
        }
        self.stats.set_total_entries(self.entries.len());
    }

    // == Project ==
    /// Values for `keys` in request order; keys without an entry are skipped.
    pub fn project(&self, keys: &[K]) -> Vec<V> {
        keys.iter()
            .filter_map(|key| self.entries.get(key).map(|entry| entry.value.clone()))
            .collect()
    }

    // == Entry ==
    pub fn entry(&self, key: &K) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    // == Contains ==
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    // == Remove ==
    /// Removes an entry by key, returning whether one was present.
    pub fn remove(&mut self, key: &K) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Clear ==
    /// Removes every entry, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.stats.set_total_entries(0);
        count
    }

    // == Keys ==
    /// Owned snapshot of every stored key, fresh or stale.
    pub fn keys(&self) -> Vec<K> {
        self.entries.keys().cloned().collect()
    }

    // == Expiries ==
    /// Expiry of every stored key, fresh or stale, relative to `now_ms`.
    pub fn expiries(&self, now_ms: u64) -> Vec<EntryExpiry<K>> {
        self.entries
            .iter()
            .map(|(key, entry)| EntryExpiry {
                key: key.clone(),
                expire_at: entry.expire_at,
                ttl_remaining_ms: entry.ttl_remaining_ms(now_ms),
            })
            .collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn stats_mut(&mut self) -> &mut CacheStats {
        &mut self.stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

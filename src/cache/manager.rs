//! Cache Manager Module
//!
//! Read-through batch cache. `get_all` refreshes only the stale-or-missing keys
//! of a request with a single loader call; `get` and `get_single` are thin
//! wrappers around it.
//!
//! The store lock is taken for the stale check and again for the write-back,
//! never across the loader. Overlapping calls that see the same stale key will
//! each load it and the last write wins.

use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore, Clock, EntryExpiry, IdValue, SystemClock};

// == Cache Manager ==
/// A named, TTL-based read-through cache.
///
/// Cloning is cheap and every clone shares the same store.
#[derive(Debug)]
pub struct CacheManager<K, V, C = SystemClock> {
    name: Arc<str>,
    ttl_seconds: u64,
    store: Arc<RwLock<CacheStore<K, V>>>,
    clock: C,
}

impl<K, V, C: Clone> Clone for CacheManager<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            ttl_seconds: self.ttl_seconds,
            store: Arc::clone(&self.store),
            clock: self.clock.clone(),
        }
    }
}

impl<K, V> CacheManager<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a cache reading time from the system clock.
    ///
    /// # Arguments
    /// * `name` - Label used in log output
    /// * `ttl_seconds` - Lifetime applied to every refreshed batch
    pub fn new(name: impl Into<String>, ttl_seconds: u64) -> Self {
        Self::with_clock(name, ttl_seconds, SystemClock)
    }
}

impl<K, V, C> CacheManager<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    /// Creates a cache with an explicit time source.
    pub fn with_clock(name: impl Into<String>, ttl_seconds: u64, clock: C) -> Self {
        let name: String = name.into();
        Self {
            name: Arc::from(name),
            ttl_seconds,
            store: Arc::new(RwLock::new(CacheStore::new())),
            clock,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    // == Get All ==
    /// Returns the cached values for `keys`, loading stale or missing ones first.
    ///
    /// The loader is invoked at most once, with each stale-or-missing key exactly
    /// once, and is skipped entirely when everything requested is fresh. All
    /// items it returns share one expiry of `now + ttl`, where `now` is taken
    /// before the loader runs. Items for ids that were not requested are stored
    /// as well.
    ///
    /// The result follows the order of `keys`, duplicates included. Keys that
    /// have no entry after the refresh are left out, so the result can be
    /// shorter than the request.
    ///
    /// # Errors
    /// A loader error is returned as is and nothing from that batch is written.
    pub async fn get_all<F, Fut, E>(&self, keys: &[K], loader: F) -> Result<Vec<V>, E>
    where
        F: FnOnce(Vec<K>) -> Fut,
        Fut: Future<Output = Result<Vec<IdValue<K, V>>, E>>,
    {
        let now = self.clock.now_ms();

        let (stale, stored) = {
            let mut store = self.store.write().await;
            let partition = store.partition(keys, now);
            store
                .stats_mut()
                .record_lookup(partition.fresh_slots, partition.stale.len());

            if partition.stale.is_empty() {
                return Ok(store.project(keys));
            }
            (partition.stale, store.len())
        };

        debug!(
            cache = %self.name,
            stale = stale.len(),
            requested = keys.len(),
            stored,
            "refreshing stale keys"
        );

        let loaded = match loader(stale).await {
            Ok(loaded) => loaded,
            Err(err) => {
                self.store.write().await.stats_mut().record_load_failure();
                warn!(cache = %self.name, "loader failed, keeping previous entries");
                return Err(err);
            }
        };

        let expire_at = now.saturating_add(self.ttl_seconds.saturating_mul(1000));

        let mut store = self.store.write().await;
        store.upsert_batch(loaded, expire_at);
        store.stats_mut().record_load();
        Ok(store.project(keys))
    }

    // == Get ==
    /// Single-key form of [`get_all`](Self::get_all) with a batch loader.
    pub async fn get<F, Fut, E>(&self, key: &K, loader: F) -> Result<Option<V>, E>
    where
        F: FnOnce(Vec<K>) -> Fut,
        Fut: Future<Output = Result<Vec<IdValue<K, V>>, E>>,
    {
        let values = self.get_all(std::slice::from_ref(key), loader).await?;
        Ok(values.into_iter().next())
    }

    // == Get Single ==
    /// Like [`get`](Self::get), for loaders that fetch one key per call.
    ///
    /// Stale keys are loaded one after another; the first error stops the batch.
    pub async fn get_single<F, Fut, E>(&self, key: &K, mut loader: F) -> Result<Option<V>, E>
    where
        F: FnMut(K) -> Fut,
        Fut: Future<Output = Result<IdValue<K, V>, E>>,
    {
        let batch_loader = move |stale: Vec<K>| async move {
            let mut loaded = Vec::with_capacity(stale.len());
            for key in stale {
                loaded.push(loader(key).await?);
            }
            Ok::<_, E>(loaded)
        };

        let values = self
            .get_all(std::slice::from_ref(key), batch_loader)
            .await?;
        Ok(values.into_iter().next())
    }

    // == Maintenance ==
    /// Whether `key` has an entry, fresh or stale.
    pub async fn has(&self, key: &K) -> bool {
        self.store.read().await.contains(key)
    }

    /// Removes `key`, returning whether it was present.
    pub async fn delete(&self, key: &K) -> bool {
        self.store.write().await.remove(key)
    }

    /// Removes every entry, returning how many were dropped.
    pub async fn clear(&self) -> usize {
        let removed = self.store.write().await.clear();
        debug!(cache = %self.name, removed, "cache cleared");
        removed
    }

    /// Snapshot of all stored keys, fresh or stale, in no particular order.
    pub async fn keys(&self) -> Vec<K> {
        self.store.read().await.keys()
    }

    /// Number of stored entries, fresh or stale.
    pub async fn size(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Expiry of the entry for `key` in Unix milliseconds.
    pub async fn expires_at(&self, key: &K) -> Option<u64> {
        self.store.read().await.entry(key).map(|entry| entry.expire_at)
    }

    /// Expiry of every stored key, fresh or stale, read under one lock.
    pub async fn expiries(&self) -> Vec<EntryExpiry<K>> {
        let now = self.clock.now_ms();
        self.store.read().await.expiries(now)
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }
}

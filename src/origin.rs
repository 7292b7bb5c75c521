//! Record Source Module
//!
//! In-memory stand-in for the database or upstream service the cache fronts.
//! It exposes both loader shapes the cache understands: a batch fetch and a
//! single-key fetch.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::IdValue;
use crate::error::{CacheError, Result};

// == Record Source ==
/// Shared, cloneable record store with optional simulated latency.
#[derive(Debug, Clone, Default)]
pub struct RecordSource {
    records: Arc<RwLock<HashMap<String, String>>>,
    latency: Duration,
    fetches: Arc<AtomicU64>,
    fail_next: Arc<AtomicBool>,
}

impl RecordSource {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    // == Put ==
    /// Writes a record. Cached copies are not touched and stay until they expire.
    pub async fn put(&self, key: impl Into<String>, value: impl Into<String>) {
        self.records.write().await.insert(key.into(), value.into());
    }

    // == Fetch Many ==
    /// Batch loader: returns the records that exist, skipping unknown keys.
    pub async fn fetch_many(&self, keys: Vec<String>) -> Result<Vec<IdValue<String, String>>> {
        self.begin_fetch().await?;

        let records = self.records.read().await;
        let found: Vec<_> = keys
            .into_iter()
            .filter_map(|key| {
                let value = records.get(&key)?.clone();
                Some(IdValue::new(key, value))
            })
            .collect();

        debug!("origin batch fetch returned {} records", found.len());
        Ok(found)
    }

    // == Fetch One ==
    /// Single-key loader: unknown keys are an error.
    pub async fn fetch_one(&self, key: String) -> Result<IdValue<String, String>> {
        self.begin_fetch().await?;

        let value = self
            .records
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or_else(|| CacheError::NotFound(key.clone()))?;
        Ok(IdValue::new(key, value))
    }

    /// Makes the next fetch, batch or single, fail with `Upstream`.
    pub fn fail_next_fetch(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Number of fetch calls served so far, batch or single.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }

    async fn begin_fetch(&self) -> Result<()> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.fail_next.swap(false, Ordering::SeqCst) {
            warn!("origin fetch failed");
            return Err(CacheError::Upstream("origin unavailable".to_string()));
        }
        Ok(())
    }
}

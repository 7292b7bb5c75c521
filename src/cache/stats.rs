//! Cache Statistics Module
//!
//! Tracks lookup and loader metrics for the batch cache.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Requested key slots served from a fresh entry
    pub hits: u64,
    /// Distinct stale-or-missing keys handed to a loader
    pub misses: u64,
    /// Loader invocations that completed successfully
    pub loads: u64,
    /// Loader invocations that returned an error
    pub load_failures: u64,
    /// Current number of entries in the cache, fresh or stale
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Lookup ==
    /// Records the outcome of one batch partition.
    pub fn record_lookup(&mut self, hits: usize, misses: usize) {
        self.hits += hits as u64;
        self.misses += misses as u64;
    }

    // == Record Load ==
    pub fn record_load(&mut self) {
        self.loads += 1;
    }

    // == Record Load Failure ==
    pub fn record_load_failure(&mut self) {
        self.load_failures += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

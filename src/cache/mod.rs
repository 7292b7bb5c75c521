//! Cache Module
//!
//! Read-through batch caching with TTL expiry evaluated at access time.

mod clock;
mod entry;
mod manager;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, EntryExpiry, IdValue};
pub use manager::CacheManager;
pub use stats::CacheStats;
pub use store::{CacheStore, Partition};

// == Public Constants ==
/// Maximum allowed key length in bytes for keys accepted over HTTP
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum number of keys in one HTTP batch lookup
pub const MAX_BATCH_KEYS: usize = 1000;

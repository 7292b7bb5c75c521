//! Batch Cache - a read-through TTL cache with batched refresh
//!
//! `CacheManager` resolves many keys at once, loading only the stale or
//! missing ones through a caller-supplied loader. The `api` module wraps it in
//! a small HTTP service backed by an in-memory origin.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod origin;

pub use api::AppState;
pub use cache::{CacheManager, IdValue};
pub use config::Config;

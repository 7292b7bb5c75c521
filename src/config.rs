//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Label of the cache instance, used in logs and stats
    pub cache_name: String,
    /// Lifetime in seconds applied to every refreshed batch
    pub ttl_seconds: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Simulated latency of the origin in milliseconds
    pub origin_latency_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_NAME` - Cache label (default: records)
    /// - `CACHE_TTL_SECONDS` - Batch TTL in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `ORIGIN_LATENCY_MS` - Origin response delay (default: 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_name: env::var("CACHE_NAME")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.cache_name),
            ttl_seconds: parse_var("CACHE_TTL_SECONDS").unwrap_or(defaults.ttl_seconds),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            origin_latency_ms: parse_var("ORIGIN_LATENCY_MS")
                .unwrap_or(defaults.origin_latency_ms),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_name: "records".to_string(),
            ttl_seconds: 60,
            server_port: 3000,
            origin_latency_ms: 0,
        }
    }
}

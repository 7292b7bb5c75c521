//! API Handlers
//!
//! HTTP request handlers for each endpoint. Lookups go through the batch cache
//! with the origin as loader; maintenance endpoints act on the cache directly.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::CacheManager;
use crate::error::{CacheError, Result};
use crate::models::{
    requests::validate_key, ClearResponse, DeleteResponse, HealthResponse, KeyInfo, KeysResponse,
    LookupRequest, LookupResponse, OriginPutRequest, OriginPutResponse, StatsResponse,
    ValueResponse,
};
use crate::origin::RecordSource;

/// Application state shared across all handlers.
///
/// Both fields are cheap to clone and share their storage.
#[derive(Clone)]
pub struct AppState {
    /// Read-through cache in front of the origin
    pub cache: CacheManager<String, String>,
    /// Backing record source
    pub origin: RecordSource,
}

impl AppState {
    /// Creates a new AppState with the given cache and origin.
    pub fn new(cache: CacheManager<String, String>, origin: RecordSource) -> Self {
        Self { cache, origin }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        let cache = CacheManager::new(config.cache_name.clone(), config.ttl_seconds);
        let origin = RecordSource::new(Duration::from_millis(config.origin_latency_ms));
        Self::new(cache, origin)
    }
}

/// Handler for POST /lookup
///
/// Resolves a batch of keys, loading only stale or missing ones from the origin.
pub async fn lookup_handler(
    State(state): State<AppState>,
    Json(req): Json<LookupRequest>,
) -> Result<Json<LookupResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let origin = state.origin.clone();
    let values = state
        .cache
        .get_all(&req.keys, |stale| async move { origin.fetch_many(stale).await })
        .await?;

    Ok(Json(LookupResponse::new(req.keys.len(), values)))
}

/// Handler for GET /lookup/:key
///
/// Resolves one key through the origin's single-record fetch.
pub async fn lookup_one_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ValueResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let origin = state.origin.clone();
    let value = state
        .cache
        .get_single(&key, |k| {
            let origin = origin.clone();
            async move { origin.fetch_one(k).await }
        })
        .await?
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(ValueResponse::new(key, value)))
}

/// Handler for PUT /origin/:key
///
/// Writes a record to the origin. The cache picks it up on its next refresh.
pub async fn origin_put_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<OriginPutRequest>,
) -> Result<Json<OriginPutResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state.origin.put(key.clone(), req.value).await;
    Ok(Json(OriginPutResponse::new(key)))
}

/// Handler for GET /keys
///
/// Lists every cached key, fresh or stale, sorted by key.
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    let mut infos: Vec<KeyInfo> = state
        .cache
        .expiries()
        .await
        .into_iter()
        .map(KeyInfo::from)
        .collect();
    infos.sort_by(|a, b| a.key.cmp(&b.key));

    Json(KeysResponse::new(infos))
}

/// Handler for DELETE /keys/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if !state.cache.delete(&key).await {
        return Err(CacheError::NotFound(key));
    }

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for DELETE /keys
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let removed = state.cache.clear().await;
    info!("Cache '{}' cleared, {} entries removed", state.cache.name(), removed);
    Json(ClearResponse::new(removed))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;

    Json(StatsResponse::new(
        state.cache.name(),
        state.cache.ttl_seconds(),
        &stats,
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

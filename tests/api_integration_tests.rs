//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use batch_cache::{api::create_router, origin::RecordSource, AppState, CacheManager};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

async fn create_test_state(ttl_seconds: u64) -> AppState {
    let state = AppState::new(
        CacheManager::new("integration", ttl_seconds),
        RecordSource::default(),
    );
    state.origin.put("key1", "abc").await;
    state.origin.put("key3", "xyz").await;
    state
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

fn lookup_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/lookup")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn origin_put_request(key: &str, value: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(format!("/origin/{}", key))
        .header("content-type", "application/json")
        .body(Body::from(format!(r#"{{"value":"{}"}}"#, value)))
        .unwrap()
}

// == Lookup Endpoint Tests ==

#[tokio::test]
async fn test_lookup_partial_result() {
    let state = create_test_state(60).await;
    let app = create_router(state.clone());

    let (status, json) = send(&app, lookup_request(r#"{"keys":["key1","key2"]}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["values"], serde_json::json!(["abc"]));
    assert_eq!(json["requested"], 2);
    assert_eq!(json["resolved"], 1);
    assert!(state.cache.has(&"key1".to_string()).await);
    assert!(!state.cache.has(&"key2".to_string()).await);
    assert_eq!(state.cache.size().await, 1);
}

#[tokio::test]
async fn test_lookup_preserves_order_and_duplicates() {
    let app = create_router(create_test_state(60).await);

    let (status, json) = send(
        &app,
        lookup_request(r#"{"keys":["key3","key1","missing","key3"]}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["values"], serde_json::json!(["xyz", "abc", "xyz"]));
}

#[tokio::test]
async fn test_lookup_serves_cached_value_until_expiry() {
    let state = create_test_state(60).await;
    let app = create_router(state.clone());

    send(&app, lookup_request(r#"{"keys":["key1"]}"#)).await;
    let (status, _) = send(&app, origin_put_request("key1", "updated")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = send(&app, lookup_request(r#"{"keys":["key1"]}"#)).await;
    assert_eq!(json["values"], serde_json::json!(["abc"]));
    assert_eq!(state.origin.fetch_count(), 1);
}

#[tokio::test]
async fn test_lookup_zero_ttl_always_refreshes() {
    let state = create_test_state(0).await;
    let app = create_router(state.clone());

    send(&app, lookup_request(r#"{"keys":["key1"]}"#)).await;
    send(&app, origin_put_request("key1", "updated")).await;

    let (_, json) = send(&app, lookup_request(r#"{"keys":["key1"]}"#)).await;
    assert_eq!(json["values"], serde_json::json!(["updated"]));
    assert_eq!(state.origin.fetch_count(), 2);
}

#[tokio::test]
async fn test_lookup_origin_failure_keeps_store() {
    let state = create_test_state(0).await;
    let app = create_router(state.clone());
    send(&app, lookup_request(r#"{"keys":["key1"]}"#)).await;
    let expiry_before = state.cache.expires_at(&"key1".to_string()).await;

    state.origin.fail_next_fetch();
    let (status, json) = send(&app, lookup_request(r#"{"keys":["key1","key3"]}"#)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"].as_str().unwrap().contains("origin unavailable"));
    assert_eq!(state.cache.size().await, 1);
    assert!(!state.cache.has(&"key3".to_string()).await);
    assert_eq!(state.cache.expires_at(&"key1".to_string()).await, expiry_before);
    assert_eq!(state.cache.stats().await.load_failures, 1);

    // The stale key is retried once the origin recovers.
    let (status, json) = send(&app, lookup_request(r#"{"keys":["key1","key3"]}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["values"], serde_json::json!(["abc", "xyz"]));
}

#[tokio::test]
async fn test_lookup_empty_batch_rejected() {
    let app = create_router(create_test_state(60).await);

    let (status, json) = send(&app, lookup_request(r#"{"keys":[]}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("At least one key"));
}

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_router(create_test_state(60).await);

    let response = app
        .oneshot(lookup_request(r#"{"keys": "not-a-list"}"#))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// == Single Lookup Endpoint Tests ==

#[tokio::test]
async fn test_lookup_one_success() {
    let app = create_router(create_test_state(60).await);

    let (status, json) = send(&app, get_request("/lookup/key3")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "key3");
    assert_eq!(json["value"], "xyz");
}

#[tokio::test]
async fn test_lookup_one_not_found() {
    let state = create_test_state(60).await;
    let app = create_router(state.clone());

    let (status, json) = send(&app, get_request("/lookup/missing")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("missing"));
    assert_eq!(state.cache.stats().await.load_failures, 1);
}

// == Key Maintenance Tests ==

#[tokio::test]
async fn test_keys_listing() {
    let app = create_router(create_test_state(60).await);
    send(&app, lookup_request(r#"{"keys":["key3","key1"]}"#)).await;

    let (status, json) = send(&app, get_request("/keys")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 2);
    assert_eq!(json["keys"][0]["key"], "key1");
    assert_eq!(json["keys"][1]["key"], "key3");
    assert_eq!(json["keys"][0]["expires_at"], json["keys"][1]["expires_at"]);
    let remaining = json["keys"][0]["ttl_remaining_ms"].as_u64().unwrap();
    assert!(remaining > 0 && remaining <= 60_000);
}

#[tokio::test]
async fn test_delete_key() {
    let state = create_test_state(60).await;
    let app = create_router(state.clone());
    send(&app, lookup_request(r#"{"keys":["key1"]}"#)).await;

    let (status, json) = send(&app, delete_request("/keys/key1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "key1");
    assert!(!state.cache.has(&"key1".to_string()).await);

    let (status, _) = send(&app, delete_request("/keys/key1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clear_resets_cache() {
    let state = create_test_state(60).await;
    let app = create_router(state.clone());
    send(&app, lookup_request(r#"{"keys":["key1","key3"]}"#)).await;

    let (status, json) = send(&app, delete_request("/keys")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], 2);
    assert_eq!(state.cache.size().await, 0);
}

// == Stats and Health Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_router(create_test_state(60).await);
    send(&app, lookup_request(r#"{"keys":["key1","key3"]}"#)).await;
    send(&app, lookup_request(r#"{"keys":["key1","key3"]}"#)).await;

    let (status, json) = send(&app, get_request("/stats")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "integration");
    assert_eq!(json["hits"], 2);
    assert_eq!(json["misses"], 2);
    assert_eq!(json["loads"], 1);
    assert_eq!(json["total_entries"], 2);
    assert_eq!(json["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(create_test_state(60).await);

    let (status, json) = send(&app, get_request("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

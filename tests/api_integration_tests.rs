//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle for each endpoint, including the
//! three-way read routing and the cache-status metadata it reports.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cachelab::{
    api::create_router,
    cache::{LruCache, TtlCache},
    source::SourceStore,
    AppState,
};
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app_with(ttl_capacity: usize, lru_capacity: usize, default_ttl: u64) -> Router {
    let mut source = SourceStore::new(0);
    source.put("report:daily", "all clear");
    source.put("report:weekly", "watch the queue");
    source.put("profile:alice", "alice");
    let state = AppState::new(
        TtlCache::new(ttl_capacity, default_ttl),
        LruCache::new(lru_capacity, default_ttl),
        source,
    );
    create_router(state)
}

fn create_test_app() -> Router {
    create_test_app_with(100, 100, 300)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn send(app: &Router, method: &str, uri: &str, body: Body) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == Read Endpoint Tests ==

#[tokio::test]
async fn test_direct_read_bypasses_cache() {
    let app = create_test_app();

    let (status, json) = get(&app, "/read/direct/report:daily").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"], "all clear");
    assert_eq!(json["strategy"], "direct");
    assert_eq!(json["cache"], "bypass");
    assert!(json.get("entry").is_none());
}

#[tokio::test]
async fn test_ttl_read_miss_then_hit() {
    let app = create_test_app();

    let (status, first) = get(&app, "/read/ttl/report:daily").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["cache"], "miss");

    let (status, second) = get(&app, "/read/ttl/report:daily").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["cache"], "hit");
    assert_eq!(second["value"], "all clear");

    // Hits carry the entry bookkeeping
    let entry = &second["entry"];
    assert_eq!(entry["access_count"], 1);
    assert!(entry["expires_at"].as_u64().unwrap() > entry["cached_at"].as_u64().unwrap());
}

#[tokio::test]
async fn test_lru_eviction_through_api() {
    // Capacity-2 LRU: read a, b, re-read a, read c => b evicted
    let app = create_test_app_with(100, 2, 300);

    get(&app, "/read/lru/report:daily").await;
    get(&app, "/read/lru/report:weekly").await;
    get(&app, "/read/lru/report:daily").await; // protects report:daily
    get(&app, "/read/lru/profile:alice").await; // evicts report:weekly

    let (_, daily) = get(&app, "/read/lru/report:daily").await;
    assert_eq!(daily["cache"], "hit");

    let (_, weekly) = get(&app, "/read/lru/report:weekly").await;
    assert_eq!(weekly["cache"], "miss", "evicted key should miss");
}

#[tokio::test]
async fn test_ttl_expiry_through_api() {
    // Engine default TTL of 1 second
    let app = create_test_app_with(100, 100, 1);

    let (_, first) = get(&app, "/read/ttl/report:daily").await;
    assert_eq!(first["cache"], "miss");
    let (_, second) = get(&app, "/read/ttl/report:daily").await;
    assert_eq!(second["cache"], "hit");

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let (_, third) = get(&app, "/read/ttl/report:daily").await;
    assert_eq!(third["cache"], "miss", "expired entry should miss");
}

#[tokio::test]
async fn test_read_unknown_strategy() {
    let app = create_test_app();

    let (status, json) = get(&app, "/read/fifo/report:daily").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("fifo"));
}

#[tokio::test]
async fn test_read_missing_key_not_found() {
    let app = create_test_app();

    let (status, json) = get(&app, "/read/ttl/nonexistent").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json.get("error").is_some());
}

// == Source Seeding Tests ==

#[tokio::test]
async fn test_seed_endpoint_success() {
    let app = create_test_app();

    let (status, json) = send(
        &app,
        "PUT",
        "/source",
        Body::from(r#"{"key":"report:new","value":"fresh"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains("report:new"));

    let (_, read) = get(&app, "/read/direct/report:new").await;
    assert_eq!(read["value"], "fresh");
}

#[tokio::test]
async fn test_seed_endpoint_rejects_empty_key() {
    let app = create_test_app();

    let (status, json) = send(
        &app,
        "PUT",
        "/source",
        Body::from(r#"{"key":"","value":"x"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_stale_read_after_source_update() {
    let app = create_test_app();

    // Populate the TTL cache, then change the source record
    get(&app, "/read/ttl/report:daily").await;
    send(
        &app,
        "PUT",
        "/source",
        Body::from(r#"{"key":"report:daily","value":"updated"}"#),
    )
    .await;

    // Cached strategy still serves the stale value; direct sees the update
    let (_, cached) = get(&app, "/read/ttl/report:daily").await;
    assert_eq!(cached["value"], "all clear");
    let (_, direct) = get(&app, "/read/direct/report:daily").await;
    assert_eq!(direct["value"], "updated");
}

// == Invalidate / Clear Tests ==

#[tokio::test]
async fn test_invalidate_endpoint() {
    let app = create_test_app();

    get(&app, "/read/ttl/report:daily").await;

    let (status, json) = send(
        &app,
        "DELETE",
        "/cache/ttl/report:daily",
        Body::empty(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], true);

    let (_, read) = get(&app, "/read/ttl/report:daily").await;
    assert_eq!(read["cache"], "miss");
}

#[tokio::test]
async fn test_invalidate_absent_key_reports_not_removed() {
    let app = create_test_app();

    let (status, json) = send(&app, "DELETE", "/cache/lru/never_cached", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], false);
}

#[tokio::test]
async fn test_invalidate_direct_strategy_rejected() {
    let app = create_test_app();

    let (status, _) = send(&app, "DELETE", "/cache/direct/key", Body::empty()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_clear_preserves_hit_miss_counters() {
    let app = create_test_app();

    get(&app, "/read/lru/report:daily").await; // miss
    get(&app, "/read/lru/report:daily").await; // hit

    let (status, _) = send(&app, "POST", "/cache/lru/clear", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);

    let (_, metrics) = get(&app, "/metrics").await;
    assert_eq!(metrics["lru"]["size"], 0);
    assert_eq!(metrics["lru"]["hits"], 1);
    assert_eq!(metrics["lru"]["misses"], 1);
}

// == Metrics Tests ==

#[tokio::test]
async fn test_metrics_endpoint_shape() {
    let app = create_test_app();

    get(&app, "/read/ttl/report:daily").await; // ttl miss
    get(&app, "/read/ttl/report:daily").await; // ttl hit
    get(&app, "/read/direct/report:weekly").await; // bypass

    let (status, json) = get(&app, "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ttl"]["hits"], 1);
    assert_eq!(json["ttl"]["misses"], 1);
    assert_eq!(json["ttl"]["hit_rate"], 50.0);
    assert_eq!(json["ttl"]["size"], 1);
    assert!(json["ttl"]["memory_usage"].as_u64().unwrap() > 0);
    assert_eq!(json["lru"]["hits"], 0);
    // One source query per ttl miss plus one per direct read
    assert_eq!(json["source_fetches"], 2);
}

#[tokio::test]
async fn test_metrics_reset_endpoint() {
    let app = create_test_app();

    get(&app, "/read/ttl/report:daily").await;

    let (status, _) = send(&app, "POST", "/metrics/reset", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);

    let (_, metrics) = get(&app, "/metrics").await;
    assert_eq!(metrics["ttl"]["hits"], 0);
    assert_eq!(metrics["ttl"]["misses"], 0);
    // Entries survive a counter reset
    assert_eq!(metrics["ttl"]["size"], 1);
}

// == Health Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, json) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

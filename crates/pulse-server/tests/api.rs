//! Integration tests driving the router end to end with in-process stores.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pulse_core::{
    parse_timestamp, HistoryLimit, RandomResult, ResultStore, SequenceRandom, StoreError,
};
use pulse_server::db::SqliteStore;
use pulse_server::{build_router, ServerState, FETCH_FAILED, SAVE_FAILED, SERVICE_NAME};
use serde_json::Value;
use tower::ServiceExt;

/// Store that fails every call, standing in for an unreachable database.
struct UnreachableStore;

impl ResultStore for UnreachableStore {
    fn create_random_result(&self, _value: f64) -> Result<RandomResult, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    fn list_recent(&self, _limit: HistoryLimit) -> Result<Vec<RandomResult>, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }
}

fn create_test_app(values: Vec<f64>) -> (Router, Arc<SqliteStore>) {
    let store = Arc::new(SqliteStore::in_memory().unwrap());
    let state = Arc::new(ServerState::new(
        store.clone(),
        Arc::new(SequenceRandom::new(values)),
    ));
    (build_router(state), store)
}

fn create_failing_app() -> Router {
    let state = Arc::new(ServerState::new(
        Arc::new(UnreachableStore),
        Arc::new(SequenceRandom::new(vec![0.5])),
    ));
    build_router(state)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ids(body: &Value) -> Vec<i64> {
    body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn health_reports_ok_with_timestamp() {
    let (app, _) = create_test_app(vec![0.5]);

    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(parse_timestamp(timestamp).is_ok());
    assert!(timestamp.ends_with('Z'));
}

#[tokio::test]
async fn info_is_static() {
    let (app, _) = create_test_app(vec![0.5]);

    let (status, first) = get(&app, "/info").await;
    let (_, second) = get(&app, "/info").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(first["service"], SERVICE_NAME);
    assert_eq!(first["version"], env!("CARGO_PKG_VERSION"));
    assert!(first["docs"].as_str().unwrap().starts_with("https://"));
}

#[tokio::test]
async fn test_endpoint_persists_rounded_value() {
    let (app, store) = create_test_app(vec![0.123_456_789]);

    let (status, body) = get(&app, "/test").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Test endpoint reached");
    assert_eq!(body["random"], 0.123_457);
    assert_eq!(store.count().unwrap(), 1);

    let stored = store.list_recent(HistoryLimit::default()).unwrap();
    assert_eq!(stored[0].id, body["id"].as_i64().unwrap());
    assert_eq!(stored[0].value, body["random"].as_f64().unwrap());
    assert_eq!(
        parse_timestamp(body["createdAt"].as_str().unwrap()).unwrap(),
        stored[0].created_at
    );
}

#[tokio::test]
async fn each_test_call_adds_exactly_one_row() {
    let (app, store) = create_test_app(vec![0.1, 0.2, 0.3]);

    for expected in 1..=3 {
        let (status, _) = get(&app, "/test").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(store.count().unwrap(), expected);
    }
}

#[tokio::test]
async fn history_returns_most_recent_first() {
    let (app, _) = create_test_app(vec![0.1, 0.2, 0.3, 0.4, 0.5]);
    let mut created = Vec::new();
    for _ in 0..5 {
        let (_, body) = get(&app, "/test").await;
        created.push(body["id"].as_i64().unwrap());
    }

    let (status, body) = get(&app, "/history?limit=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    let expected: Vec<i64> = created.iter().rev().take(3).copied().collect();
    assert_eq!(ids(&body), expected);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results[0]["value"], 0.5);
    let times: Vec<_> = results
        .iter()
        .map(|r| parse_timestamp(r["createdAt"].as_str().unwrap()).unwrap())
        .collect();
    assert!(times.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn history_defaults_to_ten() {
    let (app, store) = create_test_app(vec![]);
    for _ in 0..15 {
        store.create_random_result(0.5).unwrap();
    }

    let (_, absent) = get(&app, "/history").await;
    let (_, garbage) = get(&app, "/history?limit=abc").await;

    assert_eq!(absent["count"], 10);
    assert_eq!(garbage["count"], 10);
}

#[tokio::test]
async fn history_normalizes_malformed_query_strings() {
    let (app, store) = create_test_app(vec![]);
    for _ in 0..15 {
        store.create_random_result(0.5).unwrap();
    }

    for uri in [
        "/history?limit=2&limit=3",
        "/history?limit=",
        "/history?limit=%FF",
        "/history?limit[]=3",
        "/history?limit=1e400",
        "/history?limit",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["count"], 10, "{uri}");
    }

    let (_, body) = get(&app, "/history?other=1&limit=4").await;
    assert_eq!(body["count"], 4);
}

#[tokio::test]
async fn history_clamps_out_of_range_limits() {
    let (app, store) = create_test_app(vec![]);
    for _ in 0..60 {
        store.create_random_result(0.5).unwrap();
    }

    let (_, high) = get(&app, "/history?limit=999").await;
    let (_, low) = get(&app, "/history?limit=0").await;
    let (_, negative) = get(&app, "/history?limit=-20").await;

    assert_eq!(high["count"], 50);
    assert_eq!(ids(&high).first(), Some(&60));
    assert_eq!(low["count"], 1);
    assert_eq!(negative["count"], 1);
}

#[tokio::test]
async fn history_returns_fewer_rows_when_store_is_small() {
    let (app, store) = create_test_app(vec![]);
    store.create_random_result(0.25).unwrap();

    let (status, body) = get(&app, "/history?limit=50").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["value"], 0.25);
}

#[tokio::test]
async fn history_on_empty_store_is_empty() {
    let (app, _) = create_test_app(vec![]);

    let (status, body) = get(&app, "/history").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["results"], Value::Array(vec![]));
}

#[tokio::test]
async fn unreachable_store_fails_test_with_fixed_message() {
    let app = create_failing_app();

    let (status, body) = get(&app, "/test").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({ "error": SAVE_FAILED }));
    assert_eq!(SAVE_FAILED, "Unable to save random value");
}

#[tokio::test]
async fn unreachable_store_fails_history_with_fixed_message() {
    let app = create_failing_app();

    let (status, body) = get(&app, "/history?limit=5").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({ "error": FETCH_FAILED }));
    assert_eq!(FETCH_FAILED, "Unable to fetch history");
}

#[tokio::test]
async fn pure_routes_survive_store_outage() {
    let app = create_failing_app();

    let (health, _) = get(&app, "/health").await;
    let (info, _) = get(&app, "/info").await;

    assert_eq!(health, StatusCode::OK);
    assert_eq!(info, StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let (app, _) = create_test_app(vec![]);

    let (status, body) = get(&app, "/unknown/path").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("/unknown/path"));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let (app, _) = create_test_app(vec![]);

    let request = Request::builder()
        .uri("/info")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn cors_preflight_lists_methods_and_headers() {
    let (app, _) = create_test_app(vec![]);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/test")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let methods = response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap()
        .to_string();
    for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(methods.contains(method), "missing {method} in {methods}");
    }
    let headers = response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_lowercase();
    assert!(headers.contains("content-type"));
    assert!(headers.contains("authorization"));
}

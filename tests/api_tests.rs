//! HTTP surface tests

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use airsense_anomaly::features::{layout_hash, FEATURE_COUNT};
use airsense_anomaly::{create_router, AppState};

use common::{sample_payload, Harness};

fn app(harness: &Harness) -> Router {
    create_router(AppState::new(harness.pipeline()))
}

fn post(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_reports_layout() {
    let harness = Harness::new(Some(0.1));
    let response = app(&harness)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["feature_layout"]["feature_count"], FEATURE_COUNT);
    assert_eq!(body["feature_layout"]["hash"], layout_hash());
    assert_eq!(body["feature_layout"]["feature_names"][0], "air_quality");
}

#[tokio::test]
async fn test_ingest_scores_reading() {
    let harness = Harness::new(Some(1.5));
    let response = app(&harness)
        .oneshot(post("/api/v1/readings", sample_payload().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({ "anomaly_score": 1.5 }));
    assert_eq!(harness.publish_calls(), 1);
}

#[tokio::test]
async fn test_ingest_missing_field_is_bad_request() {
    let harness = Harness::new(Some(1.5));
    let mut payload = sample_payload();
    payload.as_object_mut().unwrap().remove("humidity");

    let response = app(&harness)
        .oneshot(post("/api/v1/readings", json!({ "payload": payload }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "Missing required fields: humidity");
    assert_eq!(harness.store_attempts(), 0);
}

#[tokio::test]
async fn test_ingest_store_failure_is_server_error() {
    let mut harness = Harness::new(Some(1.5));
    harness.store.fail = true;

    let response = app(&harness)
        .oneshot(post("/api/v1/readings", sample_payload().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(harness.score_calls(), 0);
}

#[tokio::test]
async fn test_invoke_returns_envelope() {
    let harness = Harness::new(Some(0.9));
    let router = app(&harness);

    let response = router
        .clone()
        .oneshot(post("/api/v1/invoke", sample_payload().to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let envelope = read_json(response).await;
    assert_eq!(envelope["statusCode"], 200);
    let inner: Value = serde_json::from_str(envelope["body"].as_str().unwrap()).unwrap();
    assert_eq!(inner, json!({ "anomaly_score": 0.9 }));

    let response = router
        .oneshot(post("/api/v1/invoke", "{broken".to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let envelope = read_json(response).await;
    assert_eq!(envelope["statusCode"], 400);
}

//! HTTP API Tests
//!
//! Exercise the router in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use payment_reputation::routes::app_router;
use payment_reputation::services::ReputationEngine;
use payment_reputation::state::AppState;

// ============================================================================
// Helpers
// ============================================================================

fn app(max_records: usize) -> Router {
    app_router(AppState::new(Arc::new(ReputationEngine::default()), max_records))
}

fn record(id: &str, payer: &str, payee: &str, amount: &str) -> Value {
    json!({
        "requestId": id,
        "payer": payer,
        "payee": payee,
        "amount": amount,
        "createdAt": "2024-03-01T00:00:00Z",
        "paidAt": "2024-03-06T00:00:00Z",
        "state": "paid"
    })
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app(10).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
}

// ============================================================================
// Scores
// ============================================================================

#[tokio::test]
async fn test_score_addresses() {
    let body = json!({
        "records": [record("r1", "0xpayer", "0xpayee", "10")],
        "viewer": "0xpayer"
    });
    let (status, json) = post(app(10), "/api/reputation/scores", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let scores = json["data"].as_array().unwrap();
    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0]["address"], "0xpayee");
    assert_eq!(scores[0]["totalTransactions"], 1);
    assert_eq!(scores[0]["role"], "request_sender");
    assert_eq!(scores[1]["address"], "0xpayer");
    assert_eq!(scores[1]["role"], "viewer");
}

#[tokio::test]
async fn test_score_strategy_override() {
    let body = json!({
        "records": [record("r1", "0xpayer", "0xpayee", "10")],
        "strategy": "sequence"
    });
    let (status, json) = post(app(10), "/api/reputation/scores", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"][0]["compositeScore"], 77);
}

#[tokio::test]
async fn test_score_rejects_negative_amount() {
    let body = json!({
        "records": [
            record("r1", "0xpayer", "0xpayee", "10"),
            record("r2", "0xpayer", "0xpayee", "-3"),
        ]
    });
    let (status, json) = post(app(10), "/api/reputation/scores", body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "INVALID_RECORD");
    assert_eq!(json["error"]["details"], "record_index=1");
}

#[tokio::test]
async fn test_score_rejects_oversized_payload() {
    let body = json!({
        "records": [
            record("r1", "0xa", "0xb", "1"),
            record("r2", "0xa", "0xb", "1"),
            record("r3", "0xa", "0xb", "1"),
        ]
    });
    let (status, json) = post(app(2), "/api/reputation/scores", body).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["error"]["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_score_rejects_empty_viewer() {
    let body = json!({
        "records": [record("r1", "0xa", "0xb", "1")],
        "viewer": ""
    });
    let (status, json) = post(app(10), "/api/reputation/scores", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

// ============================================================================
// Insights
// ============================================================================

#[tokio::test]
async fn test_insights_for_known_address() {
    let body = json!({ "records": [record("r1", "0xpayer", "0xpayee", "10")] });
    let (status, json) = post(app(10), "/api/reputation/0xpayee/insights", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["score"], 77);
    assert_eq!(json["data"]["riskLevel"], "MEDIUM");
    assert!(json["data"]["predictedNextPayment"].is_string());
    assert_eq!(json["data"]["insights"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_insights_for_unknown_address() {
    let body = json!({ "records": [record("r1", "0xpayer", "0xpayee", "10")] });
    let (status, json) = post(app(10), "/api/reputation/0xstranger/insights", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["score"], 0);
    assert_eq!(json["data"]["riskLevel"], "HIGH");
}

#[tokio::test]
async fn test_insights_with_extended_year_dates() {
    let mut early = record("r1", "0xa", "0xb", "5");
    early["createdAt"] = json!("-250000-01-01T00:00:00Z");
    early["paidAt"] = json!("-250000-01-01T00:00:00Z");
    let mut spanning = record("r2", "0xa", "0xb", "5");
    spanning["createdAt"] = json!("-199999-01-01T00:00:00Z");
    spanning["paidAt"] = json!("+200000-01-01T00:00:00Z");

    let body = json!({ "records": [early, spanning], "strategy": "sequence" });
    let (status, json) = post(app(10), "/api/reputation/0xb/insights", body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["data"]["predictedNextPayment"].is_string());
}

// ============================================================================
// Analytics
// ============================================================================

#[tokio::test]
async fn test_activity_summary() {
    let body = json!({
        "records": [
            record("r1", "0xa", "0xb", "0.1"),
            record("r2", "0xa", "0xb", "0.2"),
        ]
    });
    let (status, json) = post(app(10), "/api/analytics/summary", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["totalRequests"], 2);
    assert_eq!(json["data"]["monthly"][0]["month"], "2024-03");
    assert_eq!(json["data"]["monthly"][0]["requestCount"], 2);
}

#[tokio::test]
async fn test_unknown_route() {
    let request = Request::builder()
        .uri("/api/nowhere")
        .body(Body::empty())
        .unwrap();
    let response = app(10).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

//! Integration tests for API routes.
//!
//! Uses `tower::ServiceExt` to test Axum routes without a real HTTP server,
//! and `ScriptedCli` in place of the `stellar` binary.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use tower::ServiceExt;

use substate_api::routes::create_router;
use substate_api::state::AppState;
use substate_common::config::AppConfig;
use substate_invoker::InvokeError;
use substate_invoker::scripted::ScriptedCli;

// ============================================================
// Helpers
// ============================================================

fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "STELLAR_NETWORK" => Some("testnet".to_string()),
        "SUBSCRIPTION_CONTRACT_ID" => Some("CSUB".to_string()),
        "PAYMENT_CONTRACT_ID" => Some("CPAY".to_string()),
        _ => None,
    })
    .unwrap()
}

fn app_with(cli: Arc<ScriptedCli>) -> Router {
    create_router(AppState::new(cli, test_config()))
}

async fn send(app: Router, method: &str, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// CLI script for a full successful aggregation.
fn happy_cli(subscription: &str) -> Arc<ScriptedCli> {
    Arc::new(
        ScriptedCli::new()
            .respond(subscription)
            .respond(r#""975""#)
            .respond(r#"{"sequence":12345}"#)
            .respond("{\"id\":\"1\",\"type\":\"contract\"}\n{\"id\":\"2\",\"type\":\"contract\"}"),
    )
}

// ============================================================
// Health
// ============================================================

#[tokio::test]
async fn test_health_endpoint() {
    let response = send(app_with(Arc::new(ScriptedCli::new())), "GET", "/healthz").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/json"
    );
    assert_eq!(body_json(response).await, serde_json::json!({ "ok": true }));
}

// ============================================================
// /api/state
// ============================================================

#[tokio::test]
async fn test_state_missing_user() {
    let cli = Arc::new(ScriptedCli::new());
    let response = send(app_with(cli.clone()), "GET", "/api/state").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "missing user query parameter" })
    );
    assert!(cli.calls().is_empty());
}

#[tokio::test]
async fn test_state_blank_user() {
    let response = send(
        app_with(Arc::new(ScriptedCli::new())),
        "GET",
        "/api/state?user=%20%20",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_state_rejects_non_get() {
    let response = send(
        app_with(Arc::new(ScriptedCli::new())),
        "POST",
        "/api/state?user=alice",
    )
    .await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "method not allowed" })
    );
}

#[tokio::test]
async fn test_state_rejects_head() {
    let cli = happy_cli("null");
    let response = send(app_with(cli.clone()), "HEAD", "/api/state?user=alice").await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(cli.calls().is_empty());
}

#[tokio::test]
async fn test_state_repeated_user_takes_first() {
    let cli = happy_cli("null");
    let response = send(app_with(cli.clone()), "GET", "/api/state?user=alice&user=bob").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user"], "alice");
    assert_eq!(cli.calls()[0].flag_value("--user"), Some("alice"));
}

#[tokio::test]
async fn test_state_with_subscription() {
    let cli = happy_cli(r#"{"plan_id":2,"expires_at":"1767225600"}"#);
    let response = send(app_with(cli.clone()), "GET", "/api/state?user=GALICE").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"], "GALICE");
    assert_eq!(json["subscription"]["planId"], 2);
    assert_eq!(json["subscription"]["expiresAt"], 1_767_225_600u64);
    assert_eq!(json["tokenBalance"], "975");
    assert_eq!(json["xlmBalanceStroops"], "975");
    assert_eq!(json["recentEvents"].as_array().unwrap().len(), 2);
    assert_eq!(json["recentEvents"][1]["id"], "2");
    assert_eq!(json["network"], "testnet");
    assert_eq!(json["subscriptionContractId"], "CSUB");
    assert_eq!(json["paymentContractId"], "CPAY");
    assert!(json["observedAt"].as_str().unwrap().ends_with('Z'));

    let calls = cli.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[3].flag_value("--start-ledger"), Some("12145"));
}

#[tokio::test]
async fn test_state_null_subscription_still_aggregates() {
    let cli = happy_cli("null");
    let response = send(app_with(cli), "GET", "/api/state?user=alice").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["subscription"].is_null());
    assert_eq!(json["tokenBalance"], "975");
    assert_eq!(json["recentEvents"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_state_user_is_trimmed() {
    let cli = happy_cli("null");
    let response = send(app_with(cli.clone()), "GET", "/api/state?user=%20alice%20").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user"], "alice");
    assert_eq!(cli.calls()[0].flag_value("--user"), Some("alice"));
}

#[tokio::test]
async fn test_state_upstream_failure_is_bad_gateway() {
    let cli = Arc::new(ScriptedCli::new().fail("error: network unreachable"));
    let response = send(app_with(cli.clone()), "GET", "/api/state?user=alice").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "fetch subscription: error: network unreachable" })
    );
    assert_eq!(cli.calls().len(), 1);
}

#[tokio::test]
async fn test_state_malformed_events_is_bad_gateway() {
    let cli = Arc::new(
        ScriptedCli::new()
            .respond("null")
            .respond("5")
            .respond(r#"{"sequence":300}"#)
            .respond(r#"{"id":"1"} garbage"#),
    );
    let response = send(app_with(cli), "GET", "/api/state?user=alice").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .starts_with("parse events payload:")
    );
    assert!(json.get("user").is_none());
}

#[tokio::test]
async fn test_state_deadline_is_bad_gateway() {
    let cli = Arc::new(ScriptedCli::new().then(Err(InvokeError::DeadlineExceeded)));
    let response = send(app_with(cli), "GET", "/api/state?user=alice").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "fetch subscription: deadline exceeded" })
    );
}

// ============================================================
// CORS
// ============================================================

#[tokio::test]
async fn test_cors_headers_on_responses() {
    let response = send(app_with(Arc::new(ScriptedCli::new())), "GET", "/api/state").await;

    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "GET,OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

#[tokio::test]
async fn test_cors_preflight_is_no_content() {
    let cli = Arc::new(ScriptedCli::new());
    let response = send(app_with(cli.clone()), "OPTIONS", "/api/state?user=alice").await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(body.is_empty());
    assert!(cli.calls().is_empty());
}

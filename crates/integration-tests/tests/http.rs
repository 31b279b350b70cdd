//! Cross-cutting HTTP behavior: health, fallbacks, headers, store failures.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use fixit_integration_tests::{FailingStore, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_health_reports_backend() {
    let app = TestApp::new();
    let response = app.get("/api/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(response.body["backend"], "Memory");
    assert_eq!(response.body["region"], "eu-north-1");
    assert!(response.body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_health_reports_unreachable_store() {
    let app = TestApp::with_store(Arc::new(FailingStore));
    let response = app.get("/api/health").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["status"], "unhealthy");
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new();
    let response = app.get("/api/nothing-here").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), Some("Endpoint not found"));
}

#[tokio::test]
async fn test_store_failure_is_generic_500() {
    let app = TestApp::with_store(Arc::new(FailingStore));

    let list = app.get("/api/requests").await;
    assert_eq!(list.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(list.body, json!({ "error": "Internal server error" }));

    let create = app
        .post(
            "/api/requests",
            &json!({ "title": "Leaky faucet", "description": "Kitchen faucet drips" }),
        )
        .await;
    assert_eq!(create.status, StatusCode::INTERNAL_SERVER_ERROR);

    // Validation runs before the store is touched
    let invalid = app
        .post("/api/requests", &json!({ "title": "ab", "description": "x" }))
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_request_id_is_generated_or_propagated() {
    let app = TestApp::new();

    let response = app.get("/api/health").await;
    let generated = response.headers.get("x-request-id").unwrap();
    assert_eq!(generated.to_str().unwrap().len(), 36);

    let request = Request::builder()
        .uri("/api/health")
        .header("x-request-id", "edge-1234")
        .body(Body::empty())
        .unwrap();
    let response = app.send_request(request).await;
    assert_eq!(response.headers.get("x-request-id").unwrap(), "edge-1234");
}

#[tokio::test]
async fn test_cors_is_permissive() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/requests")
        .header("origin", "https://portal.example.org")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.send_request(request).await;
    assert!(response.status.is_success());
    assert_eq!(
        response
            .headers
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_undecodable_ticket_id_is_json_400() {
    let app = TestApp::new();

    let show = app.get("/api/requests/%FF").await;
    assert_eq!(show.status, StatusCode::BAD_REQUEST);
    assert!(show.error().is_some(), "{:?}", show.body);

    let update = app
        .put("/api/requests/%FF", &json!({ "status": "Closed" }))
        .await;
    assert_eq!(update.status, StatusCode::BAD_REQUEST);
    assert!(update.error().is_some(), "{:?}", update.body);

    let delete = app.delete("/api/requests/%FF").await;
    assert_eq!(delete.status, StatusCode::BAD_REQUEST);
    assert!(delete.error().is_some(), "{:?}", delete.body);
}

#[tokio::test]
async fn test_wrong_method_is_json_405() {
    let app = TestApp::new();

    let patch = app
        .send(Method::PATCH, "/api/requests", Some(&json!({})), None)
        .await;
    assert_eq!(patch.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(patch.body, json!({ "error": "Method not allowed" }));

    let post_health = app.send(Method::POST, "/api/health", None, None).await;
    assert_eq!(post_health.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(post_health.error(), Some("Method not allowed"));

    let get_login = app.get("/admin/login").await;
    assert_eq!(get_login.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(get_login.error(), Some("Method not allowed"));
}

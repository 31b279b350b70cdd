//! Admin session flow and statistics.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use fixit_integration_tests::{ADMIN_USERNAME, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_stats_require_login() {
    let app = TestApp::new();
    let response = app.get("/api/admin/stats").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), Some("authentication required"));
}

#[tokio::test]
async fn test_login_stats_logout() {
    let app = TestApp::new();
    let cookie = app.login().await;

    let stats = app
        .send(Method::GET, "/api/admin/stats", None, Some(&cookie))
        .await;
    assert_eq!(stats.status, StatusCode::OK);
    assert_eq!(stats.body["total"], 0);

    let logout = app
        .send(Method::POST, "/admin/logout", None, Some(&cookie))
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let stats = app
        .send(Method::GET, "/api/admin/stats", None, Some(&cookie))
        .await;
    assert_eq!(stats.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_response_and_cookie_attributes() {
    let app = TestApp::new();
    let response = app
        .post(
            "/admin/login",
            &json!({ "username": ADMIN_USERNAME, "password": "admin123" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], ADMIN_USERNAME);
    assert!(response.body["message"].is_string());

    let set_cookie = response
        .headers
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
}

#[tokio::test]
async fn test_bad_credentials_are_rejected() {
    let app = TestApp::new();

    for body in [
        json!({ "username": ADMIN_USERNAME, "password": "wrong" }),
        json!({ "username": "root", "password": "admin123" }),
        json!({}),
    ] {
        let response = app.post("/admin/login", &body).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.error(), Some("invalid credentials"));
        assert!(response.session_cookie().is_none());
    }
}

#[tokio::test]
async fn test_forged_cookie_is_anonymous() {
    let app = TestApp::new();
    let cookie = app.login().await;
    let (name, value) = cookie.split_once('=').unwrap();
    let forged = format!("{name}=x{value}");

    let response = app
        .send(Method::GET, "/api/admin/stats", None, Some(&forged))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_requires_login() {
    let app = TestApp::new();
    let response = app.send(Method::POST, "/admin/logout", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_stats_buckets() {
    let app = TestApp::new();
    let a = app.create_ticket("Broken window", "High").await;
    app.create_ticket("No hot water", "Critical").await;
    app.create_ticket("Squeaky door", "Low").await;
    app.create_ticket("Flickering light", "High").await;

    let uri = format!("/api/requests/{}", a["id"].as_str().unwrap());
    app.put(&uri, &json!({ "status": "Closed" })).await;

    let cookie = app.login().await;
    let stats = app
        .send(Method::GET, "/api/admin/stats", None, Some(&cookie))
        .await
        .body;

    assert_eq!(
        stats,
        json!({
            "total": 4,
            "pending": 3,
            "in_progress": 0,
            "resolved": 0,
            "closed": 1,
            "critical": 1,
            "high": 2,
            "medium": 0,
            "low": 1,
        })
    );
}

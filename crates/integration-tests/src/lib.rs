//! Integration test harness for Fixit.
//!
//! Builds the real router around an in-memory ticket store and drives it
//! with `tower::ServiceExt::oneshot`; no network or AWS access is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fixit-integration-tests
//! ```

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use fixit_core::{PasswordDigest, Ticket, TicketId, TicketPatch};
use fixit_server::config::{AdminCredentials, StoreBackend, StoreConfig};
use fixit_server::middleware::{AdminSessionStore, SessionSettings, create_session_layer};
use fixit_server::store::{InMemoryTicketStore, StoreError, TicketStore};
use fixit_server::{AppState, app};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

/// Configured admin username.
pub const ADMIN_USERNAME: &str = "admin";

/// Configured admin password (the harness stores only its digest).
pub const ADMIN_PASSWORD: &str = "admin123";

/// A running application instance.
pub struct TestApp {
    router: Router,
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `name=value` pair of the session cookie set by this response.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(fixit_server::middleware::SESSION_COOKIE_NAME))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }

    /// The `error` message of a JSON error body.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// App backed by an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryTicketStore::new()))
    }

    /// App backed by the given store.
    #[must_use]
    pub fn with_store(store: Arc<dyn TicketStore>) -> Self {
        let admin = AdminCredentials {
            username: ADMIN_USERNAME.to_string(),
            password_digest: PasswordDigest::of(ADMIN_PASSWORD),
        };
        let store_config = StoreConfig {
            backend: StoreBackend::Memory,
            table_name: "maintenance_requests".to_string(),
            region: "eu-north-1".to_string(),
            endpoint_url: None,
            credentials: None,
        };
        let session_layer = create_session_layer(
            &SessionSettings {
                secret: SecretString::from("Zq4tP9wLx2Rk7Vb1Nm8Hc3Jf6Gd0Se5Y"),
                ttl_seconds: 3600,
                secure: false,
            },
            AdminSessionStore::new(),
        );

        let state = AppState::from_parts(store, admin, &store_config);
        Self {
            router: app(state, session_layer),
        }
    }

    /// Send a request with an optional JSON body and cookie.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<&Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.send_request(request).await
    }

    /// Send a prepared request.
    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None, None).await
    }

    /// Create a ticket and return its JSON.
    pub async fn create_ticket(&self, title: &str, priority: &str) -> Value {
        let response = self
            .post(
                "/api/requests",
                &serde_json::json!({
                    "title": title,
                    "description": "Reported during the weekly walkthrough",
                    "priority": priority,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body
    }

    /// Log in as the configured admin and return the session cookie.
    pub async fn login(&self) -> String {
        let response = self
            .post(
                "/admin/login",
                &serde_json::json!({
                    "username": ADMIN_USERNAME,
                    "password": ADMIN_PASSWORD,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.session_cookie().unwrap()
    }
}

/// Store whose every call fails, for exercising 500 paths.
#[derive(Debug, Default)]
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Backend("service unavailable".to_string())
}

#[async_trait]
impl TicketStore for FailingStore {
    async fn get(&self, _id: &TicketId) -> Result<Option<Ticket>, StoreError> {
        Err(unavailable())
    }

    async fn put(&self, _ticket: &Ticket) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn patch(&self, _id: &TicketId, _patch: &TicketPatch) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: &TicketId) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn scan_all(&self) -> Result<Vec<Ticket>, StoreError> {
        Err(unavailable())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

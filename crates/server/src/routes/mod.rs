//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /api/health            - Store reachability
//!
//! # Tickets (public)
//! GET    /api/requests          - List tickets, newest first
//! POST   /api/requests          - Create ticket
//! GET    /api/requests/{id}     - Ticket detail
//! PUT    /api/requests/{id}     - Partial update
//! DELETE /api/requests/{id}     - Delete ticket
//!
//! # Admin
//! POST   /admin/login           - Open admin session
//! POST   /admin/logout          - Destroy admin session (admin)
//! GET    /api/admin/stats       - Ticket counts (admin)
//! ```
//!
//! Anything else is `404 {"error": "Endpoint not found"}`. A known path with
//! the wrong method is `405 {"error": "Method not allowed"}`.

pub mod admin;
pub mod health;
pub mod tickets;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::error::{AppError, ENDPOINT_NOT_FOUND};
use crate::middleware::{AdminSessionLayer, request_id_middleware};
use crate::state::AppState;

/// Build the route table.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/requests", get(tickets::list).post(tickets::create))
        .route(
            "/api/requests/{id}",
            get(tickets::show)
                .put(tickets::update)
                .delete(tickets::delete),
        )
        .route("/admin/login", post(admin::login))
        .route("/admin/logout", post(admin::logout))
        .route("/api/admin/stats", get(admin::stats))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
}

/// Build the full application: routes, sessions, request ids, tracing, CORS.
pub fn app(state: AppState, session_layer: AdminSessionLayer) -> Router {
    routes()
        .layer(session_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound(ENDPOINT_NOT_FOUND.to_string())
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

//! Health check.

use axum::{Json, extract::State, http::StatusCode};
use fixit_core::Timestamp;
use serde::Serialize;

use crate::state::AppState;

/// Health report body.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum HealthResponse {
    Healthy {
        status: &'static str,
        timestamp: Timestamp,
        backend: &'static str,
        region: String,
    },
    Unhealthy {
        status: &'static str,
        error: String,
    },
}

/// `GET /api/health` - verifies the ticket store is reachable.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.tickets().health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse::Healthy {
                status: "healthy",
                timestamp: Timestamp::now(),
                backend: state.backend(),
                region: state.region().to_string(),
            }),
        ),
        Err(err) => {
            tracing::error!(error = %err, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse::Unhealthy {
                    status: "unhealthy",
                    error: "Ticket store unreachable".to_string(),
                }),
            )
        }
    }
}

//! Unified error handling for the HTTP API.
//!
//! Every failure leaves a handler as an [`AppError`] and is rendered as a
//! JSON body of the form `{"error": "<message>"}`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fixit_core::ValidationError;
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Message returned for a missing ticket.
pub const TICKET_NOT_FOUND: &str = "Request not found";

/// Message returned for an unrouted path.
pub const ENDPOINT_NOT_FOUND: &str = "Endpoint not found";

/// Message returned when a route exists but not for the method.
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Client input violates a field contract or is not valid JSON.
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid admin session or credentials.
    #[error("{0}")]
    Auth(String),

    /// No resource at the addressed location.
    #[error("{0}")]
    NotFound(String),

    /// The path is routed but not for this method.
    #[error("{METHOD_NOT_ALLOWED}")]
    MethodNotAllowed,

    /// The ticket store failed.
    #[error("Store error: {0}")]
    Store(StoreError),

    /// Anything else.
    #[error("Internal error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Bad admin username or password.
    #[must_use]
    pub fn invalid_credentials() -> Self {
        Self::Auth("invalid credentials".to_string())
    }

    /// No authenticated admin session.
    #[must_use]
    pub fn authentication_required() -> Self {
        Self::Auth("authentication required".to_string())
    }

    /// No ticket for the requested id.
    #[must_use]
    pub fn ticket_not_found() -> Self {
        Self::NotFound(TICKET_NOT_FOUND.to_string())
    }

    /// HTTP status for this error kind.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Store(_) | Self::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::ticket_not_found(),
            other => Self::Store(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::Unknown(format!("session: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server-side failures go to Sentry; details stay out of the body
        let message = if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request failed"
            );
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

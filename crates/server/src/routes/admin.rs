//! Admin login, logout and statistics.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use fixit_core::StatsSnapshot;
use tower_sessions::Session;

use crate::error::AppError;
use crate::middleware::{RequireAdmin, clear_admin_session, set_admin_session};
use crate::models::{LoginRequest, LoginResponse, MessageResponse};
use crate::state::AppState;

/// `POST /admin/login`
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(request) = payload?;
    state.auth().verify(&request.username, &request.password)?;

    set_admin_session(&session, &request.username).await?;
    tracing::info!(username = %request.username, "Admin logged in");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        username: request.username,
    }))
}

/// `POST /admin/logout`
pub async fn logout(
    RequireAdmin(admin): RequireAdmin,
    session: Session,
) -> Result<Json<MessageResponse>, AppError> {
    clear_admin_session(&session).await?;
    tracing::info!(username = %admin.username, "Admin logged out");
    Ok(Json(MessageResponse::new("Logout successful")))
}

/// `GET /api/admin/stats`
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<StatsSnapshot>, AppError> {
    Ok(Json(state.tickets().stats().await?))
}

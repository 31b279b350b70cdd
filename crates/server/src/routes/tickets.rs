//! Ticket CRUD handlers. No authentication required.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use fixit_core::{CreateTicket, Ticket, TicketId, TicketUpdate};

use crate::error::AppError;
use crate::models::MessageResponse;
use crate::state::AppState;

/// `GET /api/requests` - every ticket, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Ticket>>, AppError> {
    Ok(Json(state.tickets().list().await?))
}

/// `POST /api/requests` - create a ticket.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateTicket>, JsonRejection>,
) -> Result<(StatusCode, Json<Ticket>), AppError> {
    let Json(input) = payload?;
    let ticket = state.tickets().create(&input).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// `GET /api/requests/{id}`
pub async fn show(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Ticket>, AppError> {
    let Path(id) = path?;
    Ok(Json(state.tickets().get(&TicketId::from(id)).await?))
}

/// `PUT /api/requests/{id}` - partial update.
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<TicketUpdate>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = path?;
    let Json(update) = payload?;
    state.tickets().update(&TicketId::from(id), &update).await?;
    Ok(Json(MessageResponse::new("Request updated successfully")))
}

/// `DELETE /api/requests/{id}`
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = path?;
    state.tickets().delete(&TicketId::from(id)).await?;
    Ok(Json(MessageResponse::new("Request deleted successfully")))
}

//! Fixit Server - HTTP API for maintenance tickets.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - Ticket store behind the [`store::TicketStore`] trait: DynamoDB in
//!   production, an in-memory map for tests and local development
//! - Admin sessions via tower-sessions (signed cookie, in-memory store)
//! - Validation, patch composition and statistics from `fixit-core`
//!
//! The binary in `main.rs` loads [`config::ServerConfig`], connects the
//! store and serves [`routes::app`]. Integration tests build the same router
//! around an [`store::InMemoryTicketStore`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use error::AppError;
pub use routes::app;
pub use state::AppState;

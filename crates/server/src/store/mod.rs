//! Ticket store adapters.
//!
//! # Table: `maintenance_requests`
//!
//! One item per ticket, keyed by the `id` string attribute. Every other
//! ticket field is stored as a top-level string attribute with the same name
//! it has in the JSON API.
//!
//! # Implementations
//!
//! - [`DynamoTicketStore`] - AWS DynamoDB (production)
//! - [`InMemoryTicketStore`] - process-local map (tests, local development)
//!
//! Handlers only ever see `Arc<dyn TicketStore>`, constructed once at startup
//! by [`connect`].

pub mod dynamo;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use fixit_core::{Ticket, TicketId, TicketPatch};
use thiserror::Error;

use crate::config::{StoreBackend, StoreConfig};

pub use dynamo::DynamoTicketStore;
pub use memory::InMemoryTicketStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed ticket does not exist.
    #[error("not found")]
    NotFound,

    /// The backing store rejected or failed the request.
    #[error("store request failed: {0}")]
    Backend(String),

    /// A stored item could not be decoded into a ticket.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Boundary to the persistent ticket table.
///
/// Implementations apply each call as a single request against the backing
/// store; no call is retried here.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Fetch one ticket by id.
    async fn get(&self, id: &TicketId) -> Result<Option<Ticket>, StoreError>;

    /// Create or fully overwrite a ticket.
    async fn put(&self, ticket: &Ticket) -> Result<(), StoreError>;

    /// Apply every entry of `patch` in one request.
    ///
    /// Returns [`StoreError::NotFound`] if the ticket does not exist; a
    /// missing ticket is never created by a patch.
    async fn patch(&self, id: &TicketId, patch: &TicketPatch) -> Result<(), StoreError>;

    /// Hard-delete a ticket.
    ///
    /// Returns [`StoreError::NotFound`] if the ticket did not exist.
    async fn delete(&self, id: &TicketId) -> Result<(), StoreError>;

    /// Every ticket in the table, in store order.
    async fn scan_all(&self) -> Result<Vec<Ticket>, StoreError>;

    /// Verify the backing store is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Build the configured ticket store.
pub async fn connect(config: &StoreConfig) -> Arc<dyn TicketStore> {
    match config.backend {
        StoreBackend::DynamoDb => Arc::new(DynamoTicketStore::from_config(config).await),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory ticket store; tickets are lost on restart");
            Arc::new(InMemoryTicketStore::new())
        }
    }
}

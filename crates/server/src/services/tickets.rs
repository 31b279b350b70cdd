//! Ticket lifecycle service.
//!
//! Validation and patch composition live in `fixit-core`; this service wires
//! them to the injected [`TicketStore`].

use std::sync::Arc;

use fixit_core::{
    CreateTicket, StatsSnapshot, Ticket, TicketId, TicketPatch, TicketUpdate, Timestamp,
    validation,
};

use crate::error::AppError;
use crate::store::TicketStore;

/// Ticket operations over a shared store handle.
#[derive(Clone)]
pub struct TicketService {
    store: Arc<dyn TicketStore>,
}

impl TicketService {
    /// Create a new ticket service.
    #[must_use]
    pub fn new(store: Arc<dyn TicketStore>) -> Self {
        Self { store }
    }

    /// Every ticket, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the scan fails.
    pub async fn list(&self) -> Result<Vec<Ticket>, AppError> {
        let mut tickets = self.store.scan_all().await?;
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tracing::debug!(count = tickets.len(), "Listed tickets");
        Ok(tickets)
    }

    /// Validate input and store a new `Pending` ticket.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for bad input (nothing is written) or
    /// `AppError::Store` if the write fails.
    pub async fn create(&self, input: &CreateTicket) -> Result<Ticket, AppError> {
        let new_ticket = validation::new_ticket(input)?;
        let ticket = Ticket::create(TicketId::generate(), new_ticket, Timestamp::now());

        self.store.put(&ticket).await?;
        tracing::info!(
            ticket_id = %ticket.id,
            priority = %ticket.priority,
            "Created ticket"
        );
        Ok(ticket)
    }

    /// Fetch one ticket.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no ticket has this id.
    pub async fn get(&self, id: &TicketId) -> Result<Ticket, AppError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(AppError::ticket_not_found)
    }

    /// Apply a partial update.
    ///
    /// Existence is checked before the input is validated, so an update to a
    /// missing ticket is a 404 even when the body is also invalid.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound`, `AppError::Validation` (including an
    /// update with no recognized fields) or `AppError::Store`.
    pub async fn update(&self, id: &TicketId, update: &TicketUpdate) -> Result<(), AppError> {
        let current = self.get(id).await?;
        let patch = TicketPatch::compose(update, current.updated_at)?;

        self.store.patch(id, &patch).await?;
        tracing::info!(
            ticket_id = %id,
            fields = ?patch.fields().collect::<Vec<_>>(),
            "Updated ticket"
        );
        Ok(())
    }

    /// Hard-delete a ticket.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no ticket has this id.
    pub async fn delete(&self, id: &TicketId) -> Result<(), AppError> {
        self.store.delete(id).await?;
        tracing::info!(ticket_id = %id, "Deleted ticket");
        Ok(())
    }

    /// Aggregate counts over every ticket.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the scan fails.
    pub async fn stats(&self) -> Result<StatsSnapshot, AppError> {
        let tickets = self.store.scan_all().await?;
        let stats = StatsSnapshot::from_tickets(&tickets);
        tracing::debug!(total = stats.total, "Computed ticket stats");
        Ok(stats)
    }

    /// Check that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the store is unreachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.store.health_check().await.map_err(AppError::Store)
    }
}

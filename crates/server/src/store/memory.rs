//! In-memory ticket store.
//!
//! Simple process-local storage for development and testing. Each operation
//! holds the lock for its whole duration, so a patch is applied atomically.

use std::collections::HashMap;

use async_trait::async_trait;
use fixit_core::{Ticket, TicketId, TicketPatch};
use tokio::sync::RwLock;

use super::{StoreError, TicketStore};

/// In-memory ticket store.
#[derive(Debug, Default)]
pub struct InMemoryTicketStore {
    tickets: RwLock<HashMap<TicketId, Ticket>>,
}

impl InMemoryTicketStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketStore for InMemoryTicketStore {
    async fn get(&self, id: &TicketId) -> Result<Option<Ticket>, StoreError> {
        Ok(self.tickets.read().await.get(id).cloned())
    }

    async fn put(&self, ticket: &Ticket) -> Result<(), StoreError> {
        self.tickets
            .write()
            .await
            .insert(ticket.id.clone(), ticket.clone());
        Ok(())
    }

    async fn patch(&self, id: &TicketId, patch: &TicketPatch) -> Result<(), StoreError> {
        let mut tickets = self.tickets.write().await;
        let ticket = tickets.get_mut(id).ok_or(StoreError::NotFound)?;
        ticket.apply(patch);
        Ok(())
    }

    async fn delete(&self, id: &TicketId) -> Result<(), StoreError> {
        self.tickets
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn scan_all(&self) -> Result<Vec<Ticket>, StoreError> {
        Ok(self.tickets.read().await.values().cloned().collect())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

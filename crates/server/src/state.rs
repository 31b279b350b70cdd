//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::{AdminCredentials, ServerConfig, StoreConfig};
use crate::services::{AuthService, TicketService};
use crate::store::TicketStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The ticket store is constructed once at
/// startup and injected here; tests inject an in-memory store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    tickets: TicketService,
    auth: AuthService,
    backend: &'static str,
    region: String,
}

impl AppState {
    /// Create state from loaded configuration and a connected store.
    #[must_use]
    pub fn new(config: &ServerConfig, store: Arc<dyn TicketStore>) -> Self {
        Self::from_parts(store, config.admin.clone(), &config.store)
    }

    /// Create state without a full [`ServerConfig`].
    #[must_use]
    pub fn from_parts(
        store: Arc<dyn TicketStore>,
        admin: AdminCredentials,
        store_config: &StoreConfig,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                tickets: TicketService::new(store),
                auth: AuthService::new(admin),
                backend: store_config.backend.label(),
                region: store_config.region.clone(),
            }),
        }
    }

    /// Ticket operations.
    #[must_use]
    pub fn tickets(&self) -> &TicketService {
        &self.inner.tickets
    }

    /// Admin credential check.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    /// Human-readable store backend name, reported by the health check.
    #[must_use]
    pub fn backend(&self) -> &'static str {
        self.inner.backend
    }

    /// Configured store region, reported by the health check.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.inner.region
    }
}

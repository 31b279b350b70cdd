//! Maintenance ticket record and client input documents.

use serde::{Deserialize, Serialize};

use crate::patch::{PatchEntry, TicketPatch};
use crate::types::{Priority, TicketId, TicketStatus, Timestamp};

/// A maintenance request.
///
/// `created_at` never changes after creation; `updated_at` moves forward on
/// every successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: TicketStatus,
    pub created_by: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Ticket {
    /// Build a fresh ticket from validated input.
    ///
    /// Status is forced to `Pending` and both timestamps are set to `now`.
    #[must_use]
    pub fn create(id: TicketId, input: NewTicket, now: Timestamp) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            priority: input.priority,
            status: TicketStatus::Pending,
            created_by: input.created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply every entry of a composed patch to this ticket in place.
    pub fn apply(&mut self, patch: &TicketPatch) {
        for entry in patch.entries() {
            match entry {
                PatchEntry::Title(title) => self.title.clone_from(title),
                PatchEntry::Description(description) => {
                    self.description.clone_from(description);
                }
                PatchEntry::Priority(priority) => self.priority = *priority,
                PatchEntry::Status(status) => self.status = *status,
                PatchEntry::UpdatedAt(updated_at) => self.updated_at = *updated_at,
            }
        }
    }
}

/// Raw create request body (`POST /api/requests`).
///
/// Every field is optional at the parsing stage; requiredness is enforced by
/// [`crate::validation::new_ticket`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateTicket {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub created_by: Option<String>,
}

/// Validated create input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub created_by: String,
}

/// Raw partial update body (`PUT /api/requests/{id}`).
///
/// Only these four keys are recognized; anything else in the document is
/// dropped during deserialization and never reaches the store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TicketUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

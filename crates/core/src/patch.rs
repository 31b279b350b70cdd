//! Partial update composition.
//!
//! A [`TicketPatch`] is built from an explicit whitelist of fields. Each
//! recognized field present in the input is validated and staged as one
//! [`PatchEntry`]; `updated_at` is always appended last. Store adapters turn
//! the entries into a single update request so that either every staged
//! field lands or none does.

use crate::ticket::TicketUpdate;
use crate::types::{Priority, TicketStatus, Timestamp};
use crate::validation::{self, ValidationError};

/// A ticket attribute that a patch may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TicketField {
    Title,
    Description,
    Priority,
    Status,
    UpdatedAt,
}

impl TicketField {
    /// Attribute name in the store and on the wire.
    #[must_use]
    pub const fn attribute_name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Priority => "priority",
            Self::Status => "status",
            Self::UpdatedAt => "updated_at",
        }
    }
}

/// One staged field write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchEntry {
    Title(String),
    Description(String),
    Priority(Priority),
    Status(TicketStatus),
    UpdatedAt(Timestamp),
}

impl PatchEntry {
    /// The field this entry writes.
    #[must_use]
    pub const fn field(&self) -> TicketField {
        match self {
            Self::Title(_) => TicketField::Title,
            Self::Description(_) => TicketField::Description,
            Self::Priority(_) => TicketField::Priority,
            Self::Status(_) => TicketField::Status,
            Self::UpdatedAt(_) => TicketField::UpdatedAt,
        }
    }

    /// The stored string representation of the new value.
    #[must_use]
    pub fn value(&self) -> String {
        match self {
            Self::Title(s) | Self::Description(s) => s.clone(),
            Self::Priority(p) => p.as_str().to_owned(),
            Self::Status(s) => s.as_str().to_owned(),
            Self::UpdatedAt(ts) => ts.to_string(),
        }
    }
}

/// A validated, non-empty set of field writes for one ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketPatch {
    entries: Vec<PatchEntry>,
}

impl TicketPatch {
    /// Compose a patch from a partial update document.
    ///
    /// `previous_updated_at` is the current `updated_at` of the stored
    /// ticket; the staged `updated_at` is guaranteed to be later.
    ///
    /// # Errors
    ///
    /// Returns the first field validation failure (title, description,
    /// priority, status order), or [`ValidationError::EmptyUpdate`] if none
    /// of the recognized fields is present.
    pub fn compose(
        update: &TicketUpdate,
        previous_updated_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        let mut entries = Vec::with_capacity(5);

        if let Some(raw) = update.title.as_deref() {
            entries.push(PatchEntry::Title(validation::title(raw)?));
        }
        if let Some(raw) = update.description.as_deref() {
            entries.push(PatchEntry::Description(validation::description(raw)?));
        }
        if let Some(raw) = update.priority.as_deref() {
            entries.push(PatchEntry::Priority(validation::priority(raw)?));
        }
        if let Some(raw) = update.status.as_deref() {
            entries.push(PatchEntry::Status(validation::status(raw)?));
        }

        if entries.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }

        entries.push(PatchEntry::UpdatedAt(Timestamp::now_after(
            previous_updated_at,
        )));

        Ok(Self { entries })
    }

    /// Staged entries, `updated_at` last.
    #[must_use]
    pub fn entries(&self) -> &[PatchEntry] {
        &self.entries
    }

    /// Fields written by this patch, in staging order.
    pub fn fields(&self) -> impl Iterator<Item = TicketField> + '_ {
        self.entries.iter().map(PatchEntry::field)
    }
}

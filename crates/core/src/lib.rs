//! Fixit Core - Maintenance ticket domain library.
//!
//! This crate provides the domain logic shared by all Fixit components:
//! - `server` - HTTP API for maintenance tickets and admin statistics
//! - `cli` - Command-line tools for secrets and table provisioning
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no store
//! access, no HTTP. Store adapters and handlers live in the server crate and
//! call into this crate for every decision about ticket data.
//!
//! # Modules
//!
//! - [`types`] - Ticket ids, priority/status enums, timestamps, password digests
//! - [`ticket`] - The `Ticket` record and client input documents
//! - [`validation`] - Field validation for create and partial update
//! - [`patch`] - Whitelist-driven partial update composition
//! - [`stats`] - Aggregation of ticket counts by status and priority

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod patch;
pub mod stats;
pub mod ticket;
pub mod types;
pub mod validation;

pub use patch::{PatchEntry, TicketField, TicketPatch};
pub use stats::StatsSnapshot;
pub use ticket::{CreateTicket, NewTicket, Ticket, TicketUpdate};
pub use types::*;
pub use validation::ValidationError;

//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Single static admin credential check
//! - `tickets` - Ticket lifecycle on top of the injected store

pub mod auth;
pub mod tickets;

pub use auth::AuthService;
pub use tickets::TicketService;

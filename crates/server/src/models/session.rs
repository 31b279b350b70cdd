//! Session-stored admin identity.

use serde::{Deserialize, Serialize};

/// What an authenticated admin session carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    /// Capability flag checked by the route guard.
    pub admin_logged_in: bool,
    /// Username the session was opened with.
    pub username: String,
}

impl AdminSession {
    /// A freshly authenticated session.
    #[must_use]
    pub fn logged_in(username: impl Into<String>) -> Self {
        Self {
            admin_logged_in: true,
            username: username.into(),
        }
    }
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for the current admin session record.
    pub const ADMIN: &str = "admin";
}

//! HTTP middleware and extractors.

pub mod auth;
pub mod request_id;
pub mod session;
pub mod session_store;

pub use auth::{RequireAdmin, clear_admin_session, set_admin_session};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use session::{AdminSessionLayer, SESSION_COOKIE_NAME, SessionSettings, create_session_layer};
pub use session_store::AdminSessionStore;

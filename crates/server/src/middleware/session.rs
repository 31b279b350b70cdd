//! Session middleware configuration.
//!
//! Admin sessions live in a process-local [`AdminSessionStore`] that evicts
//! expired records. The browser only holds a signed session id cookie
//! (SameSite=Strict, `HttpOnly`, inactivity expiry).

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha512};
use tower_sessions::cookie::{Key, SameSite, time::Duration};
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer};

use super::session_store::AdminSessionStore;
use crate::config::ServerConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "fixit_admin_session";

/// Session layer type used by the router.
pub type AdminSessionLayer = SessionManagerLayer<AdminSessionStore, SignedCookie>;

/// Inputs for [`create_session_layer`].
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Secret the cookie signing key is derived from.
    pub secret: SecretString,
    /// Inactivity expiry in seconds.
    pub ttl_seconds: i64,
    /// Whether to set the `Secure` cookie attribute.
    pub secure: bool,
}

impl SessionSettings {
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            secret: config.session_secret.clone(),
            ttl_seconds: config.session_ttl_seconds,
            secure: config.is_secure(),
        }
    }
}

/// Create the session layer over `store` with signed cookies.
#[must_use]
pub fn create_session_layer(
    settings: &SessionSettings,
    store: AdminSessionStore,
) -> AdminSessionLayer {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(settings.ttl_seconds)))
        .with_secure(settings.secure)
        .with_same_site(SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
        .with_signed(signing_key(&settings.secret))
}

/// Derive the 64-byte cookie signing key from the configured secret.
fn signing_key(secret: &SecretString) -> Key {
    let digest = Sha512::digest(secret.expose_secret().as_bytes());
    // SHA-512 output is exactly the 64 bytes `Key::from` requires
    Key::from(digest.as_slice())
}

//! Secret generation.
//!
//! Produces values for `SECRET_KEY` and `ADMIN_PASSWORD_HASH`.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use fixit_core::PasswordDigest;
use fixit_server::config::validate_secret_strength;
use rand::RngCore;

/// Random bytes behind a generated session secret.
const SECRET_KEY_BYTES: usize = 32;

/// A fresh URL-safe session secret (43 characters) that the server accepts.
///
/// Random output occasionally contains a blocklisted substring such as
/// `xxx` or `todo`; those candidates are discarded.
#[must_use]
pub fn generate_secret_key() -> String {
    loop {
        let candidate = random_key();
        if validate_secret_strength(&candidate, "SECRET_KEY").is_ok() {
            return candidate;
        }
        tracing::debug!("Discarded generated key rejected by the secret check");
    }
}

fn random_key() -> String {
    let mut bytes = [0u8; SECRET_KEY_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Lowercase hex SHA-256 digest of `password`.
#[must_use]
pub fn hash_password(password: &str) -> String {
    PasswordDigest::of(password).to_hex()
}

/// `.env` lines for a new deployment.
#[must_use]
pub fn env_lines(password: Option<&str>) -> String {
    let mut lines = vec![format!("SECRET_KEY={}", generate_secret_key())];
    if let Some(password) = password {
        lines.push(format!("ADMIN_PASSWORD_HASH={}", hash_password(password)));
    }
    lines.join("\n")
}

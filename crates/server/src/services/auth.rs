//! Admin authentication service.
//!
//! There is exactly one admin, configured by username and the SHA-256 digest
//! of their password. Raw passwords are never stored or compared.

use crate::config::AdminCredentials;
use crate::error::AppError;

/// Checks login attempts against the configured admin credentials.
#[derive(Debug, Clone)]
pub struct AuthService {
    admin: AdminCredentials,
}

impl AuthService {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(admin: AdminCredentials) -> Self {
        Self { admin }
    }

    /// Verify a username and password.
    ///
    /// The password digest is always computed and compared in constant time,
    /// even when the username does not match.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth("invalid credentials")` on any mismatch.
    pub fn verify(&self, username: &str, password: &str) -> Result<(), AppError> {
        let password_ok = self.admin.password_digest.verify(password);
        let username_ok = username == self.admin.username;

        if password_ok && username_ok {
            Ok(())
        } else {
            tracing::warn!(username = %username, "Rejected admin login");
            Err(AppError::invalid_credentials())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fixit_core::PasswordDigest;

    use super::*;

    fn service() -> AuthService {
        AuthService::new(AdminCredentials {
            username: "admin".to_string(),
            password_digest: PasswordDigest::of("admin123"),
        })
    }

    #[test]
    fn test_correct_credentials() {
        assert!(service().verify("admin", "admin123").is_ok());
    }

    #[test]
    fn test_wrong_password() {
        let err = service().verify("admin", "admin124").unwrap_err();
        assert_eq!(err.to_string(), "invalid credentials");
    }

    #[test]
    fn test_wrong_username() {
        assert!(service().verify("root", "admin123").is_err());
        assert!(service().verify("Admin", "admin123").is_err());
    }

    #[test]
    fn test_digest_is_not_accepted_as_password() {
        let digest = PasswordDigest::of("admin123").to_hex();
        assert!(service().verify("admin", &digest).is_err());
    }
}

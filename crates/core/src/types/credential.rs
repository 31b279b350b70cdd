//! Admin password digest.
//!
//! The admin password is never stored or compared in plaintext. Operators
//! configure a precomputed SHA-256 digest (64 lowercase hex characters) and
//! login attempts are checked by hashing the submitted password and comparing
//! digests in constant time.

use core::fmt;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Errors that can occur when parsing a [`PasswordDigest`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordDigestError {
    /// The input is not 64 characters long.
    #[error("password digest must be 64 hex characters (got {0})")]
    InvalidLength(usize),
    /// The input contains non-hex characters.
    #[error("password digest must be hex encoded")]
    InvalidHex,
}

/// SHA-256 digest of the admin password.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest([u8; 32]);

impl PasswordDigest {
    /// Hash a plaintext password.
    #[must_use]
    pub fn of(password: &str) -> Self {
        Self(Sha256::digest(password.as_bytes()).into())
    }

    /// Parse a hex-encoded digest (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly 64 hex characters.
    pub fn parse(hex_digest: &str) -> Result<Self, PasswordDigestError> {
        let trimmed = hex_digest.trim();
        if trimmed.len() != 64 {
            return Err(PasswordDigestError::InvalidLength(trimmed.len()));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(trimmed, &mut bytes).map_err(|_| PasswordDigestError::InvalidHex)?;
        Ok(Self(bytes))
    }

    /// Check a plaintext password against this digest in constant time.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        let candidate = Self::of(password);
        self.0.ct_eq(&candidate.0).into()
    }

    /// Lowercase hex encoding, as written to `ADMIN_PASSWORD_HASH`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

// Digests are not secrets in the strict sense, but there is no reason to
// print them in logs either.
impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest([REDACTED])")
    }
}

impl std::str::FromStr for PasswordDigest {
    type Err = PasswordDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // sha256("admin123")
    const ADMIN123: &str = "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9";

    #[test]
    fn test_of_matches_known_vector() {
        assert_eq!(PasswordDigest::of("admin123").to_hex(), ADMIN123);
    }

    #[test]
    fn test_parse_and_verify() {
        let digest = PasswordDigest::parse(ADMIN123).unwrap();
        assert!(digest.verify("admin123"));
        assert!(!digest.verify("admin124"));
        assert!(!digest.verify(""));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let upper = ADMIN123.to_uppercase();
        assert_eq!(
            PasswordDigest::parse(&upper).unwrap(),
            PasswordDigest::parse(ADMIN123).unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            PasswordDigest::parse("abc"),
            Err(PasswordDigestError::InvalidLength(3))
        );
        assert_eq!(
            PasswordDigest::parse(&"z".repeat(64)),
            Err(PasswordDigestError::InvalidHex)
        );
    }

    #[test]
    fn test_debug_redacts() {
        let digest = PasswordDigest::of("admin123");
        assert!(!format!("{digest:?}").contains(ADMIN123));
    }
}

//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SECRET_KEY` - Session signing secret (min 32 chars, high entropy)
//! - `ADMIN_PASSWORD_HASH` - SHA-256 hex digest of the admin password
//!   (generate with `fixit-cli secrets hash-password`)
//!
//! ## Optional
//! - `FIXIT_HOST` - Bind address (default: 0.0.0.0)
//! - `FIXIT_PORT` - Listen port (default: 5000)
//! - `FIXIT_BASE_URL` - Public URL; `https://` enables Secure cookies
//!   (default: <http://localhost:5000>)
//! - `FIXIT_LOG_JSON` - Emit JSON logs when set
//! - `ADMIN_USERNAME` - Admin login name (default: admin)
//! - `SESSION_TTL_SECONDS` - Admin session inactivity expiry (default: 86400)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//!
//! ## Optional (ticket store)
//! - `STORE_BACKEND` - `dynamodb` or `memory` (default: dynamodb)
//! - `TABLE_NAME` - DynamoDB table (default: `maintenance_requests`)
//! - `AWS_REGION` - AWS region (default: eu-north-1)
//! - `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` - Static credentials. When
//!   unset the SDK default provider chain is used (environment, profile,
//!   web identity / assumed role, instance metadata).
//! - `DYNAMODB_ENDPOINT` - Endpoint override, e.g. DynamoDB Local

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use fixit_core::PasswordDigest;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_TABLE_NAME: &str = "maintenance_requests";
const DEFAULT_REGION: &str = "eu-north-1";
const DEFAULT_SESSION_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: String,
    /// Session signing secret
    pub session_secret: SecretString,
    /// Admin session inactivity expiry
    pub session_ttl_seconds: i64,
    /// The single configured admin credential pair
    pub admin: AdminCredentials,
    /// Ticket store configuration
    pub store: StoreConfig,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Configured admin username and password digest.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password_digest: PasswordDigest,
}

/// Which ticket store implementation to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// AWS DynamoDB table.
    DynamoDb,
    /// Process-local map; data is lost on restart.
    Memory,
}

impl StoreBackend {
    /// Name reported by the health endpoint.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DynamoDb => "DynamoDB",
            Self::Memory => "Memory",
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dynamodb" => Ok(Self::DynamoDb),
            "memory" => Ok(Self::Memory),
            _ => Err(format!("unknown store backend '{s}' (expected dynamodb or memory)")),
        }
    }
}

/// Ticket store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub table_name: String,
    pub region: String,
    pub endpoint_url: Option<String>,
    pub credentials: Option<StaticCredentials>,
}

/// Static AWS access keys.
///
/// Implements `Debug` manually to redact the secret key.
#[derive(Clone)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: SecretString,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .finish()
    }
}

impl StaticCredentials {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let access_key_id = get_optional_env("AWS_ACCESS_KEY_ID");
        let secret_access_key = get_optional_env("AWS_SECRET_ACCESS_KEY");

        match (access_key_id, secret_access_key) {
            (Some(id), Some(secret)) => Ok(Some(Self {
                access_key_id: id,
                secret_access_key: SecretString::from(secret),
            })),
            (None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "AWS_*".to_string(),
                "Both AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set together"
                    .to_string(),
            )),
        }
    }
}

impl StoreConfig {
    /// Load store configuration from environment.
    ///
    /// Shared with the CLI so that `table create` targets the same table
    /// the server reads.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the backend name is unknown or only one of
    /// the static credential variables is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend = get_env_or_default("STORE_BACKEND", "dynamodb")
            .parse::<StoreBackend>()
            .map_err(|e| ConfigError::InvalidEnvVar("STORE_BACKEND".to_string(), e))?;

        Ok(Self {
            backend,
            table_name: get_env_or_default("TABLE_NAME", DEFAULT_TABLE_NAME),
            region: get_env_or_default("AWS_REGION", DEFAULT_REGION),
            endpoint_url: get_optional_env("DYNAMODB_ENDPOINT"),
            credentials: StaticCredentials::from_env()?,
        })
    }
}

impl AdminCredentials {
    fn from_env() -> Result<Self, ConfigError> {
        let hash = get_required_env("ADMIN_PASSWORD_HASH")?;
        let password_digest = PasswordDigest::parse(&hash).map_err(|e| {
            ConfigError::InvalidEnvVar("ADMIN_PASSWORD_HASH".to_string(), e.to_string())
        })?;

        let username = get_env_or_default("ADMIN_USERNAME", "admin");
        if username.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "ADMIN_USERNAME".to_string(),
                "must not be empty".to_string(),
            ));
        }

        Ok(Self {
            username,
            password_digest,
        })
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("FIXIT_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("FIXIT_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("FIXIT_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("FIXIT_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("FIXIT_BASE_URL", "http://localhost:5000");
        let session_secret = get_validated_secret("SECRET_KEY")?;
        validate_session_secret(&session_secret, "SECRET_KEY")?;
        let session_ttl_seconds = get_optional_env("SESSION_TTL_SECONDS")
            .map(|s| {
                s.parse::<i64>()
                    .ok()
                    .filter(|ttl| *ttl > 0)
                    .ok_or_else(|| {
                        ConfigError::InvalidEnvVar(
                            "SESSION_TTL_SECONDS".to_string(),
                            format!("expected a positive number of seconds, got '{s}'"),
                        )
                    })
            })
            .transpose()?
            .unwrap_or(DEFAULT_SESSION_TTL_SECONDS);

        let admin = AdminCredentials::from_env()?;
        let store = StoreConfig::from_env()?;
        let log_json = get_optional_env("FIXIT_LOG_JSON").is_some();
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            base_url,
            session_secret,
            session_ttl_seconds,
            admin,
            store,
            log_json,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
///
/// The placeholder check is a case-insensitive substring match, so random
/// keys can trip it too; generators must re-roll until this passes.
///
/// # Errors
///
/// Returns `ConfigError::InsecureSecret` naming `var_name`.
pub fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use `fixit-cli secrets generate`."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // "ab" has entropy of 1 bit per char (50% a, 50% b)
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-session-key-here", "SECRET_KEY");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength(&"a".repeat(40), "SECRET_KEY");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_generated_key() {
        // Shape of `fixit-cli secrets generate` output (URL-safe base64)
        let result =
            validate_secret_strength("q3Vx9_Lk2mZ8RtYb-W4nHcJ7aPe5sDfG1uIo0EyTvBw", "SECRET_KEY");
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_session_secret_too_short() {
        let secret = SecretString::from("short");
        assert!(validate_session_secret(&secret, "SECRET_KEY").is_err());
    }

    #[test]
    fn test_store_backend_parse() {
        assert_eq!("dynamodb".parse::<StoreBackend>().unwrap(), StoreBackend::DynamoDb);
        assert_eq!("DynamoDB".parse::<StoreBackend>().unwrap(), StoreBackend::DynamoDb);
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("postgres".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_static_credentials_debug_redacts_secret() {
        let creds = StaticCredentials {
            access_key_id: "AKIAEXAMPLEKEY".to_string(),
            secret_access_key: SecretString::from("super-secret-access-key"),
        };
        let debug_output = format!("{creds:?}");
        assert!(debug_output.contains("AKIAEXAMPLEKEY"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-access-key"));
    }

    #[test]
    fn test_socket_addr_and_secure_flag() {
        let config = ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 5000,
            base_url: "https://fixit.example.org".to_string(),
            session_secret: SecretString::from("x".repeat(32)),
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            admin: AdminCredentials {
                username: "admin".to_string(),
                password_digest: PasswordDigest::of("admin123"),
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                table_name: DEFAULT_TABLE_NAME.to_string(),
                region: DEFAULT_REGION.to_string(),
                endpoint_url: None,
                credentials: None,
            },
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 5000);
        assert!(config.is_secure());
    }
}

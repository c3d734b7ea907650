//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! Everything is optional or defaulted so the binary runs out of the box.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STORE_NAME` - Display name used in notification emails (default: Stockroom)
//! - `ADMIN_EMAIL` - Operator address order notifications are sent to
//! - `RESEND_API_KEY` - Email provider API key; unset disables delivery
//!   (orders are still accepted, notifications are logged only)
//! - `STOREFRONT_DATA_DIR` - Directory for the durable key-value store;
//!   unset runs the cart in-memory only
//! - `NOTIFY_TIMEOUT_SECS` - Email dispatch timeout (default: 10)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use stockroom_core::Email;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Store display name, used in notification emails
    pub store_name: String,
    /// Operator email address for order notifications
    pub admin_email: Option<Email>,
    /// Email provider API key; `None` disables delivery
    pub resend_api_key: Option<SecretString>,
    /// Data directory for durable storage; `None` means in-memory only
    pub data_dir: Option<PathBuf>,
    /// Timeout applied to the notification dispatch request
    pub notify_timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails to parse, or if
    /// `RESEND_API_KEY` is set without a valid `ADMIN_EMAIL` to deliver to.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let store_name = get_env_or_default("STORE_NAME", "Stockroom");

        let admin_email = match get_optional_env("ADMIN_EMAIL") {
            Some(raw) => Some(Email::parse(&raw).map_err(|e| {
                ConfigError::InvalidEnvVar("ADMIN_EMAIL".to_string(), e.to_string())
            })?),
            None => None,
        };
        let resend_api_key = get_optional_env("RESEND_API_KEY").map(SecretString::from);

        // Delivery needs a recipient; catch the misconfiguration at boot.
        if resend_api_key.is_some() && admin_email.is_none() {
            return Err(ConfigError::MissingEnvVar("ADMIN_EMAIL".to_string()));
        }

        let data_dir = get_optional_env("STOREFRONT_DATA_DIR").map(PathBuf::from);
        let notify_timeout_secs = get_env_or_default("NOTIFY_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("NOTIFY_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            host,
            port,
            store_name,
            admin_email,
            resend_api_key,
            data_dir,
            notify_timeout: Duration::from_secs(notify_timeout_secs),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

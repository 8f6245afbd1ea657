//! Mailer configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `RESEND_API_KEY` - API key for the hosted email API
//!
//! ## Optional
//! - `MAILER_HOST` - Bind address (default: 127.0.0.1)
//! - `MAILER_PORT` - Listen port (default: 8787)
//! - `ORDER_FROM_ADDRESS` - Sender for both emails
//! - `BUSINESS_EMAIL` - Address that receives the business copy
//!
//! A missing or placeholder API key refuses startup; there is no send-less
//! degraded mode.

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

use hydron_core::Email;

/// Default sender identity for order emails.
const DEFAULT_FROM_ADDRESS: &str = "Hydron Marketing <orders@hydronmarketing.com>";

/// Default recipient of the business notification copy.
const DEFAULT_BUSINESS_EMAIL: &str = "marketinghydron@gmail.com";

/// Placeholder fragments that are never part of a real API key.
const PLACEHOLDER_PATTERNS: &[&str] = &["your-", "changeme", "placeholder", "example", "xxx"];

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

/// Mailer application configuration.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Email API key
    pub api_key: SecretString,
    /// Sender identity for both emails
    pub from_address: String,
    /// Business copy recipient
    pub business_email: Email,
}

impl MailerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the API key is missing or looks like a
    /// placeholder, or if the business address does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("MAILER_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("MAILER_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("MAILER_PORT", "8787")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("MAILER_PORT".to_string(), e.to_string()))?;

        let api_key = std::env::var("RESEND_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("RESEND_API_KEY".to_string()))?;
        validate_api_key(&api_key)?;

        let from_address = get_env_or_default("ORDER_FROM_ADDRESS", DEFAULT_FROM_ADDRESS);

        let business_email = get_env_or_default("BUSINESS_EMAIL", DEFAULT_BUSINESS_EMAIL);
        let business_email = Email::parse(&business_email)
            .map_err(|e| ConfigError::InvalidEnvVar("BUSINESS_EMAIL".to_string(), e.to_string()))?;

        Ok(Self {
            host,
            port,
            api_key: SecretString::from(api_key),
            from_address,
            business_email,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Reject obvious placeholder API keys.
fn validate_api_key(key: &str) -> Result<(), ConfigError> {
    let lower = key.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                "RESEND_API_KEY".to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_api_key_rejects_placeholders() {
        assert!(validate_api_key("your-api-key").is_err());
        assert!(validate_api_key("re_changeme").is_err());
    }

    #[test]
    fn test_validate_api_key_accepts_real_shape() {
        assert!(validate_api_key("re_8kPz4qVw_9XcR2mNfT6yHsB1dJ7aLgQe").is_ok());
    }
}

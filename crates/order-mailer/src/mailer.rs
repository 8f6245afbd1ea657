//! Hosted email API client.
//!
//! The mailer speaks the hosted API's single-endpoint surface: `POST /emails`
//! with bearer auth and a JSON body. The [`Mailer`] trait is the seam the
//! request handler depends on, so tests substitute a fake and no email ever
//! leaves a test run.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use hydron_core::Email;

/// Hosted email API base URL.
const BASE_URL: &str = "https://api.resend.com";

/// Errors that can occur when sending an email.
#[derive(Debug, Error)]
pub enum MailerError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("email API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The API key could not be used as a header value.
    #[error("invalid API key: {0}")]
    InvalidKey(String),
}

/// One outgoing email.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// Sender identity, e.g. `Hydron Marketing <orders@hydronmarketing.com>`.
    pub from: String,
    /// Recipient address.
    pub to: Email,
    /// Subject line.
    pub subject: String,
    /// The rendered HTML document.
    pub html: String,
}

/// Something that can deliver an [`EmailMessage`].
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one email.
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError>;
}

/// [`Mailer`] over the hosted email API.
#[derive(Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    base_url: String,
}

impl ResendMailer {
    /// Create a mailer against the production API.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::InvalidKey`] if the API key contains bytes that
    /// cannot appear in an HTTP header.
    pub fn new(api_key: &SecretString) -> Result<Self, MailerError> {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Create a mailer against an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::InvalidKey`] if the API key cannot be used as a
    /// header value.
    pub fn with_base_url(api_key: &SecretString, base_url: &str) -> Result<Self, MailerError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", api_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| MailerError::InvalidKey(e.to_string()))?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        let body = serde_json::json!({
            "from": message.from,
            "to": [message.to.as_str()],
            "subject": message.subject,
            "html": message.html,
        });

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_key_with_invalid_header_bytes() {
        let key = SecretString::from("re_key\nwith-newline");
        assert!(matches!(
            ResendMailer::new(&key),
            Err(MailerError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_api_error_display() {
        let err = MailerError::Api {
            status: 422,
            message: "Invalid `to` field".to_string(),
        };
        assert_eq!(err.to_string(), "email API error: 422 - Invalid `to` field");
    }
}

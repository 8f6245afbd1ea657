//! HTTP client for the hosted identity backend.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::IdentityConfig;
use crate::identity::types::{Session, SignUpOutcome, User};
use crate::identity::IdentityError;

/// Client for the identity backend's auth REST API.
///
/// Cheaply cloneable; holds a shared `reqwest::Client` with the publishable
/// key pre-attached as the `apikey` header.
#[derive(Clone)]
pub struct IdentityClient {
    inner: Arc<IdentityClientInner>,
}

struct IdentityClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl IdentityClient {
    /// Create a new identity backend client.
    ///
    /// # Panics
    ///
    /// Panics if the publishable key contains bytes that are not valid in an
    /// HTTP header. Keys are validated at config load, so this cannot happen
    /// for a config that passed `SiteConfig::from_env()`.
    #[must_use]
    pub fn new(config: &IdentityConfig) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        let key = config.publishable_key.expose_secret();
        let mut api_key = reqwest::header::HeaderValue::from_str(key)
            .expect("publishable key is a valid header value");
        api_key.set_sensitive(true);
        headers.insert("apikey", api_key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("reqwest client with static configuration builds");

        Self {
            inner: Arc::new(IdentityClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1{path}", self.inner.base_url)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Password authentication
    // ─────────────────────────────────────────────────────────────────────────

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Api` with the backend's message when the
    /// credentials are rejected.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, IdentityError> {
        let body = serde_json::json!({ "email": email, "password": password });

        self.post_json(&self.url("/token?grant_type=password"), &body)
            .await
    }

    /// Create a new account.
    ///
    /// The backend decides whether the account is active immediately or needs
    /// email confirmation first; re-registering an existing email comes back
    /// as a user record with an empty identities list.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Api` when the backend rejects the sign-up.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, IdentityError> {
        let body = serde_json::json!({ "email": email, "password": password });

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum SignUpResponse {
            Active(Session),
            Pending(User),
        }

        let response: SignUpResponse = self.post_json(&self.url("/signup"), &body).await?;

        Ok(match response {
            SignUpResponse::Active(session) => SignUpOutcome::Active(session),
            SignUpResponse::Pending(user) => {
                if user.identities.as_ref().is_some_and(Vec::is_empty) {
                    SignUpOutcome::AlreadyRegistered
                } else {
                    SignUpOutcome::ConfirmationPending(user)
                }
            }
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // OAuth flow
    // ─────────────────────────────────────────────────────────────────────────

    /// Build the authorization URL for an OAuth provider.
    ///
    /// Redirect the browser here to begin the flow; the backend sends it back
    /// to `redirect_to` with a `code` query parameter.
    ///
    /// # Arguments
    ///
    /// * `provider` - OAuth provider name (e.g., `google`)
    /// * `redirect_to` - The callback URL registered with the backend
    /// * `code_challenge` - Base64url-encoded SHA-256 of the PKCE verifier
    #[must_use]
    pub fn authorize_url(&self, provider: &str, redirect_to: &str, code_challenge: &str) -> String {
        format!(
            "{}?provider={}&redirect_to={}&code_challenge={}&code_challenge_method=s256",
            self.url("/authorize"),
            urlencoding::encode(provider),
            urlencoding::encode(redirect_to),
            urlencoding::encode(code_challenge),
        )
    }

    /// Exchange an OAuth callback code for a session.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Api` when the code or verifier is rejected.
    pub async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<Session, IdentityError> {
        let body = serde_json::json!({ "auth_code": code, "code_verifier": code_verifier });

        self.post_json(&self.url("/token?grant_type=pkce"), &body)
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Obtain a fresh session from a refresh token.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Api` when the refresh token has been revoked.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session, IdentityError> {
        let body = serde_json::json!({ "refresh_token": refresh_token });

        self.post_json(&self.url("/token?grant_type=refresh_token"), &body)
            .await
    }

    /// Fetch the user a session belongs to.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Api` when the access token is invalid.
    pub async fn get_user(&self, access_token: &str) -> Result<User, IdentityError> {
        let response = self
            .inner
            .client
            .get(self.url("/user"))
            .bearer_auth(access_token)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Revoke a session with the backend.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Api` when the backend refuses. Callers clear
    /// local state regardless of the outcome.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        let response = self
            .inner
            .client
            .post(self.url("/logout"))
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = extract_error_message(status.as_u16(), &response.text().await?);
            return Err(IdentityError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Request plumbing
    // ─────────────────────────────────────────────────────────────────────────

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<T, IdentityError> {
        let response = self.inner.client.post(url).json(body).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, IdentityError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = extract_error_message(status.as_u16(), &text);
            return Err(IdentityError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| IdentityError::Parse(e.to_string()))
    }
}

/// Pull a human-readable message out of a backend error body.
///
/// The backend uses several error shapes (`error_description` on token
/// endpoints, `msg` or `message` elsewhere); fall back to the raw body, then
/// to the status code.
fn extract_error_message(status: u16, body: &str) -> String {
    #[derive(Deserialize, Default)]
    struct ErrorBody {
        error_description: Option<String>,
        msg: Option<String>,
        message: Option<String>,
        error: Option<String>,
    }

    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    parsed
        .error_description
        .or(parsed.msg)
        .or(parsed.message)
        .or(parsed.error)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("identity backend returned status {status}")
            } else {
                body.trim().to_string()
            }
        })
}

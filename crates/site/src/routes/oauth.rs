//! OAuth route handlers.
//!
//! Delegated sign-in through the identity backend's OAuth support:
//! - Start: store a PKCE verifier in the session and redirect to the
//!   backend's authorization page with the computed callback URL
//! - Callback: map the returned code (or its absence) to a session or to one
//!   of the sign-in page's error codes

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use base64::Engine as _;
use rand::Rng;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tower_sessions::Session;

use crate::models::session_keys;
use crate::redirect::build_redirect_to;
use crate::routes::auth::signed_in_response;
use crate::state::AppState;

/// OAuth providers the site offers.
const PROVIDERS: &[&str] = &["google"];

/// Length of the PKCE verifier.
const VERIFIER_LENGTH: usize = 64;

/// Query parameters from the OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code to exchange for a session.
    pub code: Option<String>,
    /// Error code if authorization failed at the provider.
    pub error: Option<String>,
    /// Error description.
    pub error_description: Option<String>,
}

/// Generate a random string from unreserved URL characters.
fn generate_random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            // SAFETY: idx is always within bounds since random_range returns 0..CHARSET.len()
            char::from(*CHARSET.get(idx).expect("idx within bounds"))
        })
        .collect()
}

/// Base64url-encoded SHA-256 of the verifier, per PKCE S256.
fn code_challenge(verifier: &str) -> String {
    let digest = Sha256::digest(verifier.as_bytes());
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest)
}

/// Initiate OAuth sign-in with a provider.
///
/// # Route
///
/// `GET /auth/oauth/{provider}`
pub async fn start(
    State(state): State<AppState>,
    session: Session,
    Path(provider): Path<String>,
) -> Response {
    if !PROVIDERS.contains(&provider.as_str()) {
        tracing::warn!(provider = %provider, "unknown OAuth provider requested");
        return Redirect::to("/signin?error=oauth_failed").into_response();
    }

    let verifier = generate_random_string(VERIFIER_LENGTH);
    if let Err(e) = session
        .insert(session_keys::PKCE_VERIFIER, &verifier)
        .await
    {
        tracing::error!(error = %e, "failed to store PKCE verifier in session");
        return Redirect::to("/signin?error=oauth_failed").into_response();
    }

    // The same callback URL must come out of every deployment regardless of
    // its path prefix; the backend validates it against its allow-list.
    let config = state.config();
    let redirect_to = build_redirect_to(&config.base_url, &config.base_path);

    let auth_url = state
        .identity()
        .authorize_url(&provider, &redirect_to, &code_challenge(&verifier));

    Redirect::to(&auth_url).into_response()
}

/// Handle the OAuth callback.
///
/// # Route
///
/// `GET /auth/callback`
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CallbackQuery>,
) -> Response {
    // Provider-reported errors (user cancelled, consent denied)
    if let Some(error) = query.error {
        let description = query.error_description.unwrap_or_default();
        tracing::warn!(error = %error, description = %description, "OAuth provider error");
        return Redirect::to("/signin?error=oauth_failed").into_response();
    }

    let Some(code) = query.code else {
        tracing::warn!("OAuth callback missing code");
        return Redirect::to("/signin?error=no_code").into_response();
    };

    // One-time use: the verifier is removed whether or not the exchange works
    let verifier: Option<String> = session
        .remove(session_keys::PKCE_VERIFIER)
        .await
        .ok()
        .flatten();

    let Some(verifier) = verifier else {
        tracing::warn!("OAuth callback without a stored PKCE verifier");
        return Redirect::to("/signin?error=callback_failed").into_response();
    };

    match state.identity().exchange_code(&code, &verifier).await {
        Ok(identity_session) => signed_in_response(&session, &identity_session, "oauth").await,
        Err(e) => {
            tracing::error!(error = %e, "OAuth code exchange failed");
            let code = match e {
                // The backend answered but no usable session came out of it
                crate::identity::IdentityError::MissingSession
                | crate::identity::IdentityError::Parse(_) => "no_session",
                _ => "callback_failed",
            };
            Redirect::to(&format!("/signin?error={code}")).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_random_string_length_and_charset() {
        let s = generate_random_string(64);
        assert_eq!(s.len(), 64);
        assert!(s.chars().all(char::is_alphanumeric));
    }

    #[test]
    fn test_code_challenge_is_base64url() {
        // SHA-256 is 32 bytes -> 43 base64url chars without padding
        let challenge = code_challenge("some-verifier");
        assert_eq!(challenge.len(), 43);
        assert!(!challenge.contains('='));
        assert!(!challenge.contains('+'));
        assert!(!challenge.contains('/'));
    }

    #[test]
    fn test_code_challenge_is_deterministic() {
        assert_eq!(code_challenge("v"), code_challenge("v"));
        assert_ne!(code_challenge("v"), code_challenge("w"));
    }
}

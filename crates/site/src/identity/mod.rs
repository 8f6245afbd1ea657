//! Hosted identity backend client.
//!
//! The site does not implement authentication itself - token issuance,
//! password hashing, and the OAuth handshake all live in the hosted identity
//! backend. This module wraps the slice of its REST surface the site
//! consumes:
//!
//! - password sign-in (`POST /auth/v1/token?grant_type=password`)
//! - sign-up (`POST /auth/v1/signup`)
//! - OAuth authorization redirect (`GET /auth/v1/authorize`)
//! - PKCE code exchange (`POST /auth/v1/token?grant_type=pkce`)
//! - session refresh (`POST /auth/v1/token?grant_type=refresh_token`)
//! - sign-out (`POST /auth/v1/logout`)
//! - current user (`GET /auth/v1/user`)

mod backend;
mod client;
mod types;

pub use backend::ClientBackend;
pub use client::IdentityClient;
pub use types::{Session, SignUpOutcome, User, UserMetadata};

use thiserror::Error;

/// Errors that can occur when talking to the identity backend.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned an error response.
    ///
    /// The message is the backend's own wording; forms display it verbatim.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A success response did not carry the expected session.
    #[error("identity response did not include a session")]
    MissingSession,

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_backend_message() {
        let err = IdentityError::Api {
            status: 400,
            message: "Invalid login credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[test]
    fn test_missing_session_display() {
        assert_eq!(
            IdentityError::MissingSession.to_string(),
            "identity response did not include a session"
        );
    }
}

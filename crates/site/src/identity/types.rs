//! Types returned by the identity backend.
//!
//! These mirror the backend's wire shapes. The backend owns the data; the
//! site treats everything here as read-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hydron_core::UserId;

/// A session issued by the identity backend.
///
/// The token bundle is opaque to this layer: the site stores it, attaches the
/// access token to user-scoped requests, and hands the refresh token back to
/// the backend when it is time to renew. Serialized into the cookie-backed
/// server session.
///
/// Implements `Debug` manually to redact both tokens.
#[derive(Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for user-scoped backend calls.
    pub access_token: String,
    /// Token type, always `bearer` in practice.
    pub token_type: String,
    /// Lifetime of the access token in seconds.
    pub expires_in: i64,
    /// Unix timestamp at which the access token expires.
    #[serde(default)]
    pub expires_at: Option<i64>,
    /// Token used to obtain a fresh session.
    pub refresh_token: String,
    /// The authenticated user.
    pub user: User,
}

impl Session {
    /// Seconds until the access token expires, if the backend reported an
    /// absolute expiry. Negative when already expired.
    #[must_use]
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expires_at.map(|at| at - now.timestamp())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .field("refresh_token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

/// A user record from the identity backend. Read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Backend-issued user id.
    pub id: UserId,
    /// The user's email address, when known.
    #[serde(default)]
    pub email: Option<String>,
    /// Free-form metadata attached at sign-up (e.g., full name).
    #[serde(default)]
    pub user_metadata: UserMetadata,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Linked identities (password, OAuth providers).
    ///
    /// The backend reports an existing account as a user with no identities
    /// when sign-up is repeated for a registered email.
    #[serde(default)]
    pub identities: Option<Vec<UserIdentity>>,
}

/// Metadata the user supplied at sign-up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
}

/// A single linked identity. Only its presence matters to this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    #[serde(default)]
    pub provider: Option<String>,
}

/// Outcome of a sign-up request.
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    /// The backend issued a session right away; the user is signed in.
    Active(Session),
    /// The account was created but needs email confirmation first.
    ConfirmationPending(User),
    /// The email is already registered.
    AlreadyRegistered,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user_json() -> serde_json::Value {
        serde_json::json!({
            "id": Uuid::new_v4(),
            "email": "user@example.com",
            "user_metadata": { "full_name": "Test User" },
            "created_at": "2026-01-15T10:30:00Z",
            "identities": [{ "provider": "email" }]
        })
    }

    #[test]
    fn test_session_debug_redacts_tokens() {
        let session: Session = serde_json::from_value(serde_json::json!({
            "access_token": "very-secret-access-token",
            "token_type": "bearer",
            "expires_in": 3600,
            "expires_at": 1_900_000_000i64,
            "refresh_token": "very-secret-refresh-token",
            "user": user_json(),
        }))
        .unwrap();

        let debug_output = format!("{session:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("very-secret-access-token"));
        assert!(!debug_output.contains("very-secret-refresh-token"));
    }

    #[test]
    fn test_user_parses_without_optional_fields() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "created_at": "2026-01-15T10:30:00Z",
        }))
        .unwrap();

        assert!(user.email.is_none());
        assert!(user.user_metadata.full_name.is_none());
        assert!(user.identities.is_none());
    }

    #[test]
    fn test_seconds_until_expiry() {
        let session: Session = serde_json::from_value(serde_json::json!({
            "access_token": "a",
            "token_type": "bearer",
            "expires_in": 3600,
            "expires_at": 1_000_003_600i64,
            "refresh_token": "r",
            "user": user_json(),
        }))
        .unwrap();

        let now = DateTime::from_timestamp(1_000_000_000, 0).unwrap();
        assert_eq!(session.seconds_until_expiry(now), Some(3600));
    }
}

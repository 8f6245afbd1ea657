//! Session-stored types.
//!
//! Types stored in the cookie-backed server session for authentication state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hydron_core::UserId;

use crate::identity::Session as IdentitySession;

/// Session-stored user identity.
///
/// The display slice of the identity backend's user record, kept alongside
/// the token bundle so pages render without a backend round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Backend-issued user id.
    pub id: UserId,
    /// The user's email address.
    pub email: String,
    /// Full name from sign-up metadata, when given.
    pub full_name: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl CurrentUser {
    /// Extract the display fields from an identity session.
    #[must_use]
    pub fn from_identity(session: &IdentitySession) -> Self {
        Self {
            id: session.user.id,
            email: session.user.email.clone().unwrap_or_default(),
            full_name: session.user.user_metadata.full_name.clone(),
            created_at: session.user.created_at,
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for the current logged-in user's display data.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the identity backend's session token bundle.
    pub const IDENTITY_SESSION: &str = "identity_session";

    /// Key for the PKCE verifier during an OAuth round trip.
    pub const PKCE_VERIFIER: &str = "pkce_verifier";
}

//! The session backend interface.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::identity::{IdentityError, Session};

/// A change to the current session, as reported by the backend.
#[derive(Debug, Clone)]
pub enum SessionChange {
    /// A session was established (sign-in, sign-up, OAuth completion).
    SignedIn(Session),
    /// The backend rotated the token bundle.
    Refreshed(Session),
    /// The session ended (sign-out or expiry).
    SignedOut,
}

/// Source of session state and session-change notifications.
///
/// This is the seam between the session provider and the hosted identity
/// backend: any implementation can stand in, which is how the provider is
/// tested without a network.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Fetch the current session, if any.
    async fn current_session(&self) -> Result<Option<Session>, IdentityError>;

    /// Subscribe to session changes.
    ///
    /// Events must be delivered in the order they occur. The channel closing
    /// means the backend will report no further changes.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<SessionChange>;

    /// Ask the backend to end the current session.
    ///
    /// Callers clear their local state whether or not this succeeds.
    async fn sign_out(&self) -> Result<(), IdentityError>;
}

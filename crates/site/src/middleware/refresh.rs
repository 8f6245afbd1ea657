//! Identity session refresh middleware.
//!
//! The identity backend's access tokens are short-lived. On each request that
//! carries a token bundle, hand it to the production session backend, which
//! exchanges the refresh token when expiry is near; a rotated bundle is
//! written back to the server session. A refused refresh means the backend
//! ended the session, so the local sign-in state is cleared.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

use crate::identity::{ClientBackend, Session as IdentitySession};
use crate::middleware::auth::clear_signed_in;
use crate::models::session_keys;
use crate::session::SessionBackend;
use crate::state::AppState;

/// Refresh the stored identity session when it is close to expiry.
pub async fn refresh_identity_session(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    if let Ok(Some(stored)) = session
        .get::<IdentitySession>(session_keys::IDENTITY_SESSION)
        .await
    {
        let stored_token = stored.access_token.clone();
        let backend = ClientBackend::new(state.identity().clone(), Some(stored));

        match backend.current_session().await {
            Ok(Some(fresh)) => {
                if fresh.access_token != stored_token {
                    if let Err(e) = session
                        .insert(session_keys::IDENTITY_SESSION, &fresh)
                        .await
                    {
                        tracing::error!(error = %e, "failed to store refreshed session");
                    }
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "session refresh refused; signing out locally");
                if let Err(e) = clear_signed_in(&session).await {
                    tracing::error!(error = %e, "failed to clear sign-in state");
                }
            }
        }
    }

    next.run(request).await
}

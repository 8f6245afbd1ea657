//! Authentication extractors.
//!
//! Provides extractors for requiring an authenticated user in route handlers,
//! plus helpers for writing and clearing the signed-in state.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::identity::Session as IdentitySession;
use crate::models::{CurrentUser, session_keys};

/// Extractor that requires an authenticated user.
///
/// If no user is signed in, browsers are redirected to the sign-in page and
/// API requests get a plain 401.
///
/// # Example
///
/// ```rust,ignore
/// async fn account(RequireUser(user): RequireUser) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireUser(pub CurrentUser);

/// Rejection for [`RequireUser`].
pub enum AuthRejection {
    /// Redirect to the sign-in page (for HTML requests).
    RedirectToSignIn,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToSignIn => Redirect::to("/signin").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| {
                if parts.uri.path().starts_with("/api/") {
                    AuthRejection::Unauthorized
                } else {
                    AuthRejection::RedirectToSignIn
                }
            })?;

        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike [`RequireUser`], this does not reject the request when nobody is
/// signed in.
pub struct OptionalUser(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Store the signed-in state after a successful authentication.
///
/// Writes both the display user and the identity backend's token bundle.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_signed_in(
    session: &Session,
    identity_session: &IdentitySession,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(
            session_keys::CURRENT_USER,
            &CurrentUser::from_identity(identity_session),
        )
        .await?;
    session
        .insert(session_keys::IDENTITY_SESSION, identity_session)
        .await
}

/// Clear the signed-in state (sign-out).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_signed_in(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    session
        .remove::<IdentitySession>(session_keys::IDENTITY_SESSION)
        .await?;
    Ok(())
}

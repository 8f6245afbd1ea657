//! Authentication route handlers.
//!
//! Sign-in, sign-up, and sign-out against the hosted identity backend. Each
//! form submission is one `idle -> submitting -> {redirect | error}` cycle;
//! failures re-render the form with the backend's message inline.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::identity::{Session as IdentitySession, SignUpOutcome};
use crate::middleware::{OptionalUser, clear_signed_in, set_signed_in};
use crate::models::session_keys;
use crate::state::AppState;

/// Minimum password length, enforced form-side before the backend sees it.
const MIN_PASSWORD_LENGTH: usize = 6;

// =============================================================================
// Form and Query Types
// =============================================================================

/// Sign-in form data.
#[derive(Debug, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

/// Sign-up form data.
#[derive(Debug, Deserialize)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
}

/// Query parameters for error display on the sign-in page.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Sign-in page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signin.html")]
pub struct SignInTemplate {
    pub error: Option<String>,
}

/// Sign-up page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignUpTemplate {
    pub error: Option<String>,
}

/// Post-sign-up page shown while email confirmation is pending.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup_pending.html")]
pub struct SignUpPendingTemplate {
    pub email: String,
}

// =============================================================================
// Error Code Mapping
// =============================================================================

/// Map a backend error query code to a user-readable message.
///
/// Unknown codes are shown as received - the extractor has already
/// percent-decoded them - rather than dropped.
fn friendly_error_message(code: &str) -> String {
    match code {
        "no_code" => "Sign-in was cancelled or the link expired. Please try again.".to_string(),
        "no_session" => "Failed to create session. Please try again.".to_string(),
        "callback_failed" => "Sign-in failed. Please try again.".to_string(),
        "auth_failed" => "Authentication failed. Please try again.".to_string(),
        "oauth_failed" => "Google sign-in failed. Please try again.".to_string(),
        other => other.to_string(),
    }
}

// =============================================================================
// Sign-In Routes
// =============================================================================

/// Display the sign-in page.
///
/// An already-signed-in visitor is sent straight to the account page instead
/// of being offered the form again.
pub async fn signin_page(
    OptionalUser(user): OptionalUser,
    Query(query): Query<MessageQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/account").into_response();
    }

    SignInTemplate {
        error: query.error.as_deref().map(friendly_error_message),
    }
    .into_response()
}

/// Handle sign-in form submission.
///
/// Requests password authentication from the identity backend; on success the
/// session token bundle lands in the server session and the browser moves to
/// the account page.
pub async fn signin(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignInForm>,
) -> Response {
    match state
        .identity()
        .sign_in_with_password(form.email.trim(), &form.password)
        .await
    {
        Ok(identity_session) => {
            signed_in_response(&session, &identity_session, "sign-in").await
        }
        Err(e) => {
            tracing::warn!(error = %e, "sign-in failed");
            SignInTemplate {
                error: Some(e.to_string()),
            }
            .into_response()
        }
    }
}

// =============================================================================
// Sign-Up Routes
// =============================================================================

/// Display the sign-up page.
pub async fn signup_page(OptionalUser(user): OptionalUser) -> Response {
    if user.is_some() {
        return Redirect::to("/account").into_response();
    }

    SignUpTemplate { error: None }.into_response()
}

/// Handle sign-up form submission.
///
/// Three outcomes, decided by the backend: an immediately-active session
/// (redirect to account), a confirmation-pending account (informational
/// page, no redirect), or an already-registered email (inline message).
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignUpForm>,
) -> Response {
    let email = form.email.trim();

    if form.password.len() < MIN_PASSWORD_LENGTH {
        return SignUpTemplate {
            error: Some(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters."
            )),
        }
        .into_response();
    }

    match state.identity().sign_up(email, &form.password).await {
        Ok(SignUpOutcome::Active(identity_session)) => {
            signed_in_response(&session, &identity_session, "sign-up").await
        }
        Ok(SignUpOutcome::ConfirmationPending(user)) => SignUpPendingTemplate {
            email: user.email.unwrap_or_else(|| email.to_string()),
        }
        .into_response(),
        Ok(SignUpOutcome::AlreadyRegistered) => SignUpTemplate {
            error: Some(
                "An account with this email already exists. Please sign in instead.".to_string(),
            ),
        }
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "sign-up failed");
            SignUpTemplate {
                error: Some(e.to_string()),
            }
            .into_response()
        }
    }
}

// =============================================================================
// Sign-Out Route
// =============================================================================

/// Handle sign-out.
///
/// The backend revocation is best-effort; local sign-in state is cleared no
/// matter what so a failed remote call cannot leave stale credentials.
pub async fn signout(State(state): State<AppState>, session: Session) -> Response {
    if let Ok(Some(identity_session)) = session
        .get::<IdentitySession>(session_keys::IDENTITY_SESSION)
        .await
    {
        if let Err(e) = state
            .identity()
            .sign_out(&identity_session.access_token)
            .await
        {
            tracing::warn!(error = %e, "backend sign-out failed; clearing local session anyway");
        }
    }

    if let Err(e) = clear_signed_in(&session).await {
        tracing::error!(error = %e, "failed to clear sign-in state");
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!(error = %e, "failed to flush session");
    }

    clear_sentry_user();

    Redirect::to("/signin").into_response()
}

// =============================================================================
// Shared
// =============================================================================

/// Store the signed-in state and redirect to the account page.
pub(crate) async fn signed_in_response(
    session: &Session,
    identity_session: &IdentitySession,
    flow: &str,
) -> Response {
    if let Err(e) = set_signed_in(session, identity_session).await {
        tracing::error!(error = %e, flow, "failed to store session");
        return Redirect::to("/signin?error=auth_failed").into_response();
    }

    set_sentry_user(
        &identity_session.user.id,
        identity_session.user.email.as_deref(),
    );

    Redirect::to("/account").into_response()
}

//! Integration tests for Hydron Marketing.
//!
//! Router-level tests: each test builds the real application router and
//! drives it in process with `tower::ServiceExt::oneshot` - no sockets, no
//! network, fake implementations at the trait seams.
//!
//! # Test Categories
//!
//! - `site_pages` - Marketing page routes
//! - `site_auth` - Sign-in / sign-up / account gating
//! - `order_flow` - Order confirmation emails end to end
//!
//! The helpers here construct a site whose identity backend is never reached:
//! the tests only exercise paths that stay local (page rendering, session
//! gating, redirects, error-code mapping).

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::{Router, http::header, routing::get};
use chrono::{TimeZone, Utc};
use secrecy::SecretString;
use tower::ServiceExt;
use tower_sessions::Session;
use uuid::Uuid;

use hydron_core::UserId;
use hydron_site::config::{IdentityConfig, SiteConfig};
use hydron_site::middleware::create_session_layer;
use hydron_site::models::{CurrentUser, session_keys};
use hydron_site::state::AppState;

/// Route the seeded test app uses to establish a signed-in session.
pub const SEED_ROUTE: &str = "/test/seed-session";

/// A site configuration that points at an unreachable identity backend.
///
/// Tests that would hit the backend do not belong in this crate.
#[must_use]
pub fn site_config() -> SiteConfig {
    SiteConfig {
        host: "127.0.0.1".parse().expect("valid test address"),
        port: 0,
        base_url: "http://localhost".to_string(),
        base_path: String::new(),
        identity: IdentityConfig {
            base_url: "http://identity.invalid".to_string(),
            publishable_key: SecretString::from("pk-test-0000"),
        },
        sentry_dsn: None,
    }
}

/// The user every seeded session signs in as.
#[must_use]
pub fn test_user() -> CurrentUser {
    CurrentUser {
        id: UserId::new(Uuid::from_u128(0x1234_5678_9abc_def0)),
        email: "seeded@example.com".to_string(),
        full_name: Some("Seeded User".to_string()),
        created_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).single().expect("valid date"),
    }
}

/// The full production site router.
#[must_use]
pub fn site_app() -> Router {
    hydron_site::app(AppState::new(site_config()))
}

/// The site router plus a test-only route that seeds a signed-in session.
///
/// The seed route writes only the display user, not an identity token
/// bundle, so sign-out never attempts a backend call.
#[must_use]
pub fn seeded_site_app() -> Router {
    let state = AppState::new(site_config());
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route(SEED_ROUTE, get(seed_session))
        .merge(hydron_site::routes::routes())
        .layer(session_layer)
        .with_state(state)
}

async fn seed_session(session: Session) -> &'static str {
    session
        .insert(session_keys::CURRENT_USER, &test_user())
        .await
        .expect("session insert succeeds");
    "seeded"
}

/// Establish a signed-in session against `app` and return its cookie.
///
/// # Panics
///
/// Panics if the seed route does not answer with a session cookie; only
/// meaningful against [`seeded_site_app`].
pub async fn signed_in_cookie(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .uri(SEED_ROUTE)
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("seed request succeeds");

    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(ToString::to_string)
        .expect("seed response sets a session cookie")
}

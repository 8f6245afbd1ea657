//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to /uk
//! GET  /health                 - Health check
//! GET  /{region}               - Region home page (uk, us)
//! GET  /{region}/pricing       - Region pricing page
//!
//! # Auth
//! GET  /signin                 - Sign-in page (redirects to /account if signed in)
//! POST /signin                 - Sign-in action
//! GET  /signup                 - Sign-up page (redirects to /account if signed in)
//! POST /signup                 - Sign-up action
//! POST /auth/signout           - Sign-out action
//!
//! # OAuth
//! GET  /auth/oauth/{provider}  - Redirect to the identity backend's OAuth page
//! GET  /auth/callback          - Handle the OAuth callback
//!
//! # Account (requires auth)
//! GET  /account                - Account page
//! ```

pub mod account;
pub mod auth;
pub mod home;
pub mod oauth;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware;
use crate::state::AppState;

/// Create the auth routes router.
///
/// Rate limited per IP: these endpoints relay credentials to the identity
/// backend.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signin", get(auth::signin_page).post(auth::signin))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/auth/signout", post(auth::signout))
        .route("/auth/oauth/{provider}", get(oauth::start))
        .route("/auth/callback", get(oauth::callback))
        .layer(middleware::auth_rate_limiter())
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new().route("/", get(account::index))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::root))
        .route("/{region}", get(home::region_home))
        .route("/{region}/pricing", get(home::region_pricing))
        .nest("/account", account_routes())
        .merge(auth_routes())
}

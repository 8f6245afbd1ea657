//! Hydron Marketing site library.
//!
//! This crate provides the site functionality as a library, allowing the
//! router to be exercised in tests without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod content;
pub mod error;
pub mod filters;
pub mod identity;
pub mod middleware;
pub mod models;
pub mod redirect;
pub mod routes;
pub mod session;
pub mod state;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Build the full application router.
///
/// Includes all page routes, the health check, the session layer, and the
/// security headers middleware. The caller adds process-wide layers (Sentry)
/// and serves the result.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::refresh_identity_session,
        ))
        .layer(session_layer)
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

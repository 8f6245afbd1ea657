//! HTTP middleware stack for the site.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. Session layer (tower-sessions, in-memory store)
//! 3. Identity session refresh
//! 4. Security headers
//! 5. Rate limiting on auth routes (governor)

pub mod auth;
pub mod rate_limit;
pub mod refresh;
pub mod security_headers;
pub mod session;

pub use auth::{OptionalUser, RequireUser, clear_signed_in, set_signed_in};
pub use rate_limit::auth_rate_limiter;
pub use refresh::refresh_identity_session;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;

//! OAuth callback URL construction.
//!
//! The callback URL registered with the identity backend must be identical
//! across environments that serve the site under different path prefixes
//! (domain root in production, a `/marketing`-style prefix on preview
//! deployments), so it is computed from the configured origin and base path
//! rather than hard-coded.

/// Fixed route the identity backend redirects back to after OAuth.
pub const CALLBACK_ROUTE: &str = "/auth/callback";

/// Normalize a deployment path prefix.
///
/// An empty prefix stays empty; otherwise the result has a leading slash and
/// no trailing slash.
#[must_use]
pub fn normalize_base_path(base_path: &str) -> String {
    if base_path.is_empty() || base_path == "/" {
        return String::new();
    }

    let with_leading = if base_path.starts_with('/') {
        base_path.to_string()
    } else {
        format!("/{base_path}")
    };

    with_leading.trim_end_matches('/').to_string()
}

/// Build the absolute OAuth callback URL for this deployment.
#[must_use]
pub fn build_redirect_to(origin: &str, base_path: &str) -> String {
    format!(
        "{}{}{CALLBACK_ROUTE}",
        origin.trim_end_matches('/'),
        normalize_base_path(base_path)
    )
}

//! Account route handlers.
//!
//! These routes require authentication; unauthenticated visitors are
//! redirected to sign-in by the `RequireUser` extractor.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};

use crate::filters;
use crate::middleware::RequireUser;

/// Account page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountTemplate {
    pub email: String,
    pub user_id: String,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Display the account page.
pub async fn index(RequireUser(user): RequireUser) -> impl IntoResponse {
    AccountTemplate {
        email: user.email,
        user_id: user.id.to_string(),
        full_name: user.full_name,
        created_at: user.created_at,
    }
}

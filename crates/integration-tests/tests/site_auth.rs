//! Sign-in / sign-up gating, error-code display, and the account page.
//!
//! These paths never reach the identity backend: they are decided entirely by
//! the server session and the URL.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use tower::ServiceExt;

use hydron_integration_tests::{seeded_site_app, signed_in_cookie};

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

// ============================================================================
// Form Pages
// ============================================================================

#[tokio::test]
async fn signin_page_renders_form() {
    let app = seeded_site_app();
    let response = app.oneshot(get("/signin")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("<form method=\"post\" action=\"/signin\">"));
    assert!(body.contains("Continue with Google"));
}

#[tokio::test]
async fn known_error_code_shows_fixed_message() {
    let app = seeded_site_app();
    let response = app.oneshot(get("/signin?error=no_code")).await.unwrap();

    let body = body_text(response).await;
    assert!(body.contains("Sign-in was cancelled or the link expired."));
}

#[tokio::test]
async fn unknown_error_code_is_shown_decoded() {
    let app = seeded_site_app();
    let response = app
        .oneshot(get("/signin?error=Rate%20limit%20exceeded"))
        .await
        .unwrap();

    let body = body_text(response).await;
    assert!(body.contains("Rate limit exceeded"));
}

// ============================================================================
// Already-Signed-In Guard
// ============================================================================

#[tokio::test]
async fn signed_in_visitor_skips_signin_form() {
    let app = seeded_site_app();
    let cookie = signed_in_cookie(&app).await;

    let response = app
        .oneshot(get_with_cookie("/signin", &cookie))
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/account");
}

#[tokio::test]
async fn signed_in_visitor_skips_signup_form() {
    let app = seeded_site_app();
    let cookie = signed_in_cookie(&app).await;

    let response = app
        .oneshot(get_with_cookie("/signup", &cookie))
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/account");
}

// ============================================================================
// Account Page Gate
// ============================================================================

#[tokio::test]
async fn account_redirects_unauthenticated_visitors() {
    let app = seeded_site_app();
    let response = app.oneshot(get("/account")).await.unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/signin");
}

#[tokio::test]
async fn account_renders_profile_when_signed_in() {
    let app = seeded_site_app();
    let cookie = signed_in_cookie(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/account", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("seeded@example.com"));
    assert!(body.contains("Seeded User"));
    assert!(body.contains("15 January 2026"));
}

// ============================================================================
// Sign-Out
// ============================================================================

#[tokio::test]
async fn signout_clears_session_and_redirects() {
    let app = seeded_site_app();
    let cookie = signed_in_cookie(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/auth/signout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/signin");

    // The old cookie no longer authenticates anything.
    let response = app
        .oneshot(get_with_cookie("/account", &cookie))
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/signin");
}

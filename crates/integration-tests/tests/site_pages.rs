//! Marketing page routes.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use hydron_integration_tests::site_app;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn health_check_responds() {
    let response = site_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn root_redirects_to_uk() {
    let response = site_app().oneshot(get("/")).await.unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/uk");
}

#[tokio::test]
async fn region_home_renders_regional_pricing() {
    let response = site_app().oneshot(get("/uk")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Hydron Marketing UK"));
    assert!(body.contains("£199.00"));

    let response = site_app().oneshot(get("/us")).await.unwrap();
    let body = body_text(response).await;
    assert!(body.contains("Hydron Marketing USA"));
    assert!(body.contains("$249.00"));
}

#[tokio::test]
async fn pricing_page_lists_all_tiers() {
    let response = site_app().oneshot(get("/uk/pricing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Template Website"));
    assert!(body.contains("Custom Website"));
    assert!(body.contains("Small Ecommerce Starter"));
}

#[tokio::test]
async fn unknown_region_is_not_found() {
    let response = site_app().oneshot(get("/eu")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let response = site_app().oneshot(get("/uk")).await.unwrap();
    let headers = response.headers();

    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert!(headers.contains_key("content-security-policy"));
}

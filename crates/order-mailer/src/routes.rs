//! The order-confirmation request handler.
//!
//! One stateless route: accept an order record, render the confirmation
//! document once, send it to the customer and to the business. The customer
//! send is mandatory; the business copy is best-effort.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderName, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use askama::Template;
use chrono::Utc;
use tower_http::cors::{Any, CorsLayer};

use hydron_core::Email;

use crate::email::{OrderConfirmationEmail, OrderData, confirmation_subject};
use crate::mailer::{EmailMessage, Mailer};

/// Shared state for the mailer routes.
#[derive(Clone)]
pub struct MailerState {
    inner: Arc<MailerStateInner>,
}

struct MailerStateInner {
    mailer: Arc<dyn Mailer>,
    from_address: String,
    business_email: Email,
}

impl MailerState {
    /// Create the route state.
    #[must_use]
    pub fn new(mailer: Arc<dyn Mailer>, from_address: String, business_email: Email) -> Self {
        Self {
            inner: Arc::new(MailerStateInner {
                mailer,
                from_address,
                business_email,
            }),
        }
    }
}

/// Build the mailer application router.
pub fn app(state: MailerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/send-order-confirmation", post(send_order_confirmation))
        .layer(cors_layer())
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// CORS for the checkout page, which posts here from the site's origin.
///
/// The layer also answers `OPTIONS` preflight requests itself.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}

/// Handle an order confirmation request.
///
/// # Route
///
/// `POST /send-order-confirmation`
#[tracing::instrument(skip_all, fields(package = %order.package_name))]
pub async fn send_order_confirmation(
    State(state): State<MailerState>,
    Json(order): Json<OrderData>,
) -> Response {
    if order.validate().is_err() {
        return error_response(StatusCode::BAD_REQUEST, "Missing required fields");
    }

    let Ok(customer_email) = Email::parse(order.customer_email.trim()) else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid customer email address");
    };

    let today = Utc::now().date_naive();
    let document = OrderConfirmationEmail::new(&order, today, &state.inner.business_email);
    let html = match document.render() {
        Ok(html) => html,
        Err(e) => {
            tracing::error!(error = %e, "failed to render confirmation email");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    let subject = confirmation_subject(order.package_name.trim());

    // The customer must get their confirmation; without it the request failed.
    let customer_message = EmailMessage {
        from: state.inner.from_address.clone(),
        to: customer_email,
        subject: subject.clone(),
        html: html.clone(),
    };
    if let Err(e) = state.inner.mailer.send(&customer_message).await {
        tracing::error!(error = %e, "failed to send customer email");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send customer email");
    }

    // The business copy is best-effort.
    let business_message = EmailMessage {
        from: state.inner.from_address.clone(),
        to: state.inner.business_email.clone(),
        subject: format!("New Order: {subject}"),
        html,
    };
    if let Err(e) = state.inner.mailer.send(&business_message).await {
        tracing::warn!(error = %e, "failed to send business notification");
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "message": "Confirmation emails sent successfully",
        })),
    )
        .into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::mailer::MailerError;

    /// Records every send; fails sends to addresses on the reject list.
    struct FakeMailer {
        sent: Mutex<Vec<EmailMessage>>,
        reject: Vec<String>,
    }

    impl FakeMailer {
        fn new() -> Arc<Self> {
            Self::rejecting(&[])
        }

        fn rejecting(addresses: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                reject: addresses.iter().map(ToString::to_string).collect(),
            })
        }

        fn sent(&self) -> Vec<EmailMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for FakeMailer {
        async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
            if self.reject.iter().any(|a| a == message.to.as_str()) {
                return Err(MailerError::Api {
                    status: 500,
                    message: "delivery refused".to_string(),
                });
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn test_app(mailer: Arc<FakeMailer>) -> Router {
        let state = MailerState::new(
            mailer,
            "Hydron Marketing <orders@hydronmarketing.com>".to_string(),
            Email::parse("marketinghydron@gmail.com").unwrap(),
        );
        app(state)
    }

    fn order_json() -> serde_json::Value {
        serde_json::json!({
            "customerName": "Sam Taylor",
            "customerEmail": "sam@example.com",
            "packageName": "Custom Website",
            "price": "349",
            "currencySymbol": "£",
            "region": "uk",
            "hostingMonthlyPrice": "10",
            "hostingIncludedMonths": 3,
        })
    }

    fn post_order(body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/send-order-confirmation")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ORIGIN, "https://hydronmarketing.com")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_field_rejects_and_sends_nothing() {
        let mailer = FakeMailer::new();
        let app = test_app(Arc::clone(&mailer));

        let mut body = order_json();
        body.as_object_mut().unwrap().remove("customerEmail");

        let response = app.oneshot(post_order(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Missing required fields");
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn sends_to_customer_and_business() {
        let mailer = FakeMailer::new();
        let app = test_app(Arc::clone(&mailer));

        let response = app.oneshot(post_order(&order_json())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);

        let customer = &sent[0];
        assert_eq!(customer.to.as_str(), "sam@example.com");
        assert_eq!(
            customer.subject,
            "Order Confirmation - Custom Website - Hydron Marketing"
        );

        let business = &sent[1];
        assert_eq!(business.to.as_str(), "marketinghydron@gmail.com");
        assert_eq!(
            business.subject,
            "New Order: Order Confirmation - Custom Website - Hydron Marketing"
        );

        // Both recipients get the same document.
        assert_eq!(customer.html, business.html);
        assert!(customer.html.contains("Sam Taylor"));
    }

    #[tokio::test]
    async fn customer_send_failure_fails_the_request() {
        let mailer = FakeMailer::rejecting(&["sam@example.com"]);
        let app = test_app(Arc::clone(&mailer));

        let response = app.oneshot(post_order(&order_json())).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Failed to send customer email");
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn business_send_failure_still_succeeds() {
        let mailer = FakeMailer::rejecting(&["marketinghydron@gmail.com"]);
        let app = test_app(Arc::clone(&mailer));

        let response = app.oneshot(post_order(&order_json())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to.as_str(), "sam@example.com");
    }

    #[tokio::test]
    async fn malformed_customer_email_rejects() {
        let mailer = FakeMailer::new();
        let app = test_app(Arc::clone(&mailer));

        let mut body = order_json();
        body["customerEmail"] = serde_json::json!("not-an-email");

        let response = app.oneshot(post_order(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn preflight_allows_cross_origin_post() {
        let app = test_app(FakeMailer::new());

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/send-order-confirmation")
            .header(header::ORIGIN, "https://hydronmarketing.com")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn responses_carry_cors_header() {
        let app = test_app(FakeMailer::new());

        let response = app.oneshot(post_order(&order_json())).await.unwrap();
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
    }
}

//! Hydron order-confirmation mailer.
//!
//! A single-route service: the checkout flow posts an order record here and
//! two confirmation emails go out through the hosted email API. Stateless per
//! invocation; nothing is persisted.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hydron_order_mailer::config::MailerConfig;
use hydron_order_mailer::mailer::ResendMailer;
use hydron_order_mailer::routes::{self, MailerState};

#[tokio::main]
async fn main() {
    // A missing or placeholder email API key refuses startup here - there is
    // no send-less degraded mode.
    let config = MailerConfig::from_env().expect("Failed to load configuration");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hydron_order_mailer=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mailer = ResendMailer::new(&config.api_key).expect("Failed to build email client");
    let state = MailerState::new(
        Arc::new(mailer),
        config.from_address.clone(),
        config.business_email.clone(),
    );

    let addr = config.socket_addr();
    let app = routes::app(state);

    tracing::info!("order mailer listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

//! Production [`SessionBackend`] backed by the identity backend client.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, mpsc};

use crate::identity::client::IdentityClient;
use crate::identity::types::Session;
use crate::identity::IdentityError;
use crate::session::{SessionBackend, SessionChange};

/// Refresh this many seconds before the access token expires.
const REFRESH_MARGIN_SECONDS: i64 = 60;

/// [`SessionBackend`] implementation over [`IdentityClient`].
///
/// Holds the session established for this page load and keeps it fresh: a
/// background loop exchanges the refresh token ahead of expiry and emits
/// [`SessionChange::Refreshed`] events. When the backend refuses a refresh
/// the session is treated as ended and a [`SessionChange::SignedOut`] is
/// emitted.
#[derive(Clone)]
pub struct ClientBackend {
    inner: Arc<ClientBackendInner>,
}

struct ClientBackendInner {
    client: IdentityClient,
    session: Mutex<Option<Session>>,
}

impl ClientBackend {
    /// Create a backend from the client and an optional established session.
    #[must_use]
    pub fn new(client: IdentityClient, session: Option<Session>) -> Self {
        Self {
            inner: Arc::new(ClientBackendInner {
                client,
                session: Mutex::new(session),
            }),
        }
    }
}

#[async_trait]
impl SessionBackend for ClientBackend {
    async fn current_session(&self) -> Result<Option<Session>, IdentityError> {
        let mut guard = self.inner.session.lock().await;

        let Some(session) = guard.clone() else {
            return Ok(None);
        };

        // Hand back the stored session while it has life left; otherwise
        // renew it before anyone sees a dead token.
        let expiring = session
            .seconds_until_expiry(Utc::now())
            .is_some_and(|secs| secs <= REFRESH_MARGIN_SECONDS);

        if !expiring {
            return Ok(Some(session));
        }

        let refreshed = self
            .inner
            .client
            .refresh_session(&session.refresh_token)
            .await?;
        *guard = Some(refreshed.clone());
        Ok(Some(refreshed))
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<SessionChange> {
        let (tx, rx) = mpsc::unbounded_channel();
        let inner = Arc::clone(&self.inner);

        tokio::spawn(async move {
            loop {
                let (refresh_token, wait) = {
                    let guard = inner.session.lock().await;
                    let Some(session) = guard.as_ref() else { break };
                    let Some(until_expiry) = session.seconds_until_expiry(Utc::now()) else {
                        // No absolute expiry reported; nothing to schedule.
                        break;
                    };
                    let wait = (until_expiry - REFRESH_MARGIN_SECONDS).max(0);
                    (session.refresh_token.clone(), wait)
                };

                #[allow(clippy::cast_sign_loss)] // clamped non-negative above
                tokio::time::sleep(std::time::Duration::from_secs(wait as u64)).await;

                match inner.client.refresh_session(&refresh_token).await {
                    Ok(session) => {
                        *inner.session.lock().await = Some(session.clone());
                        if tx.send(SessionChange::Refreshed(session)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "session refresh failed; treating session as ended");
                        *inner.session.lock().await = None;
                        let _ = tx.send(SessionChange::SignedOut);
                        break;
                    }
                }
            }
        });

        rx
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        let session = self.inner.session.lock().await.take();

        match session {
            Some(session) => self.inner.client.sign_out(&session.access_token).await,
            None => Ok(()),
        }
    }
}

//! The session provider.
//!
//! Owns the current `{user, session}` pair for one page load and publishes
//! every transition through a `watch` channel.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::identity::{Session, User};
use crate::session::backend::{SessionBackend, SessionChange};

/// How long the initial session fetch may take before the provider gives up
/// and surfaces a timed-out state. Bounded so the UI is never stuck loading.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(8);

/// Error surfaced through [`AuthState`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthStateError {
    /// The initial session fetch did not resolve within the load timeout.
    #[error("session fetch timed out")]
    TimedOut,
    /// The backend reported an error during the initial fetch.
    #[error("{0}")]
    Backend(String),
}

/// Published session state.
///
/// `loading` is true from construction until the initial session is resolved,
/// then false for the rest of the provider's life - it never reverts.
#[derive(Debug, Clone)]
pub struct AuthState {
    /// The authenticated user, when a session is current.
    pub user: Option<User>,
    /// The current session token bundle.
    pub session: Option<Session>,
    /// Whether the initial session fetch is still outstanding.
    pub loading: bool,
    /// Error from the initial fetch, if it failed or timed out.
    pub error: Option<AuthStateError>,
}

impl AuthState {
    const fn initial() -> Self {
        Self {
            user: None,
            session: None,
            loading: true,
            error: None,
        }
    }

    /// True once a user has been established.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Single writer of the current `{user, session}` pair.
///
/// On construction the provider spawns one listener task that resolves the
/// initial session and then applies backend change notifications in arrival
/// order. The task stops publishing once [`SessionProvider::shutdown`] runs
/// (or the provider is dropped), so a torn-down view is never updated.
pub struct SessionProvider {
    backend: Arc<dyn SessionBackend>,
    state: watch::Sender<AuthState>,
    alive: Arc<AtomicBool>,
    listener: JoinHandle<()>,
}

impl SessionProvider {
    /// Spawn a provider with the default load timeout.
    #[must_use]
    pub fn spawn(backend: Arc<dyn SessionBackend>) -> Self {
        Self::spawn_with_timeout(backend, DEFAULT_LOAD_TIMEOUT)
    }

    /// Spawn a provider with an explicit load timeout.
    #[must_use]
    pub fn spawn_with_timeout(backend: Arc<dyn SessionBackend>, load_timeout: Duration) -> Self {
        let (state, _) = watch::channel(AuthState::initial());
        let alive = Arc::new(AtomicBool::new(true));

        let listener = tokio::spawn(run_listener(
            Arc::clone(&backend),
            state.clone(),
            Arc::clone(&alive),
            load_timeout,
        ));

        Self {
            backend,
            state,
            alive,
            listener,
        }
    }

    /// Subscribe to session state. Receivers see the latest state immediately
    /// and every subsequent transition.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Sign out.
    ///
    /// Asks the backend to end the session, then clears local state. The
    /// local clear is unconditional: a failed remote sign-out must not leave
    /// stale credentials behind.
    pub async fn sign_out(&self) {
        if let Err(e) = self.backend.sign_out().await {
            tracing::warn!(error = %e, "backend sign-out failed; clearing local session anyway");
        }

        publish(&self.alive, &self.state, |state| {
            state.user = None;
            state.session = None;
        });
    }

    /// Stop publishing and tear down the listener task.
    pub fn shutdown(&self) {
        self.alive.store(false, Ordering::SeqCst);
        self.listener.abort();
    }
}

impl Drop for SessionProvider {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Apply a state update unless the provider has been shut down.
fn publish(
    alive: &AtomicBool,
    state: &watch::Sender<AuthState>,
    update: impl FnOnce(&mut AuthState),
) {
    if alive.load(Ordering::SeqCst) {
        state.send_modify(update);
    }
}

/// Listener task: resolve the initial session, then apply change events in
/// the order they arrive.
async fn run_listener(
    backend: Arc<dyn SessionBackend>,
    state: watch::Sender<AuthState>,
    alive: Arc<AtomicBool>,
    load_timeout: Duration,
) {
    let mut events = backend.subscribe();

    let fetch = backend.current_session();
    tokio::pin!(fetch);

    let deadline = tokio::time::sleep(load_timeout);
    tokio::pin!(deadline);

    // The first of {fetch result, first event, deadline} resolves the initial
    // load; the guards below cancel the other two.
    let mut resolved = false;

    loop {
        tokio::select! {
            result = &mut fetch, if !resolved => {
                resolved = true;
                match result {
                    Ok(session) => publish(&alive, &state, |s| {
                        s.loading = false;
                        s.user = session.as_ref().map(|sess| sess.user.clone());
                        s.session = session;
                    }),
                    Err(e) => {
                        tracing::warn!(error = %e, "initial session fetch failed");
                        publish(&alive, &state, |s| {
                            s.loading = false;
                            s.error = Some(AuthStateError::Backend(e.to_string()));
                        });
                    }
                }
            }
            () = &mut deadline, if !resolved => {
                resolved = true;
                tracing::warn!(timeout = ?load_timeout, "session fetch did not resolve in time");
                publish(&alive, &state, |s| {
                    s.loading = false;
                    s.error = Some(AuthStateError::TimedOut);
                });
            }
            event = events.recv() => {
                let Some(change) = event else { break };
                resolved = true;
                publish(&alive, &state, |s| apply_change(s, change));
            }
        }
    }
}

/// Apply one backend notification. Any notification also resolves loading.
fn apply_change(state: &mut AuthState, change: SessionChange) {
    state.loading = false;
    state.error = None;

    match change {
        SessionChange::SignedIn(session) | SessionChange::Refreshed(session) => {
            state.user = Some(session.user.clone());
            state.session = Some(session);
        }
        SessionChange::SignedOut => {
            state.user = None;
            state.session = None;
        }
    }
}

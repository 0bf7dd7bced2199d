//! Authenticated request pipeline with transparent token refresh.
//!
//! Every outbound API call goes through [`AuthGateway::request`], which
//! attaches the current access token and handles authorization failures:
//! at most one refresh network call is ever in flight, concurrent callers
//! queue behind it in arrival order, each original call is retried at most
//! once, and an unrecoverable refresh ends the session with a single
//! debounced `unauthorized` signal.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::domain::Credential;

use super::store::CredentialStore;

/// Default window inside which repeated session-expiry signals collapse
/// into one.
pub const DEFAULT_UNAUTHORIZED_DEBOUNCE: Duration = Duration::from_millis(500);

/// Errors from a token refresh attempt. Every variant ends the session;
/// the refresh call itself is never retried.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// The refresh endpoint rejected the refresh token.
    #[error("refresh token rejected")]
    Denied,

    /// The refresh call failed before producing a usable credential.
    #[error("refresh request failed: {0}")]
    Transport(String),

    /// The refresh endpoint answered with an unusable body.
    #[error("malformed refresh response: {0}")]
    Malformed(String),
}

/// Exchanges a refresh token for a fresh credential.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self, refresh_token: &str) -> Result<Credential, RefreshError>;
}

/// Anything the gateway can classify as an authorization failure.
///
/// The gateway looks only at this bit; response bodies, envelopes and
/// non-401 errors pass through to the caller untouched. Implemented for
/// [`reqwest::Response`]; test doubles implement it to drive the refresh
/// protocol without a server.
pub trait AuthStatus {
    fn is_unauthorized(&self) -> bool;
}

impl AuthStatus for reqwest::Response {
    fn is_unauthorized(&self) -> bool {
        self.status() == reqwest::StatusCode::UNAUTHORIZED
    }
}

type UnauthorizedListener = Box<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct RefreshState {
    refreshing: bool,
    waiters: Vec<oneshot::Sender<Option<String>>>,
}

/// Wraps every outbound authenticated call.
///
/// Owns the [`Credential`] lifecycle: reads it for each call, replaces it
/// on refresh, clears it when the session is unrecoverable.
pub struct AuthGateway {
    store: Arc<dyn CredentialStore>,
    refresher: Arc<dyn TokenRefresher>,
    state: Mutex<RefreshState>,
    listeners: Vec<UnauthorizedListener>,
    debounce: Duration,
    last_signal: Mutex<Option<Instant>>,
}

impl AuthGateway {
    pub fn new(store: Arc<dyn CredentialStore>, refresher: Arc<dyn TokenRefresher>) -> Self {
        Self {
            store,
            refresher,
            state: Mutex::new(RefreshState::default()),
            listeners: Vec::new(),
            debounce: DEFAULT_UNAUTHORIZED_DEBOUNCE,
            last_signal: Mutex::new(None),
        }
    }

    /// Override the debounce window for the `unauthorized` signal.
    #[must_use]
    pub fn with_debounce_window(mut self, window: Duration) -> Self {
        self.debounce = window;
        self
    }

    /// Register an observer for session expiry. A burst of concurrent
    /// failures reaches each observer once per debounce window.
    #[must_use]
    pub fn on_unauthorized(mut self, listener: impl Fn() + Send + Sync + 'static) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Current access token, if a session exists.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.store.load().map(|c| c.access_token)
    }

    /// Persist a freshly issued credential (login).
    pub fn install_credential(&self, credential: &Credential) -> Result<(), super::StoreError> {
        self.store.store(credential)
    }

    /// Drop the stored credential, ending the local session.
    pub fn clear_credential(&self) -> Result<(), super::StoreError> {
        self.store.clear()
    }

    /// Execute one API call with the current access token attached.
    ///
    /// `call` receives the token to send (or `None` when no session exists,
    /// in which case the call goes out unauthenticated) and performs one
    /// HTTP request. Outcomes:
    ///
    /// - Non-401 responses and transport errors return unchanged, with no
    ///   retry and no interpretation.
    /// - A 401 triggers one coordinated refresh; the call is then retried
    ///   once with the new token and that result is returned as is, even if
    ///   it is another 401.
    /// - If the refresh fails (or no refresh token is stored), the original
    ///   401 response is returned and the session is cleared.
    pub async fn request<R, E, F, Fut>(&self, call: F) -> Result<R, E>
    where
        R: AuthStatus,
        F: Fn(Option<String>) -> Fut,
        Fut: Future<Output = Result<R, E>>,
    {
        let response = call(self.access_token()).await?;
        if !response.is_unauthorized() {
            return Ok(response);
        }

        debug!("request rejected with 401, entering refresh protocol");
        match self.coordinate_refresh().await {
            Some(fresh) => call(Some(fresh)).await,
            None => Ok(response),
        }
    }

    /// Run one coordinated refresh, joining any refresh already in flight.
    ///
    /// Returns `true` when a new access token was obtained. Used by the
    /// proactive scheduler; shares the single-flight state with
    /// 401-triggered refreshes.
    pub async fn refresh_now(&self) -> bool {
        self.coordinate_refresh().await.is_some()
    }

    /// Resolve to the new access token, or `None` when the session ended.
    async fn coordinate_refresh(&self) -> Option<String> {
        let waiter = {
            let mut state = self.state.lock();
            if state.refreshing {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                Some(rx)
            } else {
                state.refreshing = true;
                None
            }
        };

        if let Some(rx) = waiter {
            return rx.await.unwrap_or(None);
        }

        // Leader: a leader dropped mid-refresh must still release the queue.
        let guard = SettleOnDrop { gateway: self, armed: true };
        let outcome = self.run_refresh().await;
        guard.disarm();

        self.settle(outcome.clone());
        if outcome.is_none() {
            if let Err(e) = self.store.clear() {
                warn!(error = %e, "failed to clear credentials");
            }
            self.signal_unauthorized();
        }
        outcome
    }

    async fn run_refresh(&self) -> Option<String> {
        let refresh_token = self
            .store
            .load()
            .map(|c| c.refresh_token)
            .filter(|t| !t.is_empty());
        let Some(refresh_token) = refresh_token else {
            debug!("no refresh token stored, ending session");
            return None;
        };

        match self.refresher.refresh(&refresh_token).await {
            Ok(credential) => {
                let token = credential.access_token.clone();
                if let Err(e) = self.store.store(&credential) {
                    warn!(error = %e, "failed to persist refreshed credential");
                }
                debug!("access token refreshed");
                Some(token)
            }
            Err(e) => {
                warn!(error = %e, "token refresh failed, ending session");
                None
            }
        }
    }

    /// Release every queued waiter exactly once, in arrival order.
    fn settle(&self, token: Option<String>) {
        let waiters = {
            let mut state = self.state.lock();
            state.refreshing = false;
            std::mem::take(&mut state.waiters)
        };
        for waiter in waiters {
            let _ = waiter.send(token.clone());
        }
    }

    fn signal_unauthorized(&self) {
        {
            let mut last = self.last_signal.lock();
            if let Some(at) = *last {
                if at.elapsed() < self.debounce {
                    return;
                }
            }
            *last = Some(Instant::now());
        }
        for listener in &self.listeners {
            listener();
        }
    }
}

struct SettleOnDrop<'a> {
    gateway: &'a AuthGateway,
    armed: bool,
}

impl SettleOnDrop<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for SettleOnDrop<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.gateway.settle(None);
        }
    }
}

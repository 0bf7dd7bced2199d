//! Proactive access-token refresh.
//!
//! Long-running consumers schedule a refresh shortly before the access
//! token expires so their requests rarely observe a 401 at all.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::credential::token_expiry;

use super::gateway::AuthGateway;
use super::store::CredentialStore;

/// Lead time subtracted from the token expiry before refreshing.
pub const DEFAULT_REFRESH_LEAD: Duration = Duration::from_secs(60);

/// Interval used when the token carries no decodable expiry.
pub const DEFAULT_FALLBACK_INTERVAL: Duration = Duration::from_secs(240);

/// Background refresh loop. Idempotent to start, fully cancellable.
///
/// After each successful refresh the next deadline is derived from the new
/// token. The loop ends itself on refresh failure; the gateway has already
/// cleared the session and signalled `unauthorized` by then.
pub struct RefreshScheduler {
    gateway: Arc<AuthGateway>,
    store: Arc<dyn CredentialStore>,
    lead: Duration,
    fallback: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl RefreshScheduler {
    pub fn new(gateway: Arc<AuthGateway>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            gateway,
            store,
            lead: DEFAULT_REFRESH_LEAD,
            fallback: DEFAULT_FALLBACK_INTERVAL,
            task: Mutex::new(None),
        }
    }

    /// Override how long before expiry the refresh runs.
    #[must_use]
    pub fn with_lead(mut self, lead: Duration) -> Self {
        self.lead = lead;
        self
    }

    /// Override the interval used for tokens without a decodable expiry.
    #[must_use]
    pub fn with_fallback_interval(mut self, interval: Duration) -> Self {
        self.fallback = interval;
        self
    }

    /// Start the refresh loop. A second `start` while scheduled is a no-op.
    pub fn start(&self) {
        let mut task = self.task.lock();
        if task.as_ref().is_some_and(|t| !t.is_finished()) {
            return;
        }

        let gateway = Arc::clone(&self.gateway);
        let store = Arc::clone(&self.store);
        let lead = self.lead;
        let fallback = self.fallback;
        *task = Some(tokio::spawn(async move {
            loop {
                let delay = next_delay(store.as_ref(), lead, fallback);
                debug!(delay_secs = delay.as_secs(), "proactive refresh scheduled");
                tokio::time::sleep(delay).await;
                if !gateway.refresh_now().await {
                    debug!("refresh failed, stopping proactive scheduler");
                    break;
                }
            }
        }));
    }

    /// Cancel any pending refresh timer. `start` can be called again later.
    pub fn stop(&self) {
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
    }

    /// Whether a refresh loop is currently scheduled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.lock().as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Time until the next refresh: expiry minus lead for decodable tokens,
/// the fixed fallback otherwise. An already-due deadline yields zero.
fn next_delay(store: &dyn CredentialStore, lead: Duration, fallback: Duration) -> Duration {
    let expiry = store.load().and_then(|c| token_expiry(&c.access_token));
    match expiry {
        Some(expiry) => {
            let until = (expiry - chrono::Utc::now()).to_std().unwrap_or_default();
            until.saturating_sub(lead)
        }
        None => fallback,
    }
}

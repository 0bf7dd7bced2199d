//! Scripted doubles for the auth ports.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};

use crate::auth::{RefreshError, TokenRefresher};
use crate::domain::Credential;

/// Refresher that returns a scripted outcome after an optional delay,
/// counting how many refresh network calls were attempted.
pub struct ScriptedRefresher {
    deny: bool,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedRefresher {
    /// Succeeds every refresh, minting `refreshed-token-N` on the Nth call.
    #[must_use]
    pub fn succeeding() -> Self {
        Self {
            deny: false,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails every refresh with [`RefreshError::Denied`].
    #[must_use]
    pub fn denying() -> Self {
        Self {
            deny: true,
            ..Self::succeeding()
        }
    }

    /// Hold the refresh in flight for a while so concurrent callers can
    /// pile up behind it.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of refresh network calls attempted so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenRefresher for ScriptedRefresher {
    async fn refresh(&self, refresh_token: &str) -> Result<Credential, RefreshError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.deny {
            return Err(RefreshError::Denied);
        }
        Ok(Credential::new(
            format!("refreshed-token-{call}"),
            refresh_token,
        ))
    }
}

/// Unsigned JWT whose payload carries the given expiry, for scheduler tests.
pub fn jwt_expiring_at(expiry: DateTime<Utc>) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(
        r#"{{"sub":"user-1","exp":{}}}"#,
        expiry.timestamp()
    ));
    format!("{header}.{payload}.sig")
}

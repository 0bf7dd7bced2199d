//! Journal REST API client.

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use tracing::{debug, info};
use url::Url;

use crate::auth::AuthGateway;
use crate::domain::TradeRecord;
use crate::error::{ApiError, Result};

use super::types::{ApiEnvelope, LoginRequest, SessionTokens, TradeDto};

/// Thin REST client for the journal backend.
///
/// Every authenticated call goes through the gateway; the response
/// envelope is unwrapped here.
pub struct JournalClient {
    http: Client,
    base_url: Url,
    gateway: Arc<AuthGateway>,
}

impl JournalClient {
    #[must_use]
    pub fn new(http: Client, base_url: Url, gateway: Arc<AuthGateway>) -> Self {
        Self {
            http,
            base_url,
            gateway,
        }
    }

    /// The gateway behind this client.
    #[must_use]
    pub fn gateway(&self) -> &Arc<AuthGateway> {
        &self.gateway
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(Into::into)
    }

    /// Exchange email and password for a session credential and persist it.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let url = self.endpoint("auth/login")?;
        info!("signing in");

        let response = self
            .http
            .post(url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::LoginFailed("invalid email or password".into()).into());
        }
        if !response.status().is_success() {
            return Err(
                ApiError::Rejected(format!("login returned {}", response.status())).into(),
            );
        }

        let envelope: ApiEnvelope<SessionTokens> = response.json().await?;
        let credential = envelope.into_data()?.into_credential(None);
        self.gateway.install_credential(&credential)?;
        Ok(())
    }

    /// End the session. Server-side revocation is best-effort; the local
    /// credential is always cleared.
    pub async fn logout(&self) -> Result<()> {
        if let Some(token) = self.gateway.access_token() {
            let url = self.endpoint("auth/logout")?;
            let _ = self.http.post(url).bearer_auth(token).send().await;
        }
        self.gateway.clear_credential()?;
        Ok(())
    }

    /// Fetch journal trades, optionally restricted to one account.
    pub async fn trades(&self, account: Option<&str>) -> Result<Vec<TradeRecord>> {
        let mut url = self.endpoint("trades")?;
        if let Some(account) = account {
            url.query_pairs_mut().append_pair("accountId", account);
        }

        let http = self.http.clone();
        let response = self
            .gateway
            .request(move |token| {
                let mut request = http.get(url.clone());
                if let Some(token) = token {
                    request = request.bearer_auth(token);
                }
                request.send()
            })
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized.into());
        }
        if !response.status().is_success() {
            return Err(
                ApiError::Rejected(format!("trades returned {}", response.status())).into(),
            );
        }

        let envelope: ApiEnvelope<Vec<TradeDto>> = response.json().await?;
        let trades: Vec<TradeRecord> = envelope
            .into_data()?
            .into_iter()
            .map(TradeRecord::from)
            .collect();
        debug!(count = trades.len(), "fetched trades");
        Ok(trades)
    }
}

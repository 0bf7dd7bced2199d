//! HTTP adapter for the token-refresh endpoint.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::auth::{RefreshError, TokenRefresher};
use crate::domain::Credential;

use super::types::{ApiEnvelope, RefreshRequest, SessionTokens};

/// Refreshes credentials against the journal's refresh endpoint.
///
/// A 401 from this endpoint means the refresh token itself is dead; that
/// is reported as [`RefreshError::Denied`] and ends the session. The
/// refresh call is never routed through the gateway, so it can never
/// trigger a second refresh.
pub struct HttpTokenRefresher {
    http: Client,
    endpoint: Url,
}

impl HttpTokenRefresher {
    #[must_use]
    pub fn new(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }
}

#[async_trait]
impl TokenRefresher for HttpTokenRefresher {
    async fn refresh(&self, refresh_token: &str) -> Result<Credential, RefreshError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
            .map_err(|e| RefreshError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(RefreshError::Denied),
            status if !status.is_success() => Err(RefreshError::Transport(format!(
                "refresh endpoint returned {status}"
            ))),
            _ => {
                let envelope: ApiEnvelope<SessionTokens> = response
                    .json()
                    .await
                    .map_err(|e| RefreshError::Malformed(e.to_string()))?;
                let tokens = envelope
                    .into_data()
                    .map_err(|e| RefreshError::Malformed(e.to_string()))?;
                debug!("refresh endpoint issued a new access token");
                Ok(tokens.into_credential(Some(refresh_token.to_string())))
            }
        }
    }
}

//! Wire types for the journal REST API.
//!
//! Successful bodies arrive wrapped as `{ data, error }`. Unwrapping
//! happens here, not in the gateway, which looks only at HTTP status codes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Credential, Direction, Outcome, TradeRecord, TradeStatus};
use crate::error::ApiError;

/// Standard `{ data, error }` response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap into the payload or the server-reported error.
    pub fn into_data(self) -> Result<T, ApiError> {
        if let Some(message) = self.error {
            return Err(ApiError::Rejected(message));
        }
        self.data
            .ok_or_else(|| ApiError::Malformed("response carried neither data nor error".into()))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Token pair returned by the login and refresh endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl SessionTokens {
    /// Fold into a credential, keeping the previous refresh token when the
    /// server does not rotate it.
    #[must_use]
    pub fn into_credential(self, previous_refresh: Option<String>) -> Credential {
        Credential {
            access_token: self.access_token,
            refresh_token: self
                .refresh_token
                .or(previous_refresh)
                .unwrap_or_default(),
        }
    }
}

/// Trade record as the backend serializes it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeDto {
    pub id: Uuid,
    #[serde(default)]
    pub account_id: Option<String>,
    pub symbol: String,
    pub direction: Direction,
    pub entry_price: Decimal,
    #[serde(default)]
    pub exit_price: Option<Decimal>,
    pub size: Decimal,
    pub entry_date: DateTime<Utc>,
    #[serde(default)]
    pub exit_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pnl: Option<Decimal>,
    #[serde(default)]
    pub risk_reward_ratio: Decimal,
    #[serde(default)]
    pub outcome: Option<Outcome>,
    pub status: TradeStatus,
    #[serde(default)]
    pub strategy: Option<String>,
}

impl From<TradeDto> for TradeRecord {
    fn from(dto: TradeDto) -> Self {
        Self {
            id: dto.id,
            account_id: dto.account_id,
            symbol: dto.symbol,
            direction: dto.direction,
            entry_price: dto.entry_price,
            exit_price: dto.exit_price,
            size: dto.size,
            entry_date: dto.entry_date,
            exit_date: dto.exit_date,
            pnl: dto.pnl,
            risk_reward_ratio: dto.risk_reward_ratio,
            outcome: dto.outcome,
            status: dto.status,
            strategy: dto.strategy,
        }
    }
}

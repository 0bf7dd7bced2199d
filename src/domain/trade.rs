//! Trade records as journaled by the user.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Long,
    Short,
}

/// How a closed trade resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "TP")]
    TakeProfit,
    #[serde(rename = "SL")]
    StopLoss,
    #[serde(rename = "PARTIAL")]
    Partial,
    #[serde(rename = "BREAKEVEN")]
    Breakeven,
}

/// Lifecycle state of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatus {
    Open,
    Closed,
}

/// A single journal entry.
///
/// The statistics engine treats these as an immutable read-only sequence;
/// it never creates or mutates records. Optional fields (`exit_price`,
/// `exit_date`, `pnl`, `outcome`) are absent while a trade is still open or
/// when the journal entry is incomplete; both are expected steady-state
/// conditions, not errors.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub id: Uuid,
    /// Account the trade belongs to. Trades without a resolvable account
    /// are excluded from every aggregate.
    pub account_id: Option<String>,
    pub symbol: String,
    pub direction: Direction,
    pub entry_price: Decimal,
    pub exit_price: Option<Decimal>,
    pub size: Decimal,
    pub entry_date: DateTime<Utc>,
    pub exit_date: Option<DateTime<Utc>>,
    pub pnl: Option<Decimal>,
    pub risk_reward_ratio: Decimal,
    pub outcome: Option<Outcome>,
    pub status: TradeStatus,
    pub strategy: Option<String>,
}

impl TradeRecord {
    /// Realized pnl, treating a missing value as flat.
    #[must_use]
    pub fn realized_pnl(&self) -> Decimal {
        self.pnl.unwrap_or_default()
    }

    /// Holding time in hours, when both entry and exit are known.
    #[must_use]
    pub fn holding_hours(&self) -> Option<f64> {
        self.exit_date
            .map(|exit| (exit - self.entry_date).num_seconds() as f64 / 3600.0)
    }
}

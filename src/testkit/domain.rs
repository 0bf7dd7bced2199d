//! Builders for trade records in tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{Direction, Outcome, TradeRecord, TradeStatus};

/// Fixed reference instant (a Monday, 09:00 UTC) so tests are reproducible.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap()
}

/// A closed long trade with the given pnl, entered at [`base_time`] and
/// held for two hours.
pub fn closed_trade(pnl: i64) -> TradeRecord {
    let pnl = Decimal::from(pnl);
    TradeRecord {
        id: Uuid::new_v4(),
        account_id: Some("acct-1".to_string()),
        symbol: "EURUSD".to_string(),
        direction: Direction::Long,
        entry_price: Decimal::new(10850, 4),
        exit_price: Some(Decimal::new(10920, 4)),
        size: Decimal::ONE,
        entry_date: base_time(),
        exit_date: Some(base_time() + Duration::hours(2)),
        pnl: Some(pnl),
        risk_reward_ratio: Decimal::TWO,
        outcome: Some(if pnl > Decimal::ZERO {
            Outcome::TakeProfit
        } else if pnl < Decimal::ZERO {
            Outcome::StopLoss
        } else {
            Outcome::Breakeven
        }),
        status: TradeStatus::Closed,
        strategy: Some("Breakout".to_string()),
    }
}

/// An open trade with no exit date and no realized pnl.
pub fn open_trade() -> TradeRecord {
    let mut trade = closed_trade(0);
    trade.exit_price = None;
    trade.exit_date = None;
    trade.pnl = None;
    trade.outcome = None;
    trade.status = TradeStatus::Open;
    trade
}

/// A trade with no account mapping; excluded from every aggregate.
pub fn unassigned_trade(pnl: i64) -> TradeRecord {
    let mut trade = closed_trade(pnl);
    trade.account_id = None;
    trade
}

/// Closed trades entered an hour apart, preserving the pnl order.
pub fn trade_sequence(pnls: &[i64]) -> Vec<TradeRecord> {
    pnls.iter()
        .enumerate()
        .map(|(i, pnl)| {
            let mut trade = closed_trade(*pnl);
            trade.entry_date = base_time() + Duration::hours(i as i64);
            trade.exit_date = Some(trade.entry_date + Duration::hours(2));
            trade
        })
        .collect()
}

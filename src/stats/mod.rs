//! Pure aggregation over trade records.
//!
//! Every function here is a total function over its input slice: no I/O,
//! no hidden state, no mutation of caller data, and a documented
//! zero-valued result for empty input. Trades without a resolvable account
//! are skipped by every aggregate, so differently-assembled inputs produce
//! comparable numbers.
//!
//! Drawdown and streak metrics read the input in its given order; callers
//! wanting chronological meaning sort before calling. Everything else is
//! order-independent.

mod buckets;
mod summary;

pub use buckets::{
    distribution_by, group_by_duration, group_by_hour, group_by_weekday, strategy_distribution,
    symbol_distribution, DurationBucket, HourBucket, WeekdayBucket, DURATION_RANGES,
};
pub use summary::{compute_summary, TradeSummary};

use crate::domain::TradeRecord;

/// Whether a trade can be attributed to an account. An absent or empty
/// account identifier keeps the trade out of every aggregate.
fn eligible(trade: &TradeRecord) -> bool {
    trade.account_id.as_deref().is_some_and(|id| !id.is_empty())
}

/// The subset of trades that participate in aggregation.
#[must_use]
pub fn filter_eligible(trades: &[TradeRecord]) -> Vec<TradeRecord> {
    trades.iter().filter(|t| eligible(t)).cloned().collect()
}

//! Per-bucket trade groupings.

use std::collections::BTreeMap;

use chrono::{Datelike, Timelike, Weekday};
use rust_decimal::Decimal;

use crate::domain::TradeRecord;

use super::eligible;

/// Aggregate for one entry-hour bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct HourBucket {
    pub hour: u32,
    pub trades: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub total_pnl: Decimal,
}

/// Aggregate for one entry-weekday bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekdayBucket {
    pub weekday: Weekday,
    pub trades: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub total_pnl: Decimal,
}

/// Win and loss counts for one holding-duration range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationBucket {
    pub label: &'static str,
    pub wins: usize,
    pub losses: usize,
}

/// Fixed holding-duration ranges, labelled in hours.
pub const DURATION_RANGES: [&str; 5] = ["<1h", "1-4h", "4-8h", "8-24h", ">24h"];

/// Group eligible trades by the hour of day they were entered.
///
/// Always returns 24 buckets, hour 0 through 23.
#[must_use]
pub fn group_by_hour(trades: &[TradeRecord]) -> Vec<HourBucket> {
    let mut buckets: Vec<HourBucket> = (0..24)
        .map(|hour| HourBucket {
            hour,
            trades: 0,
            wins: 0,
            win_rate: 0.0,
            total_pnl: Decimal::ZERO,
        })
        .collect();

    for trade in trades.iter().filter(|t| eligible(t)) {
        let bucket = &mut buckets[trade.entry_date.hour() as usize];
        bucket.trades += 1;
        if trade.realized_pnl() > Decimal::ZERO {
            bucket.wins += 1;
        }
        bucket.total_pnl += trade.realized_pnl();
    }

    for bucket in &mut buckets {
        if bucket.trades > 0 {
            bucket.win_rate = bucket.wins as f64 / bucket.trades as f64 * 100.0;
        }
    }
    buckets
}

/// Group eligible trades by entry day of week, Sunday through Saturday.
///
/// Always returns 7 buckets.
#[must_use]
pub fn group_by_weekday(trades: &[TradeRecord]) -> Vec<WeekdayBucket> {
    const WEEK: [Weekday; 7] = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    let mut buckets: Vec<WeekdayBucket> = WEEK
        .into_iter()
        .map(|weekday| WeekdayBucket {
            weekday,
            trades: 0,
            wins: 0,
            win_rate: 0.0,
            total_pnl: Decimal::ZERO,
        })
        .collect();

    for trade in trades.iter().filter(|t| eligible(t)) {
        let slot = trade.entry_date.weekday().num_days_from_sunday() as usize;
        let bucket = &mut buckets[slot];
        bucket.trades += 1;
        if trade.realized_pnl() > Decimal::ZERO {
            bucket.wins += 1;
        }
        bucket.total_pnl += trade.realized_pnl();
    }

    for bucket in &mut buckets {
        if bucket.trades > 0 {
            bucket.win_rate = bucket.wins as f64 / bucket.trades as f64 * 100.0;
        }
    }
    buckets
}

/// Group eligible, date-complete trades into fixed holding-duration
/// ranges. Buckets that collect neither wins nor losses are omitted.
#[must_use]
pub fn group_by_duration(trades: &[TradeRecord]) -> Vec<DurationBucket> {
    let mut counts = [(0usize, 0usize); 5];

    for trade in trades.iter().filter(|t| eligible(t)) {
        let Some(hours) = trade.holding_hours() else {
            continue;
        };
        let slot = match hours {
            h if h < 1.0 => 0,
            h if h < 4.0 => 1,
            h if h < 8.0 => 2,
            h if h < 24.0 => 3,
            _ => 4,
        };
        let pnl = trade.realized_pnl();
        if pnl > Decimal::ZERO {
            counts[slot].0 += 1;
        } else if pnl < Decimal::ZERO {
            counts[slot].1 += 1;
        }
    }

    DURATION_RANGES
        .into_iter()
        .zip(counts)
        .filter(|(_, (wins, losses))| wins + losses > 0)
        .map(|(label, (wins, losses))| DurationBucket {
            label,
            wins,
            losses,
        })
        .collect()
}

/// Count eligible trades by an arbitrary key. Keys come back in sorted
/// order so repeated calls render identically.
pub fn distribution_by<F>(trades: &[TradeRecord], key_fn: F) -> BTreeMap<String, usize>
where
    F: Fn(&TradeRecord) -> String,
{
    let mut counts = BTreeMap::new();
    for trade in trades.iter().filter(|t| eligible(t)) {
        *counts.entry(key_fn(trade)).or_insert(0) += 1;
    }
    counts
}

/// Trade counts per symbol.
#[must_use]
pub fn symbol_distribution(trades: &[TradeRecord]) -> BTreeMap<String, usize> {
    distribution_by(trades, |t| t.symbol.clone())
}

/// Trade counts per strategy tag; untagged trades count under `"Unknown"`.
#[must_use]
pub fn strategy_distribution(trades: &[TradeRecord]) -> BTreeMap<String, usize> {
    distribution_by(trades, |t| {
        t.strategy.clone().unwrap_or_else(|| "Unknown".to_string())
    })
}

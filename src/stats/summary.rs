//! Aggregate summary metrics.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::TradeRecord;

use super::eligible;

/// Derived summary metrics over a trade sequence.
///
/// Monetary fields stay in [`Decimal`]; ratios and percentages are `f64`,
/// since the profit factor of a lossless profitable sequence is infinite.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TradeSummary {
    pub total_pnl: Decimal,
    /// Winning trades as a percentage of all counted trades.
    pub win_rate: f64,
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub breakeven: usize,
    /// Mean pnl over winning trades; zero when there are none.
    pub avg_win: Decimal,
    /// Mean absolute pnl over losing trades; zero when there are none.
    pub avg_loss: Decimal,
    /// Gross profit over gross loss; infinite when profitable without
    /// losses, zero otherwise.
    pub profit_factor: f64,
    pub best_trade: Decimal,
    pub worst_trade: Decimal,
    /// Largest percentage decline from a running peak of cumulative pnl.
    /// Exceeds 100 when cumulative pnl drops below zero from a positive
    /// peak; no clamp is applied.
    pub max_drawdown: f64,
    pub avg_risk_reward: f64,
    pub consecutive_wins: usize,
    pub consecutive_losses: usize,
    pub expectancy: Decimal,
    pub sharpe_ratio: f64,
    pub avg_holding_hours: f64,
    pub total_volume: Decimal,
}

/// Compute every summary metric in a single pass over the eligible trades.
///
/// Drawdown and streaks depend on input order; callers sort
/// chronologically first when that meaning is required. An empty input
/// produces the all-zero summary.
#[must_use]
pub fn compute_summary(trades: &[TradeRecord]) -> TradeSummary {
    let mut summary = TradeSummary::default();

    let mut gross_profit = Decimal::ZERO;
    let mut gross_loss = Decimal::ZERO;
    let mut running = Decimal::ZERO;
    let mut peak = Decimal::ZERO;
    let mut win_streak = 0usize;
    let mut loss_streak = 0usize;
    let mut holding_hours = 0.0f64;
    let mut timed_trades = 0usize;
    let mut pnls: Vec<f64> = Vec::new();

    for trade in trades.iter().filter(|t| eligible(t)) {
        let pnl = trade.realized_pnl();
        summary.total_trades += 1;
        summary.total_pnl += pnl;
        summary.total_volume += trade.size;
        pnls.push(decimal_to_f64(pnl));

        if pnl > Decimal::ZERO {
            summary.wins += 1;
            gross_profit += pnl;
            win_streak += 1;
            loss_streak = 0;
            summary.consecutive_wins = summary.consecutive_wins.max(win_streak);
        } else if pnl < Decimal::ZERO {
            summary.losses += 1;
            gross_loss -= pnl;
            loss_streak += 1;
            win_streak = 0;
            summary.consecutive_losses = summary.consecutive_losses.max(loss_streak);
        } else {
            // breakeven: counted, but leaves both streaks running
            summary.breakeven += 1;
        }

        if summary.total_trades == 1 {
            summary.best_trade = pnl;
            summary.worst_trade = pnl;
        } else {
            summary.best_trade = summary.best_trade.max(pnl);
            summary.worst_trade = summary.worst_trade.min(pnl);
        }

        running += pnl;
        peak = peak.max(running);
        if peak > Decimal::ZERO {
            let drawdown = decimal_to_f64((peak - running) / peak * Decimal::ONE_HUNDRED);
            summary.max_drawdown = summary.max_drawdown.max(drawdown);
        }

        if let Some(hours) = trade.holding_hours() {
            holding_hours += hours;
            timed_trades += 1;
        }
    }

    if summary.total_trades == 0 {
        return summary;
    }

    summary.win_rate = summary.wins as f64 / summary.total_trades as f64 * 100.0;
    if summary.wins > 0 {
        summary.avg_win = gross_profit / Decimal::from(summary.wins);
    }
    if summary.losses > 0 {
        summary.avg_loss = gross_loss / Decimal::from(summary.losses);
    }

    summary.profit_factor = if gross_loss > Decimal::ZERO {
        decimal_to_f64(gross_profit) / decimal_to_f64(gross_loss)
    } else if gross_profit > Decimal::ZERO {
        f64::INFINITY
    } else {
        0.0
    };

    if summary.avg_loss > Decimal::ZERO {
        summary.avg_risk_reward = decimal_to_f64(summary.avg_win) / decimal_to_f64(summary.avg_loss);
    }

    summary.expectancy = summary.total_pnl / Decimal::from(summary.total_trades);
    summary.sharpe_ratio = sharpe(&pnls);
    if timed_trades > 0 {
        summary.avg_holding_hours = holding_hours / timed_trades as f64;
    }

    summary
}

/// Mean pnl over population standard deviation; zero when the deviation
/// is zero.
fn sharpe(pnls: &[f64]) -> f64 {
    if pnls.is_empty() {
        return 0.0;
    }
    let n = pnls.len() as f64;
    let mean = pnls.iter().sum::<f64>() / n;
    let variance = pnls.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    if std_dev == 0.0 {
        0.0
    } else {
        mean / std_dev
    }
}

pub(super) fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::trade_sequence;
    use rust_decimal_macros::dec;

    #[test]
    fn single_loss_from_positive_peak() {
        let summary = compute_summary(&trade_sequence(&[100, -50]));
        assert!((summary.max_drawdown - 50.0).abs() < f64::EPSILON);
        assert_eq!(summary.best_trade, dec!(100));
        assert_eq!(summary.worst_trade, dec!(-50));
    }

    #[test]
    fn all_losses_have_zero_drawdown_percentage() {
        // peak never rises above zero, so no percentage is defined
        let summary = compute_summary(&trade_sequence(&[-10, -20]));
        assert_eq!(summary.max_drawdown, 0.0);
        assert_eq!(summary.profit_factor, 0.0);
        assert_eq!(summary.wins, 0);
        assert_eq!(summary.losses, 2);
    }

    #[test]
    fn sharpe_is_zero_for_constant_pnl() {
        let summary = compute_summary(&trade_sequence(&[10, 10, 10]));
        assert_eq!(summary.sharpe_ratio, 0.0);
    }
}

//! Handler for the `stats` subcommand.

use std::collections::BTreeMap;

use crate::api::JournalClient;
use crate::error::Result;
use crate::stats::{self, TradeSummary};

use super::{Breakdown, StatsArgs};

/// Execute `tradelog stats`.
pub async fn execute(client: &JournalClient, args: StatsArgs) -> Result<()> {
    let mut trades = client.trades(args.account.as_deref()).await?;
    // drawdown and streaks need chronological order
    trades.sort_by_key(|t| t.entry_date);

    let summary = stats::compute_summary(&trades);
    print_summary(&summary);

    match args.breakdown {
        Some(Breakdown::Hour) => print_hours(&trades),
        Some(Breakdown::Weekday) => print_weekdays(&trades),
        Some(Breakdown::Duration) => print_durations(&trades),
        Some(Breakdown::Symbol) => {
            print_distribution("By Symbol", &stats::symbol_distribution(&trades));
        }
        Some(Breakdown::Strategy) => {
            print_distribution("By Strategy", &stats::strategy_distribution(&trades));
        }
        None => {}
    }
    Ok(())
}

fn print_summary(summary: &TradeSummary) {
    println!();
    println!("═══════════════════════════════════════════════════════════");
    println!("  Journal Summary");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!("  Trades");
    println!("  ─────────────────────────────────────────────────────────");
    println!("    Total:        {:>8}", summary.total_trades);
    println!("    Wins:         {:>8}", summary.wins);
    println!("    Losses:       {:>8}", summary.losses);
    println!("    Breakeven:    {:>8}", summary.breakeven);
    println!("    Win Rate:     {:>7.1}%", summary.win_rate);
    println!(
        "    Streaks:      {:>3} wins / {} losses",
        summary.consecutive_wins, summary.consecutive_losses
    );
    println!();
    println!("  Profit/Loss");
    println!("  ─────────────────────────────────────────────────────────");
    println!("    Net:          ${:>10.2}", summary.total_pnl);
    println!("    Avg Win:      ${:>10.2}", summary.avg_win);
    println!("    Avg Loss:     ${:>10.2}", summary.avg_loss);
    println!("    Best:         ${:>10.2}", summary.best_trade);
    println!("    Worst:        ${:>10.2}", summary.worst_trade);
    println!("    Factor:       {:>11}", fmt_ratio(summary.profit_factor));
    println!("    Expectancy:   ${:>10.2}", summary.expectancy);
    println!();
    println!("  Risk");
    println!("  ─────────────────────────────────────────────────────────");
    println!("    Max Drawdown: {:>10.1}%", summary.max_drawdown);
    println!("    Avg R:R:      {:>11}", fmt_ratio(summary.avg_risk_reward));
    println!("    Sharpe:       {:>11.2}", summary.sharpe_ratio);
    println!("    Avg Hold:     {:>10.1}h", summary.avg_holding_hours);
    println!("    Volume:       {:>11.2}", summary.total_volume);
    println!();
}

fn print_hours(trades: &[crate::domain::TradeRecord]) {
    println!("  By Hour of Day");
    println!("  ─────────────────────────────────────────────────────────");
    println!("    {:>5} {:>8} {:>8} {:>12}", "Hour", "Trades", "Win %", "P&L");
    for bucket in stats::group_by_hour(trades) {
        if bucket.trades == 0 {
            continue;
        }
        println!(
            "    {:>4}h {:>8} {:>7.1}% {:>12.2}",
            bucket.hour, bucket.trades, bucket.win_rate, bucket.total_pnl
        );
    }
    println!();
}

fn print_weekdays(trades: &[crate::domain::TradeRecord]) {
    println!("  By Day of Week");
    println!("  ─────────────────────────────────────────────────────────");
    println!("    {:>9} {:>8} {:>8} {:>12}", "Day", "Trades", "Win %", "P&L");
    for bucket in stats::group_by_weekday(trades) {
        if bucket.trades == 0 {
            continue;
        }
        println!(
            "    {:>9} {:>8} {:>7.1}% {:>12.2}",
            bucket.weekday, bucket.trades, bucket.win_rate, bucket.total_pnl
        );
    }
    println!();
}

fn print_durations(trades: &[crate::domain::TradeRecord]) {
    println!("  By Holding Duration");
    println!("  ─────────────────────────────────────────────────────────");
    println!("    {:>8} {:>8} {:>8}", "Range", "Wins", "Losses");
    for bucket in stats::group_by_duration(trades) {
        println!(
            "    {:>8} {:>8} {:>8}",
            bucket.label, bucket.wins, bucket.losses
        );
    }
    println!();
}

fn print_distribution(title: &str, counts: &BTreeMap<String, usize>) {
    println!("  {title}");
    println!("  ─────────────────────────────────────────────────────────");
    for (key, count) in counts {
        println!("    {key:24} {count:>6}");
    }
    println!();
}

fn fmt_ratio(value: f64) -> String {
    if value.is_infinite() {
        "inf".to_string()
    } else {
        format!("{value:.2}")
    }
}

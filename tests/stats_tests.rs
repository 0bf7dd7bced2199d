//! Statistics engine contract tests.

use rust_decimal_macros::dec;
use tradelog::stats::{
    compute_summary, filter_eligible, group_by_duration, group_by_hour, group_by_weekday,
    strategy_distribution, symbol_distribution,
};
use tradelog::testkit::domain::{closed_trade, open_trade, trade_sequence, unassigned_trade};

#[test]
fn summary_counts_and_averages() {
    let summary = compute_summary(&trade_sequence(&[100, -50, 60, 0, -30]));

    assert_eq!(summary.total_trades, 5);
    assert_eq!(summary.wins, 2);
    assert_eq!(summary.losses, 2);
    assert_eq!(summary.breakeven, 1);
    assert_eq!(summary.total_pnl, dec!(80));
    assert!((summary.win_rate - 40.0).abs() < f64::EPSILON);
    assert_eq!(summary.avg_win, dec!(80));
    assert_eq!(summary.avg_loss, dec!(40));
    assert!((summary.profit_factor - 2.0).abs() < 1e-9);
    assert_eq!(summary.best_trade, dec!(100));
    assert_eq!(summary.worst_trade, dec!(-50));
    assert_eq!(summary.expectancy, dec!(16));
    assert!((summary.avg_risk_reward - 2.0).abs() < 1e-9);
    assert_eq!(summary.total_volume, dec!(5));
    assert!((summary.avg_holding_hours - 2.0).abs() < f64::EPSILON);
}

#[test]
fn drawdown_tracks_the_running_peak_uncapped() {
    // peaks 100,100,180,180,180; running 100,50,130,-70,-40
    let summary = compute_summary(&trade_sequence(&[100, -50, 80, -200, 30]));
    let expected = 250.0 / 180.0 * 100.0;
    assert!(
        (summary.max_drawdown - expected).abs() < 0.01,
        "drawdown measured from peak 180 to trough -70, got {}",
        summary.max_drawdown
    );
    assert!(summary.max_drawdown > 100.0, "no clamp at 100%");
}

#[test]
fn profit_factor_is_infinite_without_losses() {
    let summary = compute_summary(&trade_sequence(&[100, 50]));
    assert!(summary.profit_factor.is_infinite());
}

#[test]
fn empty_input_yields_zero_summary() {
    let summary = compute_summary(&[]);
    assert_eq!(summary.total_trades, 0);
    assert_eq!(summary.total_pnl, dec!(0));
    assert_eq!(summary.win_rate, 0.0);
    assert_eq!(summary.profit_factor, 0.0);
    assert_eq!(summary.best_trade, dec!(0));
    assert_eq!(summary.worst_trade, dec!(0));
    assert_eq!(summary.max_drawdown, 0.0);
    assert_eq!(summary.expectancy, dec!(0));
    assert_eq!(summary.avg_holding_hours, 0.0);
}

#[test]
fn summary_is_deterministic() {
    let trades = trade_sequence(&[100, -50, 80, -200, 30]);
    assert_eq!(compute_summary(&trades), compute_summary(&trades));
}

#[test]
fn shuffling_preserves_order_independent_fields() {
    let trades = trade_sequence(&[100, -50, 80, -200, 30]);
    let mut reversed = trades.clone();
    reversed.reverse();

    let forward = compute_summary(&trades);
    let backward = compute_summary(&reversed);

    assert_eq!(forward.total_pnl, backward.total_pnl);
    assert!((forward.win_rate - backward.win_rate).abs() < f64::EPSILON);
    assert!((forward.profit_factor - backward.profit_factor).abs() < 1e-9);
    assert_eq!(forward.best_trade, backward.best_trade);
    assert_eq!(forward.worst_trade, backward.worst_trade);
    // drawdown and streaks are order-dependent and may legitimately differ
}

#[test]
fn breakeven_trades_reset_neither_streak() {
    let summary = compute_summary(&trade_sequence(&[10, 20, 0, 30, -5, -5, 0, -5]));
    assert_eq!(summary.consecutive_wins, 3);
    assert_eq!(summary.consecutive_losses, 3);
}

#[test]
fn open_trades_count_as_flat_and_skip_duration_metrics() {
    let trades = vec![closed_trade(100), open_trade()];
    let summary = compute_summary(&trades);

    assert_eq!(summary.total_trades, 2);
    assert_eq!(summary.wins, 1);
    assert_eq!(summary.breakeven, 1);
    // only the closed trade carries both dates
    assert!((summary.avg_holding_hours - 2.0).abs() < f64::EPSILON);
}

#[test]
fn unassigned_trades_never_contaminate_aggregates() {
    let mut trades = trade_sequence(&[100, -50, 80]);
    trades.push(unassigned_trade(1_000_000));

    let with_stray = compute_summary(&trades);
    let clean = compute_summary(&filter_eligible(&trades));

    assert_eq!(with_stray, clean, "filtering is applied identically everywhere");
    assert_eq!(with_stray.total_trades, 3);
    assert_eq!(with_stray.best_trade, dec!(100));

    assert_eq!(symbol_distribution(&trades).get("EURUSD"), Some(&3));
    let hours: usize = group_by_hour(&trades).iter().map(|b| b.trades).sum();
    assert_eq!(hours, 3);
}

#[test]
fn hour_buckets_cover_the_full_day() {
    let trades = trade_sequence(&[10, -10, 20]);
    let buckets = group_by_hour(&trades);

    assert_eq!(buckets.len(), 24);
    // entries start at 09:00 and step one hour
    assert_eq!(buckets[9].trades, 1);
    assert_eq!(buckets[10].trades, 1);
    assert_eq!(buckets[11].trades, 1);
    assert!((buckets[9].win_rate - 100.0).abs() < f64::EPSILON);
    assert!((buckets[10].win_rate - 0.0).abs() < f64::EPSILON);
    assert_eq!(buckets[9].total_pnl, dec!(10));
    assert_eq!(buckets[0].trades, 0);
}

#[test]
fn weekday_buckets_key_off_the_entry_date() {
    let trades = trade_sequence(&[10, 20]);
    let buckets = group_by_weekday(&trades);

    assert_eq!(buckets.len(), 7);
    // base_time is a Monday, slot 1 counting from Sunday
    assert_eq!(buckets[1].trades, 2);
    assert_eq!(buckets[1].total_pnl, dec!(30));
    assert_eq!(buckets[0].trades, 0);
}

#[test]
fn duration_buckets_omit_empty_ranges() {
    let mut quick = closed_trade(50);
    quick.exit_date = Some(quick.entry_date + chrono::Duration::minutes(20));
    let mut long = closed_trade(-40);
    long.exit_date = Some(long.entry_date + chrono::Duration::hours(30));

    let buckets = group_by_duration(&[quick, long, open_trade()]);

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].label, "<1h");
    assert_eq!(buckets[0].wins, 1);
    assert_eq!(buckets[0].losses, 0);
    assert_eq!(buckets[1].label, ">24h");
    assert_eq!(buckets[1].wins, 0);
    assert_eq!(buckets[1].losses, 1);
}

#[test]
fn strategy_distribution_defaults_to_unknown() {
    let mut tagged = closed_trade(10);
    tagged.strategy = Some("Reversal".into());
    let mut untagged = closed_trade(20);
    untagged.strategy = None;

    let counts = strategy_distribution(&[tagged, untagged]);
    assert_eq!(counts.get("Reversal"), Some(&1));
    assert_eq!(counts.get("Unknown"), Some(&1));
}

#[test]
fn symbol_distribution_counts_per_symbol() {
    let mut btc = closed_trade(10);
    btc.symbol = "BTCUSD".into();

    let counts = symbol_distribution(&[closed_trade(1), closed_trade(2), btc]);
    assert_eq!(counts.get("EURUSD"), Some(&2));
    assert_eq!(counts.get("BTCUSD"), Some(&1));
}

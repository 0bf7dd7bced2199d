//! Handler for the `trades` subcommand.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::api::JournalClient;
use crate::domain::{Direction, TradeRecord, TradeStatus};
use crate::error::Result;

use super::TradesArgs;

#[derive(Tabled)]
struct TradeRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Dir")]
    direction: &'static str,
    #[tabled(rename = "Entry")]
    entry: String,
    #[tabled(rename = "Exit")]
    exit: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "P&L")]
    pnl: String,
    #[tabled(rename = "R:R")]
    risk_reward: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Opened")]
    opened: String,
}

impl From<&TradeRecord> for TradeRow {
    fn from(trade: &TradeRecord) -> Self {
        Self {
            symbol: trade.symbol.clone(),
            direction: match trade.direction {
                Direction::Long => "LONG",
                Direction::Short => "SHORT",
            },
            entry: trade.entry_price.to_string(),
            exit: trade
                .exit_price
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".into()),
            size: trade.size.to_string(),
            pnl: trade
                .pnl
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".into()),
            risk_reward: trade.risk_reward_ratio.to_string(),
            status: match trade.status {
                TradeStatus::Open => "open",
                TradeStatus::Closed => "closed",
            },
            opened: trade.entry_date.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute `tradelog trades`.
pub async fn execute(client: &JournalClient, args: TradesArgs) -> Result<()> {
    let mut trades = client.trades(args.account.as_deref()).await?;

    if let Some(symbol) = &args.symbol {
        trades.retain(|t| t.symbol.eq_ignore_ascii_case(symbol));
    }
    trades.truncate(args.limit);

    if trades.is_empty() {
        println!("No trades found.");
        return Ok(());
    }

    let rows: Vec<TradeRow> = trades.iter().map(TradeRow::from).collect();
    println!("{}", Table::new(rows).with(Style::sharp()));
    Ok(())
}

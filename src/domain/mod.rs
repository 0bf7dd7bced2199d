//! Journal domain types: trades and session credentials.

pub mod credential;
pub mod trade;

pub use credential::{token_expiry, Credential};
pub use trade::{Direction, Outcome, TradeRecord, TradeStatus};

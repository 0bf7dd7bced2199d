//! REST client for the journal backend.

mod client;
mod refresh;
mod types;

pub use client::JournalClient;
pub use refresh::HttpTokenRefresher;
pub use types::{ApiEnvelope, LoginRequest, RefreshRequest, SessionTokens, TradeDto};

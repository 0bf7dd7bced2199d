//! Tradelog - trading journal client core.
//!
//! This crate provides the reproducible core of a trading-journal
//! application: an authenticated-request pipeline with transparent token
//! refresh, and a pure statistics engine over journaled trades.
//!
//! # Architecture
//!
//! - **[`auth`]** - Authenticated-request pipeline
//!   - `AuthGateway` - attaches bearer credentials, coordinates at most one
//!     token refresh at a time, queues concurrent callers behind it, and
//!     retries each original call at most once
//!   - `RefreshScheduler` - refreshes shortly before the token expires so
//!     requests rarely observe a 401
//!   - `CredentialStore` - injectable two-key persistence (file-backed or
//!     in-memory)
//!
//! - **[`stats`]** - Pure aggregation over [`domain::TradeRecord`]
//!   sequences: summary metrics, hour/weekday/duration buckets, key
//!   distributions
//!
//! # Modules
//!
//! - [`api`] - REST client for the journal backend
//! - [`auth`] - Credential storage, refresh gateway, proactive scheduler
//! - [`cli`] - Command definitions and handlers
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Trade records and session credentials
//! - [`error`] - Error types for the crate
//! - [`stats`] - Trade statistics engine
//!
//! # Example
//!
//! ```
//! use tradelog::stats::compute_summary;
//!
//! let summary = compute_summary(&[]);
//! assert_eq!(summary.total_trades, 0);
//! assert_eq!(summary.profit_factor, 0.0);
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod stats;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

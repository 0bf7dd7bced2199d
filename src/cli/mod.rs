//! Command-line interface definitions.

pub mod login;
pub mod output;
pub mod stats;
pub mod trades;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};

use crate::api::{HttpTokenRefresher, JournalClient};
use crate::auth::{AuthGateway, CredentialStore, FileCredentialStore};
use crate::config::Config;
use crate::error::Result;

/// Trading journal client.
#[derive(Parser, Debug)]
#[command(name = "tradelog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "tradelog.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session credential
    Login(LoginArgs),

    /// Clear the stored session credential
    Logout,

    /// List journal trades
    Trades(TradesArgs),

    /// Show aggregate trade statistics
    Stats(StatsArgs),
}

/// Arguments for the `login` subcommand.
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Email to sign in with (prompted when omitted)
    #[arg(long)]
    pub email: Option<String>,
}

/// Arguments for the `trades` subcommand.
#[derive(Parser, Debug)]
pub struct TradesArgs {
    /// Only show trades for this symbol
    #[arg(long)]
    pub symbol: Option<String>,

    /// Maximum number of trades to show
    #[arg(short = 'n', long, default_value = "50")]
    pub limit: usize,

    /// Restrict to one account
    #[arg(long)]
    pub account: Option<String>,
}

/// Arguments for the `stats` subcommand.
#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Restrict to one account
    #[arg(long)]
    pub account: Option<String>,

    /// Additional breakdown to print
    #[arg(long, value_enum)]
    pub breakdown: Option<Breakdown>,
}

/// Breakdown dimensions for `stats`.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Breakdown {
    Hour,
    Weekday,
    Duration,
    Symbol,
    Strategy,
}

/// Wire the client stack from configuration.
pub fn build_client(config: &Config) -> Result<JournalClient> {
    let http = reqwest::Client::new();
    let base_url = config.api.base_url()?;

    let store: Arc<dyn CredentialStore> =
        Arc::new(FileCredentialStore::new(config.auth.credentials_path()));
    let refresher = Arc::new(HttpTokenRefresher::new(
        http.clone(),
        base_url.join("auth/refresh")?,
    ));

    let gateway = Arc::new(
        AuthGateway::new(store, refresher)
            .with_debounce_window(config.auth.unauthorized_debounce())
            .on_unauthorized(|| {
                output::warning("session expired, sign in again with `tradelog login`");
            }),
    );

    Ok(JournalClient::new(http, base_url, gateway))
}

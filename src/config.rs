//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. Every section has defaults,
//! so a missing file still yields a runnable local configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

use crate::auth::FileCredentialStore;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file. A missing file yields defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        Ok(config)
    }
}

/// Backend endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the journal backend.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000/api".into(),
        }
    }
}

impl ApiConfig {
    /// Parsed base URL, normalized with a trailing slash so endpoint
    /// paths join underneath it.
    pub fn base_url(&self) -> Result<Url> {
        let mut raw = self.base_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(Into::into)
    }
}

/// Token-refresh tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Seconds before expiry at which the proactive refresh runs.
    pub refresh_lead_secs: u64,
    /// Refresh interval when the token has no decodable expiry.
    pub fallback_interval_secs: u64,
    /// Window collapsing bursts of session-expiry signals, in milliseconds.
    pub unauthorized_debounce_ms: u64,
    /// Where the session credential is persisted. Defaults to the user
    /// config directory.
    pub credentials_file: Option<PathBuf>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            refresh_lead_secs: 60,
            fallback_interval_secs: 240,
            unauthorized_debounce_ms: 500,
            credentials_file: None,
        }
    }
}

impl AuthConfig {
    #[must_use]
    pub fn refresh_lead(&self) -> Duration {
        Duration::from_secs(self.refresh_lead_secs)
    }

    #[must_use]
    pub fn fallback_interval(&self) -> Duration {
        Duration::from_secs(self.fallback_interval_secs)
    }

    #[must_use]
    pub fn unauthorized_debounce(&self) -> Duration {
        Duration::from_millis(self.unauthorized_debounce_ms)
    }

    #[must_use]
    pub fn credentials_path(&self) -> PathBuf {
        self.credentials_file
            .clone()
            .unwrap_or_else(FileCredentialStore::default_path)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}

//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any mode runs.
//! A `.env` file in the working directory is honored (loaded in `main.rs`).
//!
//! ## Targets
//!
//! ```bash
//! export TARGET_URLS="https://www.grailed.com/shop/nxzCtqQtfg,https://www.grailed.com/shop/lRwSEkgxZw"
//! ```
//!
//! When `TARGET_URLS` is unset the built-in shop list is watched.
//!
//! ## Notifications
//!
//! ```bash
//! # ntfy (default)
//! export NOTIFIER="ntfy"
//! export NTFY_SERVER="https://ntfy.sh"
//! export NTFY_TOPIC="automonitor"
//!
//! # Pushover
//! export NOTIFIER="pushover"
//! export PUSHOVER_TOKEN="..."
//! export PUSHOVER_USER="..."
//! ```
//!
//! ## Required Variables
//!
//! - `API_KEY` - only for `serve`; must be non-empty
//! - `PUSHOVER_TOKEN` / `PUSHOVER_USER` - only with `NOTIFIER=pushover`
//!
//! ## Optional Variables
//!
//! - `HOST` / `PORT` - Bind address for `serve` (default: `0.0.0.0:8080`)
//! - `POLL_INTERVAL_SECS` - Sleep between passes in `watch` (default: 600)
//! - `FETCH_TIMEOUT_SECS` - Upper bound for one page fetch (default: 30)
//! - `SETTLE_DELAY_SECS` - Wait after navigation (default: 3)
//! - `BROWSER_USER_AGENT` - User agent sent by the headless browser
//! - `CHROME_PATH` - Browser executable (default: auto-detect)
//! - `COUNT_STORE_PATH` - JSON file keeping counts across runs (default: unset)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::entities::ListingTarget;
use crate::infrastructure::browser::BrowserSettings;
use crate::utils::mask::{mask_secret, mask_url_credentials};

/// Shop pages watched when `TARGET_URLS` is not set.
pub const DEFAULT_TARGET_URLS: [&str; 4] = [
    "https://www.grailed.com/shop/nxzCtqQtfg",
    "https://www.grailed.com/shop/lRwSEkgxZw",
    "https://www.grailed.com/shop/PweX949iwA",
    "https://www.grailed.com/shop/z5RvSYTnZQ",
];

pub const DEFAULT_NTFY_SERVER: &str = "https://ntfy.sh";
pub const DEFAULT_NTFY_TOPIC: &str = "automonitor";

/// Notification back end selected by `NOTIFIER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifierKind {
    Ntfy,
    Pushover,
    None,
}

impl FromStr for NotifierKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ntfy" => Ok(Self::Ntfy),
            "pushover" => Ok(Self::Pushover),
            "none" => Ok(Self::None),
            other => anyhow::bail!("NOTIFIER must be 'ntfy', 'pushover' or 'none', got '{}'", other),
        }
    }
}

impl fmt::Display for NotifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ntfy => "ntfy",
            Self::Pushover => "pushover",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub target_urls: Vec<String>,
    /// Static key expected in `X-API-Key`. Only `serve` requires it.
    pub api_key: Option<String>,
    pub host: String,
    pub port: u16,
    pub poll_interval_secs: u64,
    pub fetch_timeout_secs: u64,
    pub settle_delay_secs: u64,
    pub user_agent: String,
    pub chrome_path: Option<PathBuf>,
    pub notifier: NotifierKind,
    pub ntfy_server: String,
    pub ntfy_topic: String,
    pub pushover_token: Option<String>,
    pub pushover_user: Option<String>,
    /// When set, counts survive restarts and HTTP calls.
    pub count_store_path: Option<PathBuf>,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable or `NOTIFIER` cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let target_urls = Self::load_target_urls();

        let api_key = env::var("API_KEY").ok();
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_var("PORT", 8080)?;

        let poll_interval_secs = parse_var("POLL_INTERVAL_SECS", 600)?;
        let fetch_timeout_secs = parse_var("FETCH_TIMEOUT_SECS", 30)?;
        let settle_delay_secs = parse_var("SETTLE_DELAY_SECS", 3)?;

        let user_agent =
            non_empty_var("BROWSER_USER_AGENT").unwrap_or_else(|| BrowserSettings::default().user_agent);
        let chrome_path = non_empty_var("CHROME_PATH").map(PathBuf::from);

        let notifier = match non_empty_var("NOTIFIER") {
            Some(value) => value.parse()?,
            None => NotifierKind::Ntfy,
        };
        let ntfy_server =
            non_empty_var("NTFY_SERVER").unwrap_or_else(|| DEFAULT_NTFY_SERVER.to_string());
        let ntfy_topic =
            non_empty_var("NTFY_TOPIC").unwrap_or_else(|| DEFAULT_NTFY_TOPIC.to_string());
        let pushover_token = non_empty_var("PUSHOVER_TOKEN");
        let pushover_user = non_empty_var("PUSHOVER_USER");

        let count_store_path = non_empty_var("COUNT_STORE_PATH").map(PathBuf::from);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            target_urls,
            api_key,
            host,
            port,
            poll_interval_secs,
            fetch_timeout_secs,
            settle_delay_secs,
            user_agent,
            chrome_path,
            notifier,
            ntfy_server,
            ntfy_topic,
            pushover_token,
            pushover_user,
            count_store_path,
            log_level,
            log_format,
        })
    }

    /// Loads the watched URLs.
    ///
    /// Priority:
    /// 1. `TARGET_URLS`, comma-separated, blanks dropped
    /// 2. [`DEFAULT_TARGET_URLS`]
    fn load_target_urls() -> Vec<String> {
        match non_empty_var("TARGET_URLS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_TARGET_URLS.iter().map(|url| url.to_string()).collect(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - no target is configured, or a target is not an http(s) URL
    /// - `API_KEY` is set but empty
    /// - a timing value is zero, or the settle delay does not fit in the fetch timeout
    /// - the selected notifier is missing its settings
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if self.target_urls.is_empty() {
            anyhow::bail!("TARGET_URLS must contain at least one URL");
        }

        for target in &self.target_urls {
            validate_http_url(target).with_context(|| format!("Invalid target URL '{}'", target))?;
        }

        if let Some(ref key) = self.api_key
            && key.is_empty()
        {
            anyhow::bail!("API_KEY must not be empty");
        }

        if self.poll_interval_secs == 0 {
            anyhow::bail!("POLL_INTERVAL_SECS must be greater than 0");
        }

        if self.fetch_timeout_secs == 0 {
            anyhow::bail!("FETCH_TIMEOUT_SECS must be greater than 0");
        }

        if self.settle_delay_secs >= self.fetch_timeout_secs {
            anyhow::bail!(
                "SETTLE_DELAY_SECS ({}) must be less than FETCH_TIMEOUT_SECS ({})",
                self.settle_delay_secs,
                self.fetch_timeout_secs
            );
        }

        match self.notifier {
            NotifierKind::Ntfy => {
                validate_http_url(&self.ntfy_server)
                    .with_context(|| format!("Invalid NTFY_SERVER '{}'", self.ntfy_server))?;
                if self.ntfy_topic.contains('/') {
                    anyhow::bail!("NTFY_TOPIC must not contain '/', got '{}'", self.ntfy_topic);
                }
            }
            NotifierKind::Pushover => {
                if self.pushover_token.is_none() || self.pushover_user.is_none() {
                    anyhow::bail!(
                        "PUSHOVER_TOKEN and PUSHOVER_USER must be set when NOTIFIER=pushover"
                    );
                }
            }
            NotifierKind::None => {}
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Returns the API key, failing if it was not configured.
    ///
    /// # Errors
    ///
    /// Returns an error if `API_KEY` is unset or empty.
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => anyhow::bail!("API_KEY must be set to a non-empty value to run the HTTP server"),
        }
    }

    /// Bind address in `host:port` form.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn targets(&self) -> Vec<ListingTarget> {
        self.target_urls.iter().map(ListingTarget::new).collect()
    }

    /// Browser settings derived from the timing and browser variables.
    pub fn browser_settings(&self) -> BrowserSettings {
        BrowserSettings {
            user_agent: self.user_agent.clone(),
            settle_delay: Duration::from_secs(self.settle_delay_secs),
            timeout: Duration::from_secs(self.fetch_timeout_secs),
            chrome_path: self.chrome_path.clone(),
            ..BrowserSettings::default()
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Targets: {}", self.target_urls.len());
        for url in &self.target_urls {
            tracing::info!("    - {}", mask_url_credentials(url));
        }

        match self.api_key {
            Some(ref key) => tracing::info!("  API key: {}", mask_secret(key)),
            None => tracing::info!("  API key: not set"),
        }

        tracing::info!("  Listen address: {}", self.listen_addr());
        tracing::info!("  Poll interval: {}s", self.poll_interval_secs);
        tracing::info!(
            "  Fetch timeout: {}s (settle delay {}s)",
            self.fetch_timeout_secs,
            self.settle_delay_secs
        );

        match self.chrome_path {
            Some(ref path) => tracing::info!("  Browser: {}", path.display()),
            None => tracing::info!("  Browser: auto-detect"),
        }

        match self.notifier {
            NotifierKind::Ntfy => tracing::info!(
                "  Notifier: ntfy ({}/{})",
                mask_url_credentials(&self.ntfy_server),
                self.ntfy_topic
            ),
            NotifierKind::Pushover => tracing::info!(
                "  Notifier: pushover (token {}, user {})",
                self.pushover_token.as_deref().map(mask_secret).unwrap_or_default(),
                self.pushover_user.as_deref().map(mask_secret).unwrap_or_default()
            ),
            NotifierKind::None => tracing::info!("  Notifier: none (log only)"),
        }

        match self.count_store_path {
            Some(ref path) => tracing::info!("  Count store: {} (persistent)", path.display()),
            None => tracing::info!("  Count store: in process only"),
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads a variable, treating an empty value as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses a variable, falling back to `default` when it is unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty_var(name) {
        Some(value) => value
            .parse()
            .with_context(|| format!("{} must be a non-negative integer, got '{}'", name, value)),
        None => Ok(default),
    }
}

fn validate_http_url(raw: &str) -> Result<()> {
    let parsed = url::Url::parse(raw)?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        anyhow::bail!("scheme must be http or https, got '{}'", parsed.scheme());
    }
    if parsed.host_str().is_none() {
        anyhow::bail!("URL has no host");
    }
    Ok(())
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

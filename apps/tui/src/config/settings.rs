use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use reqwest::Url;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::DEFAULT_API_URL;
use crate::poller::DEFAULT_POLL_INTERVAL;

pub const ENV_API_URL: &str = "FLEET_API_URL";
pub const ENV_POLL_INTERVAL_MS: &str = "FLEET_POLL_INTERVAL_MS";
pub const ENV_TIMEOUT_MS: &str = "FLEET_TIMEOUT_MS";
pub const ENV_LOG_FILE: &str = "FLEET_LOG_FILE";
pub const ENV_DEBUG: &str = "FLEET_DEBUG";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_LOG_FILE: &str = "fleet-console.log";

/// Runtime settings, resolved from `.env`, the environment and CLI overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub api_url: String,
    pub poll_interval: Duration,
    pub timeout: Duration,
    pub log_file: PathBuf,
    pub debug: bool,
    /// Problems that fell back to defaults, reported once logging is up
    pub warnings: Vec<String>,
}

impl ConsoleConfig {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut warnings = Vec::new();

        let api_url = lookup(ENV_API_URL)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        validate_api_url(&api_url)?;

        let poll_interval = millis(&lookup, ENV_POLL_INTERVAL_MS, DEFAULT_POLL_INTERVAL, &mut warnings);
        let timeout = millis(&lookup, ENV_TIMEOUT_MS, DEFAULT_TIMEOUT, &mut warnings);

        let log_file = lookup(ENV_LOG_FILE)
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from);

        let debug = lookup(ENV_DEBUG).is_some_and(|value| matches!(value.as_str(), "1" | "true"));

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            poll_interval,
            timeout,
            log_file,
            debug,
            warnings,
        })
    }
}

fn validate_api_url(raw: &str) -> Result<()> {
    let url = Url::parse(raw).map_err(|e| eyre!("Invalid {ENV_API_URL} '{raw}': {e}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(eyre!(
            "Invalid {ENV_API_URL} '{raw}': scheme must be http or https"
        ));
    }
    Ok(())
}

fn millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
    warnings: &mut Vec<String>,
) -> Duration {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Duration::from_millis(ms),
        _ => {
            warnings.push(format!(
                "{key}='{raw}' is not a positive number of milliseconds, using {}ms",
                default.as_millis()
            ));
            default
        }
    }
}

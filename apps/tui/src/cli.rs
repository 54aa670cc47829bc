use clap::Parser;

use crate::config::{ENV_API_URL, ENV_DEBUG, ENV_LOG_FILE, ENV_POLL_INTERVAL_MS, ENV_TIMEOUT_MS};

#[derive(Debug, Parser)]
#[command(name = "fleet-console", version, about = "Terminal console for the fleet API")]
pub struct CliArgs {
    /// Base URL of the fleet API
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Milliseconds between background refreshes
    #[arg(long = "poll-interval-ms", value_name = "MS")]
    pub poll_interval_ms: Option<u64>,

    /// Per-request timeout in milliseconds
    #[arg(long = "timeout-ms", value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Where interactive mode writes its log
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Open directly on a ship page
    #[arg(long, value_name = "ID", conflicts_with = "inventory")]
    pub ship: Option<String>,

    /// Open on the sensor inventory
    #[arg(long)]
    pub inventory: bool,

    /// Print fleet stats and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless stats as JSON
    #[arg(long)]
    pub json: bool,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var(ENV_API_URL, url);
        }
        if let Some(ms) = self.poll_interval_ms {
            std::env::set_var(ENV_POLL_INTERVAL_MS, ms.to_string());
        }
        if let Some(ms) = self.timeout_ms {
            std::env::set_var(ENV_TIMEOUT_MS, ms.to_string());
        }
        if let Some(path) = &self.log_file {
            std::env::set_var(ENV_LOG_FILE, path);
        }
        if self.debug {
            std::env::set_var(ENV_DEBUG, "1");
        }
    }

    /// `--json` implies headless output.
    pub const fn wants_headless(&self) -> bool {
        self.headless || self.json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation_and_overrides() {
        let args = CliArgs::parse_from([
            "fleet-console",
            "--api-url",
            "http://localhost:9000/api",
            "--poll-interval-ms",
            "500",
            "--ship",
            "MTGREATMANTA",
        ]);
        assert_eq!(args.api_url.as_deref(), Some("http://localhost:9000/api"));
        assert_eq!(args.poll_interval_ms, Some(500));
        assert_eq!(args.ship.as_deref(), Some("MTGREATMANTA"));
        assert!(!args.wants_headless());
    }

    #[test]
    fn json_implies_headless() {
        let args = CliArgs::parse_from(["fleet-console", "--json"]);
        assert!(args.wants_headless());
    }

    #[test]
    fn ship_and_inventory_conflict() {
        let result = CliArgs::try_parse_from(["fleet-console", "--ship", "A", "--inventory"]);
        assert!(result.is_err());
    }
}

//! Tracing setup. The interactive console owns the terminal, so it logs to a
//! file; headless runs log to stderr and keep stdout for the report.

use std::fs::OpenOptions;
use std::sync::Mutex;

use color_eyre::eyre::{eyre, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::ConsoleConfig;

pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "fleet_console=debug"
    } else {
        "fleet_console=info"
    }
}

pub fn init_tracing(config: &ConsoleConfig, use_stderr: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_directive(config.debug).into()),
    );

    let installed = if use_stderr {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    } else {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .map_err(|e| eyre!("Failed to open log file {}: {e}", config.log_file.display()))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .try_init()
    };
    installed.map_err(|e| eyre!("Failed to install tracing subscriber: {e}"))?;

    for warning in &config.warnings {
        tracing::warn!("{warning}");
    }
    Ok(())
}

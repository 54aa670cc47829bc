use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use tokio::sync::mpsc::unbounded_channel;

use fleet_console::api::FleetClient;
use fleet_console::app::{App, AppActions, AppEvent};
use fleet_console::cli::CliArgs;
use fleet_console::config::ConsoleConfig;
use fleet_console::poller::Poller;
use fleet_console::{event, logging, terminal};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = ConsoleConfig::from_env()?;

    let headless = args.wants_headless() || !is_terminal();
    logging::init_tracing(&config, headless)?;

    let client = FleetClient::new(config.api_url.clone(), config.timeout)?;
    tracing::info!(api_url = %config.api_url, headless, "fleet console starting");

    if headless {
        return event::run_headless(&client, args.json).await;
    }

    let (tx, mut rx) = unbounded_channel();
    let mut app = App::new().with_actions(AppActions::new(client.clone(), tx.clone()));

    let poller = Poller::new(config.poll_interval).start(Arc::new(client), move |result| {
        if tx.send(AppEvent::Snapshot(result)).is_err() {
            tracing::debug!("event channel closed, dropping snapshot");
        }
    });
    app.attach_poller(poller);

    if let Some(ship_id) = &args.ship {
        app.open_ship(ship_id);
    } else if args.inventory {
        app.open_inventory();
    }

    // Setup terminal
    let mut terminal = terminal::setup()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app, &mut rx);

    // Restore terminal
    terminal::cleanup(true, true);
    app.quit();

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}

use std::io::Stdout;
use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::api::FleetClient;
use crate::app::{handle_input, App, AppEvent};
use crate::store::{FleetStats, SnapshotSource};
use crate::ui;
use crate::view::Badge;

/// Fetch one snapshot and print the fleet summary (no UI)
pub async fn run_headless(client: &FleetClient, json: bool) -> Result<()> {
    let report = build_headless_report(client).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_headless_report(&report);
    }

    Ok(())
}

async fn build_headless_report(client: &FleetClient) -> Result<HeadlessReport> {
    let snapshot = client.fetch_snapshot().await?;
    tracing::info!(
        ships = snapshot.ships.len(),
        sensors = snapshot.sensors.len(),
        "headless snapshot fetched"
    );

    let ships = snapshot
        .ships
        .iter()
        .map(|ship| HeadlessShip {
            id: ship.id.clone(),
            name: ship.name.clone(),
            status: Badge::for_status(&ship.status),
            personnel: ship.personnel,
            tanks: ship.tanks.len(),
        })
        .collect();

    Ok(HeadlessReport {
        api_url: client.base_url().to_string(),
        stats: snapshot.fleet_stats(),
        sensors: snapshot.sensors.len(),
        tank_types: snapshot.tank_types.len(),
        ships,
    })
}

fn render_headless_report(report: &HeadlessReport) {
    println!("\nFleet Summary ({})", report.api_url);
    println!("=================");
    println!("Ships at dock: {}", report.stats.ships_at_dock);
    println!("Ships under operation: {}", report.stats.ships_under_operation);
    println!("Working personnel: {}", report.stats.total_personnel);
    println!("Spaces in danger: {}", report.stats.spaces_in_danger);
    println!("Sensors in inventory: {}", report.sensors);

    println!("\nShips:");
    for ship in &report.ships {
        println!(
            "- {} | {} | {} | {} personnel | {} tanks",
            ship.id, ship.name, ship.status.label, ship.personnel, ship.tanks
        );
    }
}

#[derive(Debug, Serialize)]
struct HeadlessReport {
    api_url: String,
    stats: FleetStats,
    sensors: usize,
    tank_types: usize,
    ships: Vec<HeadlessShip>,
}

#[derive(Debug, Serialize)]
struct HeadlessShip {
    id: String,
    name: String,
    status: Badge,
    personnel: u32,
    tanks: usize,
}

/// Apply everything the poller and action tasks reported since the last frame.
pub fn drain_events(app: &mut App, events: &mut UnboundedReceiver<AppEvent>) {
    while let Ok(event) = events.try_recv() {
        app.handle_event(event);
    }
}

/// Run the main application event loop
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    events: &mut UnboundedReceiver<AppEvent>,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    while app.running {
        app.update();
        drain_events(app, events);

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if !matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            continue;
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
                {
                    app.quit();
                } else {
                    handle_input(app, key.code);
                }
            }
            Ok(Event::Resize(width, height)) => {
                tracing::debug!(width, height, "terminal resized");
            }
            Ok(_) => {}
            Err(error) => tracing::warn!(%error, "failed to read terminal event"),
        }
    }

    tracing::info!("event loop finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShipStatus;
    use crate::store::fixtures::ship;
    use crate::store::Snapshot;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn drained_snapshots_apply_in_arrival_order() {
        let (tx, mut rx) = unbounded_channel();
        for id in ["OLD", "NEW"] {
            tx.send(AppEvent::Snapshot(Ok(Snapshot::new(
                vec![ship(id, ShipStatus::Idle, 1, &[])],
                Vec::new(),
                Vec::new(),
            ))))
            .unwrap();
        }

        let mut app = App::new();
        drain_events(&mut app, &mut rx);

        assert_eq!(app.store.generation(), 2);
        assert!(app.snapshot().ship("NEW").is_some());
        assert!(app.snapshot().ship("OLD").is_none());
    }
}

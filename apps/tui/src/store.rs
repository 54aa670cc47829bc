//! Snapshot cache for the fleet API.
//!
//! Ships, sensors and tank types are swapped in together and in full on every
//! successful fetch. A failed fetch leaves the previous snapshot untouched.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::{GatewayError, Sensor, Ship, TankType};
use crate::domain::ShipStatus;

/// Anything that can produce a complete snapshot in one go.
pub trait SnapshotSource: Send + Sync + 'static {
    fn fetch_snapshot(&self) -> impl Future<Output = Result<Snapshot, GatewayError>> + Send;
}

/// Immutable copy of every fetched collection at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub ships: Vec<Ship>,
    pub sensors: Vec<Sensor>,
    pub tank_types: Vec<TankType>,
}

impl Snapshot {
    pub const fn new(ships: Vec<Ship>, sensors: Vec<Sensor>, tank_types: Vec<TankType>) -> Self {
        Self {
            ships,
            sensors,
            tank_types,
        }
    }

    pub fn ship(&self, id: &str) -> Option<&Ship> {
        self.ships.iter().find(|ship| ship.id == id)
    }

    pub fn sensor(&self, id: &str) -> Option<&Sensor> {
        self.sensors.iter().find(|sensor| sensor.id == id)
    }

    pub fn ships_with_status<'a>(
        &'a self,
        status: &'a ShipStatus,
    ) -> impl Iterator<Item = &'a Ship> + 'a {
        self.ships.iter().filter(move |ship| &ship.status == status)
    }

    pub fn fleet_stats(&self) -> FleetStats {
        FleetStats::from_ships(&self.ships)
    }
}

/// Headline numbers of the overview page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FleetStats {
    pub ships_at_dock: usize,
    pub ships_under_operation: usize,
    pub total_personnel: u64,
    pub spaces_in_danger: usize,
}

impl FleetStats {
    pub fn from_ships(ships: &[Ship]) -> Self {
        ships.iter().fold(
            Self {
                ships_at_dock: ships.len(),
                ..Self::default()
            },
            |mut stats, ship| {
                stats.total_personnel += u64::from(ship.personnel);
                match ship.status {
                    ShipStatus::Wip => stats.ships_under_operation += 1,
                    ShipStatus::Danger => stats.spaces_in_danger += 1,
                    ShipStatus::Idle | ShipStatus::Other(_) => {}
                }
                stats
            },
        )
    }
}

/// Owner of the current snapshot.
#[derive(Debug)]
pub struct SnapshotStore {
    current: Arc<Snapshot>,
    generation: u64,
    last_refreshed: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

impl SnapshotStore {
    /// An empty store; pages render their "no data" states until the first
    /// fetch lands.
    pub fn init() -> Self {
        Self {
            current: Arc::new(Snapshot::default()),
            generation: 0,
            last_refreshed: None,
            last_error: None,
        }
    }

    pub fn current_snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current)
    }

    /// Number of snapshots applied so far.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub const fn is_stale(&self) -> bool {
        self.last_error.is_some()
    }

    pub fn replace(&mut self, snapshot: Snapshot) {
        self.current = Arc::new(snapshot);
        self.generation += 1;
        self.last_refreshed = Some(Utc::now());
        self.last_error = None;
        tracing::debug!(
            generation = self.generation,
            ships = self.current.ships.len(),
            sensors = self.current.sensors.len(),
            "snapshot replaced"
        );
    }

    /// Apply the outcome of one fetch. Returns `true` when the snapshot
    /// changed hands.
    pub fn apply(&mut self, result: Result<Snapshot, GatewayError>) -> bool {
        match result {
            Ok(snapshot) => {
                self.replace(snapshot);
                true
            }
            Err(error) => {
                tracing::warn!(%error, "poll failed, keeping previous snapshot");
                self.last_error = Some(error.to_string());
                false
            }
        }
    }

    /// Fetch once from `source` and apply the result.
    pub async fn refresh<S: SnapshotSource>(&mut self, source: &S) -> bool {
        let result = source.fetch_snapshot().await;
        self.apply(result)
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::init()
    }
}

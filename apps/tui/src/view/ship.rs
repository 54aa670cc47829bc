use crate::api::{Ship, Tank};
use crate::selection::TankSelection;
use crate::store::Snapshot;
use crate::view::Badge;

pub const NO_TANKS_TITLE: &str = "No tanks configured for this ship.";
pub const NO_TANKS_HINT: &str = "Please add a tank to begin assigning sensors.";
pub const NO_SENSORS: &str = "No sensors assigned to this tank.";
pub const NO_KNOWN_SENSORS: &str = "None of this tank's sensors are in the inventory.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipView {
    pub ship_id: String,
    pub title: String,
    pub total_personnel: u32,
    pub status: Badge,
    pub in_danger: bool,
    pub tanks: Vec<TankNavItem>,
    pub panel: TankPanel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TankNavItem {
    pub id: String,
    pub label: String,
    pub active: bool,
}

/// Right-hand panel of the ship page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TankPanel {
    NoTanks {
        title: &'static str,
        hint: &'static str,
    },
    Tank {
        tank_id: String,
        title: String,
        sensors: Vec<SensorTile>,
        empty_message: Option<&'static str>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorTile {
    pub id: String,
    pub sensor_type: String,
    pub battery: u8,
}

pub fn ship_view(ship: &Ship, snapshot: &Snapshot, selection: &TankSelection) -> ShipView {
    // A remembered id that no longer resolves renders like the first tank
    // would after reconciliation, never as an error.
    let shown = selection
        .selected_tank(ship)
        .or_else(|| ship.tanks.first());

    let tanks = ship
        .tanks
        .iter()
        .map(|tank| TankNavItem {
            id: tank.id.clone(),
            label: format!("{} ({} sensors)", tank.id, tank.sensors.len()),
            active: shown.is_some_and(|current| current.id == tank.id),
        })
        .collect();

    let panel = match shown {
        Some(tank) => tank_panel(tank, snapshot),
        None => TankPanel::NoTanks {
            title: NO_TANKS_TITLE,
            hint: NO_TANKS_HINT,
        },
    };

    ShipView {
        ship_id: ship.id.clone(),
        title: format!("Ship: {}", ship.name),
        total_personnel: ship.personnel,
        status: Badge::for_status(&ship.status),
        in_danger: ship.status.is_danger(),
        tanks,
        panel,
    }
}

fn tank_panel(tank: &Tank, snapshot: &Snapshot) -> TankPanel {
    // Assignments pointing at sensors missing from the catalog are skipped.
    let sensors: Vec<SensorTile> = tank
        .sensors
        .iter()
        .filter_map(|assignment| snapshot.sensor(&assignment.id))
        .map(|sensor| SensorTile {
            id: sensor.id.clone(),
            sensor_type: sensor.sensor_type.clone(),
            battery: sensor.battery,
        })
        .collect();

    TankPanel::Tank {
        tank_id: tank.id.clone(),
        title: format!("Details for Tank: {}", tank.id),
        empty_message: if tank.sensors.is_empty() {
            Some(NO_SENSORS)
        } else if sensors.is_empty() {
            Some(NO_KNOWN_SENSORS)
        } else {
            None
        },
        sensors,
    }
}

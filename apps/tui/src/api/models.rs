use serde::{Deserialize, Serialize};

use crate::domain::ShipStatus;

/// A ship as returned by `GET /ships`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub id: String,
    pub name: String,
    #[serde(rename = "lastPort", default)]
    pub last_port: String,
    #[serde(default)]
    pub arrived: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub personnel: u32,
    #[serde(default)]
    pub status: ShipStatus,
    #[serde(default)]
    pub tanks: Vec<Tank>,
}

impl Ship {
    pub fn tank(&self, tank_id: &str) -> Option<&Tank> {
        self.tanks.iter().find(|tank| tank.id == tank_id)
    }
}

/// A tank owned by a ship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tank {
    pub id: String,
    #[serde(default)]
    pub sensors: Vec<SensorAssignment>,
}

/// Id-only link from a tank to the sensor catalog; may dangle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorAssignment {
    pub id: String,
}

/// A sensor from the master catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: String,
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub status: String,
    #[serde(default)]
    pub battery: u8,
    #[serde(default)]
    pub last_calibrated: String,
    #[serde(default)]
    pub last_used_on_ship: Option<String>,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

impl Sensor {
    pub fn is_in_use(&self) -> bool {
        self.status == "In Use"
    }
}

/// One entry of a sensor's append-only event log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub event: String,
    pub timestamp: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TankType {
    pub id: String,
    pub name: String,
}

/// Body of `POST /ships`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShip {
    pub id: String,
    pub name: String,
    #[serde(rename = "lastPort")]
    pub last_port: String,
    pub personnel: u32,
    pub status: ShipStatus,
}

impl NewShip {
    /// Builds a ship from the add-ship form. The id is the name upper-cased
    /// with every whitespace character removed.
    pub fn from_form(name: &str, last_port: &str, personnel: u32) -> Self {
        Self {
            id: ship_id_from_name(name),
            name: name.to_string(),
            last_port: last_port.to_string(),
            personnel,
            status: ShipStatus::Idle,
        }
    }
}

pub fn ship_id_from_name(name: &str) -> String {
    name.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Body of `PUT /ships/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipUpdate {
    pub name: String,
    #[serde(rename = "lastPort")]
    pub last_port: String,
    pub personnel: u32,
    pub status: ShipStatus,
}

impl ShipUpdate {
    /// Copy of the ship's editable fields with a different status
    pub fn with_status(ship: &Ship, status: ShipStatus) -> Self {
        Self {
            name: ship.name.clone(),
            last_port: ship.last_port.clone(),
            personnel: ship.personnel,
            status,
        }
    }
}

/// Body of `POST /ships/{id}/tanks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTank {
    pub id: String,
    pub type_id: String,
}

/// Body of `POST /ships/{id}/tanks/{tank_id}/sensors`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorIdsRequest {
    pub sensor_ids: Vec<String>,
}

/// Splits free-form input into sensor ids, one per line or comma.
pub fn parse_sensor_ids(input: &str) -> Vec<String> {
    input
        .split(['\n', ','])
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Error payload the API may attach to a rejected request
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The `detail` field when it is a non-empty string
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(detail)) if !detail.trim().is_empty() => {
                Some(detail.clone())
            }
            _ => None,
        }
    }
}

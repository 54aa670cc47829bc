use chrono::{DateTime, NaiveDateTime};

use crate::api::Sensor;
use crate::selection::ListSelection;
use crate::store::Snapshot;
use crate::view::EMPTY_VALUE;

pub const NO_SENSORS: &str = "No sensors found in inventory.";
pub const NO_LOG_ENTRIES: &str = "No log entries found for this device.";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryView {
    pub rows: Vec<SensorRow>,
    pub selected: Option<usize>,
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorRow {
    pub id: String,
    pub sensor_type: String,
    pub status: String,
    pub battery: String,
    pub last_calibrated: String,
    pub ship: String,
}

impl SensorRow {
    fn from_sensor(sensor: &Sensor) -> Self {
        // The last ship only means something while the sensor is deployed.
        let ship = sensor
            .last_used_on_ship
            .as_deref()
            .filter(|_| sensor.is_in_use())
            .unwrap_or(EMPTY_VALUE);

        Self {
            id: sensor.id.clone(),
            sensor_type: sensor.sensor_type.clone(),
            status: sensor.status.clone(),
            battery: format!("{}%", sensor.battery),
            last_calibrated: sensor.last_calibrated.clone(),
            ship: ship.to_string(),
        }
    }
}

pub fn inventory_view(snapshot: &Snapshot, cursor: &ListSelection) -> InventoryView {
    let rows: Vec<SensorRow> = snapshot.sensors.iter().map(SensorRow::from_sensor).collect();
    let selected = cursor
        .selected_id()
        .and_then(|id| rows.iter().position(|row| row.id == id));

    InventoryView {
        empty_message: rows.is_empty().then_some(NO_SENSORS),
        rows,
        selected,
    }
}

/// Detail modal for one sensor, built from the full record with logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorLogView {
    pub title: String,
    pub sensor_type: String,
    pub status: String,
    pub battery: String,
    pub entries: Vec<LogLine>,
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub event: String,
    pub timestamp: String,
    pub details: String,
}

pub fn sensor_log_view(sensor: &Sensor) -> SensorLogView {
    let entries: Vec<LogLine> = sensor
        .logs
        .iter()
        .map(|entry| LogLine {
            event: entry.event.clone(),
            timestamp: format_timestamp(&entry.timestamp),
            details: entry.details.clone(),
        })
        .collect();

    SensorLogView {
        title: format!("Sensor Log: {}", sensor.id),
        sensor_type: sensor.sensor_type.clone(),
        status: sensor.status.clone(),
        battery: format!("{}%", sensor.battery),
        empty_message: entries.is_empty().then_some(NO_LOG_ENTRIES),
        entries,
    }
}

/// Formats an API timestamp in the offset it was sent with. Values chrono
/// cannot parse are shown verbatim.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format(TIMESTAMP_FORMAT).to_string();
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map_or_else(
        |_| raw.to_string(),
        |parsed| parsed.format(TIMESTAMP_FORMAT).to_string(),
    )
}

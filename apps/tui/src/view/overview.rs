use crate::api::Ship;
use crate::domain::{Drilldown, ShipStatus};
use crate::selection::ListSelection;
use crate::store::{FleetStats, Snapshot};
use crate::view::{Badge, EMPTY_VALUE};

pub const NO_SHIPS: &str = "No ships in the fleet.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewView {
    pub stats: FleetStats,
    pub cards: Vec<ShipCard>,
    pub rows: Vec<ShipRow>,
    pub selected: Option<usize>,
    pub empty_message: Option<&'static str>,
}

/// Entry of the status strip at the top of the overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipCard {
    pub id: String,
    pub name: String,
    pub badge: Badge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipRow {
    pub id: String,
    pub name: String,
    pub last_port: String,
    pub arrived: String,
    pub status: Badge,
    pub controls: [StatusControl; 2],
}

/// One of the Idle/WIP buttons of a ship row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusControl {
    pub status: ShipStatus,
    pub active: bool,
    pub disabled: bool,
}

impl ShipRow {
    fn from_ship(ship: &Ship) -> Self {
        let in_danger = ship.status.is_danger();
        let controls = ShipStatus::selectable().map(|status| StatusControl {
            active: ship.status == status,
            disabled: in_danger,
            status,
        });

        Self {
            id: ship.id.clone(),
            name: ship.name.clone(),
            last_port: ship.last_port.clone(),
            arrived: ship
                .arrived
                .clone()
                .unwrap_or_else(|| EMPTY_VALUE.to_string()),
            status: Badge::for_status(&ship.status),
            controls,
        }
    }

    /// Whether picking `status` from this row would do anything.
    pub fn can_set(&self, status: &ShipStatus) -> bool {
        self.controls
            .iter()
            .any(|control| &control.status == status && !control.disabled && !control.active)
    }
}

pub fn overview_view(snapshot: &Snapshot, cursor: &ListSelection) -> OverviewView {
    let rows: Vec<ShipRow> = snapshot.ships.iter().map(ShipRow::from_ship).collect();
    let cards = snapshot
        .ships
        .iter()
        .map(|ship| ShipCard {
            id: ship.id.clone(),
            name: ship.name.clone(),
            badge: Badge::for_status(&ship.status),
        })
        .collect();

    let selected = cursor
        .selected_id()
        .and_then(|id| rows.iter().position(|row| row.id == id));

    OverviewView {
        stats: snapshot.fleet_stats(),
        cards,
        empty_message: rows.is_empty().then_some(NO_SHIPS),
        rows,
        selected,
    }
}

/// List behind one of the overview stat tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrilldownView {
    pub title: &'static str,
    pub entries: Vec<DrilldownEntry>,
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrilldownEntry {
    pub name: String,
    pub value: DrilldownValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrilldownValue {
    Status(Badge),
    Personnel(u32),
}

pub fn drilldown_view(snapshot: &Snapshot, kind: Drilldown) -> DrilldownView {
    let status_entry = |ship: &Ship| DrilldownEntry {
        name: ship.name.clone(),
        value: DrilldownValue::Status(Badge::for_status(&ship.status)),
    };

    let entries: Vec<DrilldownEntry> = match kind {
        Drilldown::Dock => snapshot.ships.iter().map(status_entry).collect(),
        Drilldown::UnderOperation => snapshot
            .ships_with_status(&ShipStatus::Wip)
            .map(status_entry)
            .collect(),
        Drilldown::Danger => snapshot
            .ships_with_status(&ShipStatus::Danger)
            .map(status_entry)
            .collect(),
        Drilldown::Personnel => snapshot
            .ships
            .iter()
            .map(|ship| DrilldownEntry {
                name: ship.name.clone(),
                value: DrilldownValue::Personnel(ship.personnel),
            })
            .collect(),
    };

    DrilldownView {
        title: kind.label(),
        empty_message: entries.is_empty().then_some(NO_SHIPS),
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::ship;

    fn snapshot() -> Snapshot {
        Snapshot::new(
            vec![
                ship("A", ShipStatus::Wip, 5, &[]),
                ship("B", ShipStatus::Danger, 3, &[]),
                ship("C", ShipStatus::Idle, 0, &[]),
            ],
            Vec::new(),
            Vec::new(),
        )
    }

    #[test]
    fn stats_tiles_use_fleet_aggregates() {
        let view = overview_view(&snapshot(), &ListSelection::default());
        assert_eq!(view.stats.ships_at_dock, 3);
        assert_eq!(view.stats.ships_under_operation, 1);
        assert_eq!(view.stats.spaces_in_danger, 1);
        assert_eq!(view.stats.total_personnel, 8);
        assert_eq!(view.empty_message, None);
    }

    #[test]
    fn danger_ship_has_disabled_controls() {
        let view = overview_view(&snapshot(), &ListSelection::default());
        let danger = &view.rows[1];
        assert!(danger.controls.iter().all(|control| control.disabled));
        assert!(!danger.can_set(&ShipStatus::Idle));
        assert_eq!(danger.status.label, "In Danger");

        let wip = &view.rows[0];
        assert!(wip.controls.iter().all(|control| !control.disabled));
        assert!(wip.controls[1].active);
        assert!(wip.can_set(&ShipStatus::Idle));
        assert!(!wip.can_set(&ShipStatus::Wip));
    }

    #[test]
    fn empty_fleet_shows_placeholder() {
        let view = overview_view(&Snapshot::default(), &ListSelection::default());
        assert_eq!(view.empty_message, Some(NO_SHIPS));
        assert!(view.rows.is_empty());
        assert_eq!(view.selected, None);
    }

    #[test]
    fn rendering_is_idempotent() {
        let snapshot = snapshot();
        let mut cursor = ListSelection::default();
        cursor.select_last(&["A", "B", "C"]);
        assert_eq!(
            overview_view(&snapshot, &cursor),
            overview_view(&snapshot, &cursor)
        );
        assert_eq!(overview_view(&snapshot, &cursor).selected, Some(2));
    }

    #[test]
    fn missing_arrival_uses_placeholder() {
        let mut snapshot = snapshot();
        snapshot.ships[0].arrived = None;
        let view = overview_view(&snapshot, &ListSelection::default());
        assert_eq!(view.rows[0].arrived, EMPTY_VALUE);
    }

    #[test]
    fn drilldowns_filter_by_status() {
        let snapshot = snapshot();
        let wip = drilldown_view(&snapshot, Drilldown::UnderOperation);
        assert_eq!(wip.entries.len(), 1);
        assert_eq!(wip.entries[0].name, "A name");

        let danger = drilldown_view(&snapshot, Drilldown::Danger);
        assert_eq!(
            danger.entries[0].value,
            DrilldownValue::Status(Badge::for_status(&ShipStatus::Danger))
        );

        let personnel = drilldown_view(&snapshot, Drilldown::Personnel);
        assert_eq!(personnel.entries[1].value, DrilldownValue::Personnel(3));

        let empty = drilldown_view(&Snapshot::default(), Drilldown::Dock);
        assert_eq!(empty.empty_message, Some(NO_SHIPS));
    }
}

//! View models: pure projections of (snapshot, selection) into what a page
//! shows. Nothing in here touches the terminal; `crate::ui` paints these.

pub mod inventory;
pub mod overview;
pub mod ship;

use serde::Serialize;

use crate::domain::{BadgeClass, ShipStatus};

pub use inventory::{inventory_view, sensor_log_view, InventoryView, SensorLogView, SensorRow};
pub use overview::{drilldown_view, overview_view, DrilldownView, OverviewView, ShipRow};
pub use ship::{ship_view, ShipView, TankPanel};

/// Text plus visual class of a status badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub class: BadgeClass,
    pub label: String,
}

impl Badge {
    pub fn for_status(status: &ShipStatus) -> Self {
        Self {
            class: status.badge(),
            label: status.label().to_string(),
        }
    }
}

/// Placeholder shown in place of a missing value.
pub const EMPTY_VALUE: &str = "—";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badges_follow_status_mapping() {
        let danger = Badge::for_status(&ShipStatus::Danger);
        assert_eq!(danger.class.as_str(), "danger");
        assert_eq!(danger.label, "In Danger");

        let wip = Badge::for_status(&ShipStatus::Wip);
        assert_eq!((wip.class.as_str(), wip.label.as_str()), ("ok", "WIP"));

        let idle = Badge::for_status(&ShipStatus::Idle);
        assert_eq!((idle.class.as_str(), idle.label.as_str()), ("gray", "Idle"));
    }
}

//! Remembered user selections and their reconciliation against new snapshots.
//!
//! A remembered id is never trusted on its own: every read goes through the
//! ship or list it refers to, and every refresh re-validates it.

use crate::api::{Ship, Tank};

/// What a reconciliation did to a remembered selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    Kept,
    FellBack,
    Cleared,
}

/// Active tank of the ship page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TankSelection {
    selected_tank_id: Option<String>,
}

impl TankSelection {
    /// First tank of the ship, or nothing when it has no tanks.
    pub fn initial(ship: &Ship) -> Self {
        Self {
            selected_tank_id: ship.tanks.first().map(|tank| tank.id.clone()),
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_tank_id.as_deref()
    }

    /// The selected tank, if it still exists in `ship`.
    pub fn selected_tank<'a>(&self, ship: &'a Ship) -> Option<&'a Tank> {
        self.selected_tank_id
            .as_deref()
            .and_then(|id| ship.tank(id))
    }

    /// Select `tank_id` if the ship has it. Unknown ids leave the selection
    /// alone.
    pub fn select(&mut self, ship: &Ship, tank_id: &str) -> bool {
        if ship.tank(tank_id).is_none() {
            return false;
        }
        self.selected_tank_id = Some(tank_id.to_string());
        true
    }

    pub fn select_next(&mut self, ship: &Ship) -> bool {
        self.step(ship, true)
    }

    pub fn select_prev(&mut self, ship: &Ship) -> bool {
        self.step(ship, false)
    }

    fn step(&mut self, ship: &Ship, forward: bool) -> bool {
        let len = ship.tanks.len();
        if len == 0 {
            return false;
        }
        let current = self
            .selected_tank_id
            .as_deref()
            .and_then(|id| ship.tanks.iter().position(|tank| tank.id == id));
        let next = match current {
            Some(index) if forward => (index + 1) % len,
            Some(index) => (index + len - 1) % len,
            None => 0,
        };
        self.selected_tank_id = Some(ship.tanks[next].id.clone());
        true
    }

    /// Re-validate against the refreshed ship. The selection survives while the
    /// tank exists; otherwise it falls back to the first tank, or to nothing.
    pub fn reconcile(&mut self, ship: Option<&Ship>) -> Reconciled {
        let Some(ship) = ship else {
            self.selected_tank_id = None;
            return Reconciled::Cleared;
        };

        if self.selected_tank(ship).is_some() {
            return Reconciled::Kept;
        }

        let had_selection = self.selected_tank_id.is_some();
        *self = Self::initial(ship);
        match (had_selection, self.selected_tank_id.is_some()) {
            (_, false) => Reconciled::Cleared,
            (true, true) => Reconciled::FellBack,
            (false, true) => Reconciled::Kept,
        }
    }
}

/// Cursor over an id-keyed list (ships on the overview, sensors in the
/// inventory) that follows the entity rather than the row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSelection {
    selected_id: Option<String>,
    index: usize,
}

impl ListSelection {
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub fn reconcile(&mut self, ids: &[&str]) -> Reconciled {
        if let Some(position) = self
            .selected_id
            .as_deref()
            .and_then(|selected| ids.iter().position(|id| *id == selected))
        {
            self.index = position;
            return Reconciled::Kept;
        }

        if ids.is_empty() {
            self.selected_id = None;
            self.index = 0;
            return Reconciled::Cleared;
        }

        let had_selection = self.selected_id.is_some();
        self.index = self.index.min(ids.len() - 1);
        self.selected_id = Some(ids[self.index].to_string());
        if had_selection {
            Reconciled::FellBack
        } else {
            Reconciled::Kept
        }
    }

    pub fn select_next(&mut self, ids: &[&str]) {
        if ids.is_empty() {
            return;
        }
        self.reconcile(ids);
        if self.index + 1 < ids.len() {
            self.index += 1;
        }
        self.selected_id = Some(ids[self.index].to_string());
    }

    pub fn select_prev(&mut self, ids: &[&str]) {
        if ids.is_empty() {
            return;
        }
        self.reconcile(ids);
        self.index = self.index.saturating_sub(1);
        self.selected_id = Some(ids[self.index].to_string());
    }

    pub fn select_first(&mut self, ids: &[&str]) {
        self.index = 0;
        self.selected_id = ids.first().map(|id| (*id).to_string());
    }

    pub fn select_last(&mut self, ids: &[&str]) {
        self.index = ids.len().saturating_sub(1);
        self.selected_id = ids.last().map(|id| (*id).to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShipStatus;
    use crate::store::fixtures::ship;

    fn ship_with_tanks(tanks: &[&str]) -> Ship {
        let tanks: Vec<(&str, &[&str])> = tanks.iter().map(|id| (*id, &[][..])).collect();
        ship("MANTA", ShipStatus::Idle, 4, &tanks)
    }

    #[test]
    fn initial_selection_is_first_tank() {
        let selection = TankSelection::initial(&ship_with_tanks(&["T1", "T2"]));
        assert_eq!(selection.selected_id(), Some("T1"));
    }

    #[test]
    fn initial_selection_is_empty_without_tanks() {
        let selection = TankSelection::initial(&ship_with_tanks(&[]));
        assert_eq!(selection.selected_id(), None);
    }

    #[test]
    fn selection_survives_refresh_while_tank_exists() {
        let ship = ship_with_tanks(&["T1", "T2"]);
        let mut selection = TankSelection::initial(&ship);
        assert!(selection.select(&ship, "T2"));

        let refreshed = ship_with_tanks(&["T0", "T1", "T2"]);
        assert_eq!(selection.reconcile(Some(&refreshed)), Reconciled::Kept);
        assert_eq!(selection.selected_id(), Some("T2"));
    }

    #[test]
    fn removed_tank_falls_back_to_first() {
        let ship = ship_with_tanks(&["T1", "T2"]);
        let mut selection = TankSelection::initial(&ship);
        selection.select(&ship, "T2");

        let refreshed = ship_with_tanks(&["T1"]);
        assert_eq!(selection.reconcile(Some(&refreshed)), Reconciled::FellBack);
        assert_eq!(selection.selected_id(), Some("T1"));
    }

    #[test]
    fn no_tanks_left_clears_selection() {
        let ship = ship_with_tanks(&["T1", "T2"]);
        let mut selection = TankSelection::initial(&ship);
        selection.select(&ship, "T2");

        assert_eq!(
            selection.reconcile(Some(&ship_with_tanks(&[]))),
            Reconciled::Cleared
        );
        assert_eq!(selection.selected_id(), None);
    }

    #[test]
    fn vanished_ship_clears_selection() {
        let mut selection = TankSelection::initial(&ship_with_tanks(&["T1"]));
        assert_eq!(selection.reconcile(None), Reconciled::Cleared);
        assert_eq!(selection.selected_id(), None);
    }

    #[test]
    fn first_tank_added_later_becomes_selected() {
        let mut selection = TankSelection::initial(&ship_with_tanks(&[]));
        assert_eq!(
            selection.reconcile(Some(&ship_with_tanks(&["T9"]))),
            Reconciled::Kept
        );
        assert_eq!(selection.selected_id(), Some("T9"));
    }

    #[test]
    fn selecting_unknown_tank_is_ignored() {
        let ship = ship_with_tanks(&["T1"]);
        let mut selection = TankSelection::initial(&ship);
        assert!(!selection.select(&ship, "NOPE"));
        assert_eq!(selection.selected_id(), Some("T1"));
    }

    #[test]
    fn tank_navigation_wraps() {
        let ship = ship_with_tanks(&["T1", "T2", "T3"]);
        let mut selection = TankSelection::initial(&ship);
        selection.select_prev(&ship);
        assert_eq!(selection.selected_id(), Some("T3"));
        selection.select_next(&ship);
        assert_eq!(selection.selected_id(), Some("T1"));
    }

    #[test]
    fn list_cursor_follows_entity_when_rows_shift() {
        let mut cursor = ListSelection::default();
        cursor.reconcile(&["A", "B", "C"]);
        cursor.select_next(&["A", "B", "C"]);
        assert_eq!(cursor.selected_id(), Some("B"));

        assert_eq!(cursor.reconcile(&["Z", "A", "B"]), Reconciled::Kept);
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.selected_id(), Some("B"));
    }

    #[test]
    fn list_cursor_clamps_when_entity_disappears() {
        let mut cursor = ListSelection::default();
        cursor.select_last(&["A", "B", "C"]);

        assert_eq!(cursor.reconcile(&["A", "B"]), Reconciled::FellBack);
        assert_eq!(cursor.selected_id(), Some("B"));

        assert_eq!(cursor.reconcile(&[]), Reconciled::Cleared);
        assert_eq!(cursor.selected_id(), None);
    }
}

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Local;

use crate::api::models::parse_sensor_ids;
use crate::api::{GatewayError, Ship, ShipUpdate};
use crate::app::actions::{ActionKind, ActionOutcome, AppActions, AppEvent, PendingActions};
use crate::app::forms::{Modal, ShipForm, TankForm};
use crate::domain::{Drilldown, ShipStatus};
use crate::poller::PollerHandle;
use crate::selection::{ListSelection, Reconciled, TankSelection};
use crate::store::{Snapshot, SnapshotStore};

const ALARM_LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Overview,
    ShipDetail,
    Inventory,
}

/// State of the ship detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipPage {
    pub ship_id: String,
    pub selection: TankSelection,
    pub alarm_log: VecDeque<String>,
}

impl ShipPage {
    fn new(ship_id: String, ship: Option<&Ship>) -> Self {
        Self {
            ship_id,
            selection: ship.map(TankSelection::initial).unwrap_or_default(),
            alarm_log: VecDeque::new(),
        }
    }

    /// Newest entries first.
    pub fn log(&mut self, message: &str) {
        let stamp = Local::now().format("%H:%M:%S");
        self.alarm_log.push_front(format!("[{stamp}] {message}"));
        self.alarm_log.truncate(ALARM_LOG_CAPACITY);
    }
}

/// Blocking message shown until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub store: SnapshotStore,
    pub ship_cursor: ListSelection,
    pub sensor_cursor: ListSelection,
    pub ship_page: Option<ShipPage>,
    pub modal: Option<Modal>,
    pub notice: Option<Notice>,
    pub status_message: String,
    pub show_help: bool,
    pub clock: String,
    pub pending: PendingActions,
    actions: Option<AppActions>,
    poller: Option<PollerHandle>,
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            screen: AppScreen::Overview,
            store: SnapshotStore::init(),
            ship_cursor: ListSelection::default(),
            sensor_cursor: ListSelection::default(),
            ship_page: None,
            modal: None,
            notice: None,
            status_message: String::new(),
            show_help: false,
            clock: String::new(),
            pending: PendingActions::default(),
            actions: None,
            poller: None,
        }
    }

    #[must_use]
    pub fn with_actions(mut self, actions: AppActions) -> Self {
        self.actions = Some(actions);
        self
    }

    pub fn attach_poller(&mut self, poller: PollerHandle) {
        self.poller = Some(poller);
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.store.current_snapshot()
    }

    /// Per-frame housekeeping.
    pub fn update(&mut self) {
        self.clock = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    }

    pub fn quit(&mut self) {
        self.running = false;
        if let Some(poller) = &self.poller {
            poller.cancel();
        }
    }

    pub fn request_refresh(&self) {
        match &self.poller {
            Some(poller) => poller.refresh_now(),
            None => tracing::debug!("refresh requested without a running poller"),
        }
    }

    // ============================================================
    // Background events
    // ============================================================

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Snapshot(result) => self.apply_snapshot(result),
            AppEvent::Action {
                kind,
                target,
                result,
            } => self.finish_action(kind, target.as_deref(), result),
        }
    }

    pub fn apply_snapshot(&mut self, result: Result<Snapshot, GatewayError>) {
        if self.store.apply(result) {
            self.reconcile();
        }
    }

    /// Re-validate every remembered id against the current snapshot.
    pub fn reconcile(&mut self) {
        let snapshot = self.snapshot();

        let ship_ids: Vec<&str> = snapshot.ships.iter().map(|ship| ship.id.as_str()).collect();
        self.ship_cursor.reconcile(&ship_ids);
        let sensor_ids: Vec<&str> = snapshot
            .sensors
            .iter()
            .map(|sensor| sensor.id.as_str())
            .collect();
        self.sensor_cursor.reconcile(&sensor_ids);

        let page_ship = self
            .ship_page
            .as_ref()
            .and_then(|page| snapshot.ship(&page.ship_id));
        if let Some(page) = &mut self.ship_page {
            let before = page.selection.selected_id().map(ToString::to_string);
            match page.selection.reconcile(page_ship) {
                Reconciled::FellBack => tracing::info!(
                    ship_id = %page.ship_id,
                    removed = before.as_deref(),
                    now = page.selection.selected_id(),
                    "selected tank disappeared"
                ),
                Reconciled::Cleared if before.is_some() => {
                    tracing::info!(ship_id = %page.ship_id, "tank selection cleared");
                }
                Reconciled::Kept | Reconciled::Cleared => {}
            }
        }

        let vanished = match &self.modal {
            Some(Modal::EditShip { ship_id, .. } | Modal::ConfirmDelete { ship_id, .. }) => {
                snapshot.ship(ship_id).is_none()
            }
            Some(Modal::AddTank(_)) => page_ship.is_none(),
            Some(Modal::AssignSensors { tank_id, .. }) => {
                page_ship.and_then(|ship| ship.tank(tank_id)).is_none()
            }
            _ => false,
        };
        if vanished {
            tracing::info!("closing form bound to a removed entity");
            self.modal = None;
            self.status_message = "Form closed: its ship or tank no longer exists.".to_string();
        }
    }

    /// Entity the open modal is bound to.
    fn modal_target(&self) -> Option<&str> {
        match self.modal.as_ref()? {
            Modal::AddTank(_) => self.ship_page.as_ref().map(|page| page.ship_id.as_str()),
            modal => modal.target(),
        }
    }

    /// Whether the open modal is the one that submitted `kind` for `target`.
    fn modal_submitted(&self, kind: ActionKind, target: Option<&str>) -> bool {
        self.modal.as_ref().and_then(Modal::action) == Some(kind) && self.modal_target() == target
    }

    fn finish_action(
        &mut self,
        kind: ActionKind,
        target: Option<&str>,
        result: Result<ActionOutcome, GatewayError>,
    ) {
        self.pending.finish(kind);

        match result {
            Ok(ActionOutcome::Done(message)) => {
                if self.modal_submitted(kind, target) {
                    self.modal = None;
                }
                let on_page = self
                    .ship_page
                    .as_ref()
                    .is_some_and(|page| Some(page.ship_id.as_str()) == target);
                if kind == ActionKind::Acknowledge && self.screen == AppScreen::ShipDetail && on_page
                {
                    self.back_to_overview();
                }
                self.status_message = message;
                if kind.is_mutation() {
                    self.request_refresh();
                }
            }
            Ok(ActionOutcome::SensorLoaded(sensor)) => {
                if let Some(Modal::SensorLog { sensor_id, detail }) = &mut self.modal {
                    if *sensor_id == sensor.id {
                        self.status_message = format!("Sensor {} loaded.", sensor.id);
                        *detail = Some(sensor);
                        return;
                    }
                }
                // Nobody is waiting for this one any more.
                if self.status_message == in_progress(ActionKind::LoadSensor) {
                    self.status_message.clear();
                }
            }
            Err(error) => {
                if kind == ActionKind::LoadSensor && !self.modal_submitted(kind, target) {
                    tracing::debug!(sensor_id = target, "dropping failure of an abandoned sensor load");
                    return;
                }
                if kind == ActionKind::LoadSensor {
                    self.modal = None;
                }
                self.status_message.clear();
                self.notice = Some(Notice::error(error.to_string()));
            }
        }
    }

    /// Reads are not guarded: a stale sensor load must not block opening
    /// another log.
    fn submit(&mut self, kind: ActionKind, run: impl FnOnce(&AppActions)) -> bool {
        let Some(actions) = self.actions.as_ref() else {
            self.notice = Some(Notice::error("Fleet API client is not configured."));
            return false;
        };
        if kind.is_mutation() && !self.pending.begin(kind) {
            self.status_message = format!("{} already in progress.", kind.label());
            return false;
        }
        self.status_message = in_progress(kind);
        run(actions);
        true
    }

    // ============================================================
    // Navigation
    // ============================================================

    pub fn selected_ship(&self) -> Option<Ship> {
        let snapshot = self.snapshot();
        self.ship_cursor
            .selected_id()
            .and_then(|id| snapshot.ship(id))
            .cloned()
    }

    /// Ship shown on the detail page, if it still exists.
    pub fn page_ship(&self) -> Option<Ship> {
        let page = self.ship_page.as_ref()?;
        self.snapshot().ship(&page.ship_id).cloned()
    }

    pub fn open_ship(&mut self, ship_id: &str) {
        let snapshot = self.snapshot();
        let mut page = ShipPage::new(ship_id.to_string(), snapshot.ship(ship_id));
        if let Some(tank_id) = page.selection.selected_id().map(ToString::to_string) {
            page.log(&format!("📦 Selected tank: {tank_id}"));
        }
        self.ship_page = Some(page);
        self.modal = None;
        self.screen = AppScreen::ShipDetail;
        tracing::debug!(ship_id, "opened ship page");
    }

    pub fn open_selected_ship(&mut self) {
        if let Some(id) = self.ship_cursor.selected_id().map(ToString::to_string) {
            self.open_ship(&id);
        }
    }

    pub fn open_inventory(&mut self) {
        self.modal = None;
        self.screen = AppScreen::Inventory;
    }

    pub fn back_to_overview(&mut self) {
        self.modal = None;
        self.ship_page = None;
        self.screen = AppScreen::Overview;
    }

    pub fn move_ship_cursor(&mut self, forward: bool) {
        let snapshot = self.snapshot();
        let ids: Vec<&str> = snapshot.ships.iter().map(|ship| ship.id.as_str()).collect();
        if forward {
            self.ship_cursor.select_next(&ids);
        } else {
            self.ship_cursor.select_prev(&ids);
        }
    }

    pub fn move_sensor_cursor(&mut self, forward: bool) {
        let snapshot = self.snapshot();
        let ids: Vec<&str> = snapshot
            .sensors
            .iter()
            .map(|sensor| sensor.id.as_str())
            .collect();
        if forward {
            self.sensor_cursor.select_next(&ids);
        } else {
            self.sensor_cursor.select_prev(&ids);
        }
    }

    // ============================================================
    // Ship page
    // ============================================================

    pub fn select_tank(&mut self, tank_id: &str) {
        let Some(ship) = self.page_ship() else {
            return;
        };
        if let Some(page) = &mut self.ship_page {
            if page.selection.select(&ship, tank_id) {
                page.log(&format!("📦 Selected tank: {tank_id}"));
            }
        }
    }

    pub fn step_tank(&mut self, forward: bool) {
        let Some(ship) = self.page_ship() else {
            return;
        };
        if let Some(page) = &mut self.ship_page {
            let moved = if forward {
                page.selection.select_next(&ship)
            } else {
                page.selection.select_prev(&ship)
            };
            if let (true, Some(id)) = (moved, page.selection.selected_id().map(ToString::to_string)) {
                page.log(&format!("📦 Selected tank: {id}"));
            }
        }
    }

    pub fn acknowledge_alarm(&mut self) {
        let Some(ship) = self.page_ship() else {
            return;
        };
        if !ship.status.is_danger() {
            self.status_message = "No active alarm on this ship.".to_string();
            return;
        }
        let submitted = self.submit(ActionKind::Acknowledge, |actions| {
            actions.acknowledge_alarm(ship.id.clone());
        });
        if submitted {
            if let Some(page) = &mut self.ship_page {
                page.log("✅ Alarm acknowledged by user.");
            }
        }
    }

    pub fn open_add_tank(&mut self) {
        if self.page_ship().is_some() {
            self.modal = Some(Modal::AddTank(TankForm::new()));
        }
    }

    pub fn open_assign_sensors(&mut self) {
        let Some(ship) = self.page_ship() else {
            return;
        };
        let selected = self
            .ship_page
            .as_ref()
            .and_then(|page| page.selection.selected_tank(&ship));
        match selected {
            Some(tank) => {
                self.modal = Some(Modal::AssignSensors {
                    tank_id: tank.id.clone(),
                    input: String::new(),
                });
            }
            None => self.status_message = "Select a tank first.".to_string(),
        }
    }

    // ============================================================
    // Overview
    // ============================================================

    pub fn open_add_ship(&mut self) {
        self.modal = Some(Modal::AddShip(ShipForm::new()));
    }

    pub fn open_edit_ship(&mut self) {
        if let Some(ship) = self.selected_ship() {
            self.modal = Some(Modal::EditShip {
                form: ShipForm::from_ship(&ship),
                ship_id: ship.id,
            });
        }
    }

    pub fn open_delete_ship(&mut self) {
        if let Some(ship) = self.selected_ship() {
            self.modal = Some(Modal::ConfirmDelete {
                ship_id: ship.id,
                name: ship.name,
            });
        }
    }

    pub fn open_drilldown(&mut self, kind: Drilldown) {
        self.modal = Some(Modal::Drilldown(kind));
    }

    /// Idle/WIP controls of the selected ship. Ships in danger are locked
    /// until their alarm is acknowledged.
    pub fn set_selected_status(&mut self, status: ShipStatus) {
        let Some(ship) = self.selected_ship() else {
            return;
        };
        if ship.status.is_danger() {
            self.status_message = "Acknowledge the alarm before changing status.".to_string();
            return;
        }
        if ship.status == status {
            return;
        }
        let update = ShipUpdate::with_status(&ship, status);
        self.submit(ActionKind::SetStatus, |actions| {
            actions.update_ship(ActionKind::SetStatus, ship.id.clone(), update);
        });
    }

    // ============================================================
    // Inventory
    // ============================================================

    pub fn open_sensor_log(&mut self) {
        let Some(sensor_id) = self.sensor_cursor.selected_id().map(ToString::to_string) else {
            return;
        };
        let submitted = self.submit(ActionKind::LoadSensor, |actions| {
            actions.load_sensor(sensor_id.clone());
        });
        if submitted {
            self.modal = Some(Modal::SensorLog {
                sensor_id,
                detail: None,
            });
        }
    }

    // ============================================================
    // Modals
    // ============================================================

    /// Submit whatever the open modal holds. Validation problems keep the
    /// modal open and show a notice.
    pub fn submit_modal(&mut self) {
        let Some(modal) = self.modal.clone() else {
            return;
        };
        let snapshot = self.snapshot();

        match modal {
            Modal::AddShip(form) => match form.to_new_ship() {
                Ok(ship) => {
                    self.submit(ActionKind::CreateShip, |actions| actions.create_ship(ship));
                }
                Err(message) => self.notice = Some(Notice::error(message)),
            },
            Modal::EditShip { ship_id, form } => {
                let Some(ship) = snapshot.ship(&ship_id) else {
                    self.modal = None;
                    self.notice = Some(Notice::error("Ship not found!"));
                    return;
                };
                match form.to_update(ship) {
                    Ok(update) => {
                        self.submit(ActionKind::UpdateShip, |actions| {
                            actions.update_ship(ActionKind::UpdateShip, ship_id, update);
                        });
                    }
                    Err(message) => self.notice = Some(Notice::error(message)),
                }
            }
            Modal::ConfirmDelete { ship_id, name } => {
                self.submit(ActionKind::DeleteShip, |actions| {
                    actions.delete_ship(ship_id, name);
                });
            }
            Modal::AddTank(form) => {
                let Some(ship_id) = self.ship_page.as_ref().map(|page| page.ship_id.clone())
                else {
                    return;
                };
                match form.to_new_tank(&snapshot.tank_types) {
                    Ok(tank) => {
                        self.submit(ActionKind::AddTank, |actions| {
                            actions.add_tank(ship_id, tank);
                        });
                    }
                    Err(message) => self.notice = Some(Notice::error(message)),
                }
            }
            Modal::AssignSensors { tank_id, input } => {
                let sensor_ids = parse_sensor_ids(&input);
                if sensor_ids.is_empty() {
                    return;
                }
                let Some(ship_id) = self.ship_page.as_ref().map(|page| page.ship_id.clone())
                else {
                    return;
                };
                self.submit(ActionKind::AssignSensors, |actions| {
                    actions.assign_sensors(ship_id, tank_id, sensor_ids);
                });
            }
            Modal::Drilldown(_) | Modal::SensorLog { .. } => self.modal = None,
        }
    }
}

fn in_progress(kind: ActionKind) -> String {
    format!("{}...", kind.label())
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

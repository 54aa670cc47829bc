use std::collections::HashSet;
use std::future::Future;

use tokio::sync::mpsc::UnboundedSender;

use crate::api::{FleetClient, GatewayError, NewShip, NewTank, Sensor, ShipUpdate};
use crate::store::Snapshot;

/// Kinds of user-initiated requests. At most one mutation of each kind is in
/// flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    CreateShip,
    UpdateShip,
    SetStatus,
    DeleteShip,
    Acknowledge,
    AddTank,
    AssignSensors,
    LoadSensor,
}

impl ActionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreateShip => "Creating ship",
            Self::UpdateShip => "Updating ship",
            Self::SetStatus => "Changing status",
            Self::DeleteShip => "Deleting ship",
            Self::Acknowledge => "Acknowledging alarm",
            Self::AddTank => "Adding tank",
            Self::AssignSensors => "Assigning sensors",
            Self::LoadSensor => "Loading sensor",
        }
    }

    /// Whether success changes server state and calls for a refresh.
    pub const fn is_mutation(self) -> bool {
        !matches!(self, Self::LoadSensor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Done(String),
    SensorLoaded(Box<Sensor>),
}

/// Everything that reaches the app loop from background tasks.
#[derive(Debug)]
pub enum AppEvent {
    Snapshot(Result<Snapshot, GatewayError>),
    Action {
        kind: ActionKind,
        /// Id of the ship, tank or sensor the request was about
        target: Option<String>,
        result: Result<ActionOutcome, GatewayError>,
    },
}

/// In-flight flags, one per action kind.
#[derive(Debug, Default)]
pub struct PendingActions {
    in_flight: HashSet<ActionKind>,
}

impl PendingActions {
    /// Mark `kind` as started. Returns `false` if one is already running.
    pub fn begin(&mut self, kind: ActionKind) -> bool {
        self.in_flight.insert(kind)
    }

    pub fn finish(&mut self, kind: ActionKind) {
        self.in_flight.remove(&kind);
    }

    pub fn is_pending(&self, kind: ActionKind) -> bool {
        self.in_flight.contains(&kind)
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }
}

/// Runs gateway calls off the UI loop and reports back over the event channel.
#[derive(Debug, Clone)]
pub struct AppActions {
    client: FleetClient,
    events: UnboundedSender<AppEvent>,
}

impl AppActions {
    pub const fn new(client: FleetClient, events: UnboundedSender<AppEvent>) -> Self {
        Self { client, events }
    }

    fn spawn<F, Fut>(&self, kind: ActionKind, target: Option<String>, call: F)
    where
        F: FnOnce(FleetClient) -> Fut + Send + 'static,
        Fut: Future<Output = Result<ActionOutcome, GatewayError>> + Send + 'static,
    {
        let client = self.client.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = call(client).await;
            if let Err(error) = &result {
                tracing::warn!(?kind, %error, rejected = error.is_validation(), "action failed");
            }
            let event = AppEvent::Action {
                kind,
                target,
                result,
            };
            if events.send(event).is_err() {
                tracing::debug!(?kind, "event loop gone, dropping action result");
            }
        });
    }

    pub fn create_ship(&self, ship: NewShip) {
        self.spawn(ActionKind::CreateShip, None, move |client| async move {
            client.create_ship(&ship).await?;
            Ok(ActionOutcome::Done(format!("Ship {} created.", ship.name)))
        });
    }

    pub fn update_ship(&self, kind: ActionKind, ship_id: String, update: ShipUpdate) {
        self.spawn(kind, Some(ship_id.clone()), move |client| async move {
            client.update_ship(&ship_id, &update).await?;
            let message = if kind == ActionKind::SetStatus {
                format!("{} is now {}.", update.name, update.status)
            } else {
                format!("Ship {} updated.", update.name)
            };
            Ok(ActionOutcome::Done(message))
        });
    }

    pub fn delete_ship(&self, ship_id: String, name: String) {
        self.spawn(ActionKind::DeleteShip, Some(ship_id.clone()), move |client| async move {
            client.delete_ship(&ship_id).await?;
            Ok(ActionOutcome::Done(format!("Ship {name} deleted.")))
        });
    }

    pub fn acknowledge_alarm(&self, ship_id: String) {
        self.spawn(ActionKind::Acknowledge, Some(ship_id.clone()), move |client| async move {
            client.acknowledge_alarm(&ship_id).await?;
            Ok(ActionOutcome::Done("Alarm acknowledged by user.".to_string()))
        });
    }

    pub fn add_tank(&self, ship_id: String, tank: NewTank) {
        self.spawn(ActionKind::AddTank, Some(ship_id.clone()), move |client| async move {
            client.add_tank(&ship_id, &tank).await?;
            Ok(ActionOutcome::Done(format!("Tank {} added.", tank.id)))
        });
    }

    pub fn assign_sensors(&self, ship_id: String, tank_id: String, sensor_ids: Vec<String>) {
        self.spawn(ActionKind::AssignSensors, Some(tank_id.clone()), move |client| async move {
            client.assign_sensors(&ship_id, &tank_id, &sensor_ids).await?;
            Ok(ActionOutcome::Done(format!(
                "{} sensor(s) assigned to tank {tank_id}.",
                sensor_ids.len()
            )))
        });
    }

    pub fn load_sensor(&self, sensor_id: String) {
        self.spawn(ActionKind::LoadSensor, Some(sensor_id.clone()), move |client| async move {
            let sensor = client.get_sensor(&sensor_id).await?;
            Ok(ActionOutcome::SensorLoaded(Box::new(sensor)))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_submission_of_same_kind_is_rejected() {
        let mut pending = PendingActions::default();
        assert!(pending.begin(ActionKind::DeleteShip));
        assert!(!pending.begin(ActionKind::DeleteShip));
        assert!(pending.begin(ActionKind::AddTank));

        pending.finish(ActionKind::DeleteShip);
        assert!(!pending.is_pending(ActionKind::DeleteShip));
        assert!(pending.begin(ActionKind::DeleteShip));
    }

    #[test]
    fn only_sensor_loading_skips_refresh() {
        assert!(ActionKind::Acknowledge.is_mutation());
        assert!(!ActionKind::LoadSensor.is_mutation());
    }
}

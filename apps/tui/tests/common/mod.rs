//! In-process fleet API used by the integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use fleet_console::api::FleetClient;

#[derive(Debug, Default)]
pub struct MockFleet {
    pub ships: Vec<Value>,
    pub sensors: Vec<Value>,
    pub tank_types: Vec<Value>,
    /// Bodies received by `POST /ships`
    pub created: Vec<Value>,
    /// Decoded ship id and body of every `PUT /ships/{id}`
    pub updates: Vec<(String, Value)>,
    /// Decoded ship id, tank id and body of every sensor assignment
    pub assignments: Vec<(String, String, Value)>,
    /// Ship ids received by the acknowledge endpoint, already decoded
    pub acknowledged: Vec<String>,
    /// Sensor ids looked up individually, already decoded
    pub sensor_lookups: Vec<String>,
}

pub type Shared = Arc<Mutex<MockFleet>>;

pub struct MockServer {
    pub addr: SocketAddr,
    pub state: Shared,
}

impl MockServer {
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn client(&self) -> FleetClient {
        FleetClient::new(self.base_url(), Duration::from_secs(2)).unwrap()
    }
}

pub fn seeded() -> MockFleet {
    MockFleet {
        ships: vec![
            json!({
                "id": "MTGREATMANTA",
                "name": "MT Great Manta",
                "lastPort": "Singapore",
                "arrived": "2024-05-01",
                "personnel": 14,
                "status": "Danger",
                "tanks": [{ "id": "T1", "sensors": [{ "id": "S-100" }] }]
            }),
            json!({
                "id": "ORCA",
                "name": "Orca",
                "lastPort": "Rotterdam",
                "personnel": 6,
                "status": "WIP",
                "tanks": []
            }),
        ],
        sensors: vec![json!({
            "id": "S-100",
            "type": "Gas",
            "status": "In Use",
            "battery": 87,
            "last_calibrated": "2024-04-01",
            "last_used_on_ship": "MTGREATMANTA",
            "logs": []
        })],
        tank_types: vec![json!({ "id": "cargo", "name": "Cargo" })],
        ..MockFleet::default()
    }
}

pub async fn serve(fleet: MockFleet) -> MockServer {
    let state: Shared = Arc::new(Mutex::new(fleet));

    let api = Router::new()
        .route("/ships", get(list_ships).post(create_ship))
        .route("/ships/{id}", put(update_ship).delete(delete_ship))
        .route("/ships/{id}/acknowledge", put(acknowledge))
        .route("/ships/{id}/tanks", post(add_tank))
        .route("/ships/{id}/tanks/{tank_id}/sensors", post(assign_sensors))
        .route("/master/sensors", get(list_sensors))
        .route("/master/sensors/{id}", get(get_sensor))
        .route("/master/tank-types", get(list_tank_types))
        .with_state(Arc::clone(&state));
    let router = Router::new().nest("/api", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockServer { addr, state }
}

async fn list_ships(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(state.lock().unwrap().ships.clone()))
}

async fn create_ship(State(state): State<Shared>, Json(body): Json<Value>) -> StatusCode {
    let mut fleet = state.lock().unwrap();
    fleet.created.push(body.clone());
    fleet.ships.push(body);
    StatusCode::CREATED
}

async fn update_ship(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> StatusCode {
    let mut fleet = state.lock().unwrap();
    fleet.updates.push((id.clone(), body.clone()));
    let Some(ship) = fleet.ships.iter_mut().find(|ship| ship["id"] == id) else {
        return StatusCode::NOT_FOUND;
    };
    ship["status"] = body["status"].clone();
    StatusCode::OK
}

/// Always fails without a `detail`, so clients fall back to their own message.
async fn delete_ship() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn acknowledge(State(state): State<Shared>, Path(id): Path<String>) -> StatusCode {
    let mut fleet = state.lock().unwrap();
    fleet.acknowledged.push(id.clone());
    if let Some(ship) = fleet.ships.iter_mut().find(|ship| ship["id"] == id) {
        ship["status"] = json!("Idle");
    }
    StatusCode::OK
}

/// Rejects every tank as a duplicate.
async fn add_tank() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "detail": "Tank already exists" })),
    )
        .into_response()
}

async fn assign_sensors(
    State(state): State<Shared>,
    Path((ship_id, tank_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> StatusCode {
    state
        .lock()
        .unwrap()
        .assignments
        .push((ship_id, tank_id, body));
    StatusCode::OK
}

async fn list_sensors(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(state.lock().unwrap().sensors.clone()))
}

async fn get_sensor(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let mut fleet = state.lock().unwrap();
    fleet.sensor_lookups.push(id.clone());
    match fleet.sensors.iter().find(|sensor| sensor["id"] == id) {
        Some(sensor) => Json(sensor.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Sensor not found" })),
        )
            .into_response(),
    }
}

async fn list_tank_types(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(state.lock().unwrap().tank_types.clone()))
}

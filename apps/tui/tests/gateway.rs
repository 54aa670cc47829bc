mod common;

use fleet_console::api::{GatewayError, NewShip, NewTank, ShipUpdate};
use serde_json::json;
use fleet_console::store::SnapshotSource;
use fleet_console::ShipStatus;

use common::{seeded, serve};

#[tokio::test]
async fn snapshot_collects_every_collection() {
    let server = serve(seeded()).await;

    let snapshot = server.client().fetch_snapshot().await.unwrap();

    assert_eq!(snapshot.ships.len(), 2);
    assert_eq!(snapshot.sensors.len(), 1);
    assert_eq!(snapshot.tank_types.len(), 1);
    let manta = snapshot.ship("MTGREATMANTA").unwrap();
    assert_eq!(manta.status, ShipStatus::Danger);
    assert_eq!(manta.last_port, "Singapore");
    assert_eq!(manta.tanks[0].sensors[0].id, "S-100");
}

#[tokio::test]
async fn created_ship_carries_derived_id() {
    let server = serve(seeded()).await;

    let ship = NewShip::from_form("Sea  Lion", "Oslo", 3);
    server.client().create_ship(&ship).await.unwrap();

    let created = server.state.lock().unwrap().created.clone();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["id"], "SEALION");
    assert_eq!(created[0]["lastPort"], "Oslo");
    assert_eq!(created[0]["status"], "Idle");
}

#[tokio::test]
async fn server_detail_is_surfaced_as_validation() {
    let server = serve(seeded()).await;

    let tank = NewTank {
        id: "T1".to_string(),
        type_id: "cargo".to_string(),
    };
    let error = server
        .client()
        .add_tank("MTGREATMANTA", &tank)
        .await
        .unwrap_err();

    assert!(error.is_validation());
    assert_eq!(error.to_string(), "Tank already exists");
}

#[tokio::test]
async fn missing_detail_falls_back_to_generic_message() {
    let server = serve(seeded()).await;

    let error = server.client().delete_ship("ORCA").await.unwrap_err();

    assert!(matches!(error, GatewayError::Http { .. }));
    assert_eq!(error.to_string(), "Failed to delete ship.");
}

#[tokio::test]
async fn path_segments_are_encoded() {
    let mut fleet = seeded();
    fleet.sensors.push(serde_json::json!({
        "id": "A B/1",
        "type": "Temp",
        "status": "Available",
        "battery": 40
    }));
    let server = serve(fleet).await;

    let sensor = server.client().get_sensor("A B/1").await.unwrap();

    assert_eq!(sensor.id, "A B/1");
    assert_eq!(server.state.lock().unwrap().sensor_lookups, vec!["A B/1"]);
}

#[tokio::test]
async fn unreachable_api_is_a_network_error() {
    let client = fleet_console::api::FleetClient::new(
        "http://127.0.0.1:9/api",
        std::time::Duration::from_millis(500),
    )
    .unwrap();

    let error = client.list_ships().await.unwrap_err();

    assert!(matches!(error, GatewayError::Network { .. }));
    assert!(error.to_string().starts_with("Failed to load ships."));
}

#[tokio::test]
async fn sensor_assignment_hits_nested_path_with_ids() {
    let server = serve(seeded()).await;

    let ids = vec!["S-100".to_string(), "S 200".to_string()];
    server
        .client()
        .assign_sensors("MT GREAT/MANTA", "T 1", &ids)
        .await
        .unwrap();

    let assignments = server.state.lock().unwrap().assignments.clone();
    assert_eq!(assignments.len(), 1);
    let (ship_id, tank_id, body) = &assignments[0];
    assert_eq!(ship_id, "MT GREAT/MANTA");
    assert_eq!(tank_id, "T 1");
    assert_eq!(body, &json!({ "sensor_ids": ["S-100", "S 200"] }));
}

#[tokio::test]
async fn ship_update_sends_every_editable_field() {
    let server = serve(seeded()).await;

    let update = ShipUpdate {
        name: "Orca II".to_string(),
        last_port: "Hamburg".to_string(),
        personnel: 9,
        status: ShipStatus::Idle,
    };
    server.client().update_ship("ORCA", &update).await.unwrap();

    let updates = server.state.lock().unwrap().updates.clone();
    assert_eq!(
        updates,
        vec![(
            "ORCA".to_string(),
            json!({
                "name": "Orca II",
                "lastPort": "Hamburg",
                "personnel": 9,
                "status": "Idle"
            })
        )]
    );
}

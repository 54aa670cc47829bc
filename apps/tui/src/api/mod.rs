pub mod client;
pub mod models;

pub use client::{FleetClient, GatewayError, DEFAULT_API_URL};
pub use models::{
    LogEntry, NewShip, NewTank, Sensor, SensorAssignment, Ship, ShipUpdate, Tank, TankType,
};

//! HTTP gateway to the fleet API.
//!
//! Every operation is exactly one request. Nothing is retried here; the poller
//! simply asks again on its next tick and user actions are re-run by the user.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::models::{
    ErrorBody, NewShip, NewTank, SensorIdsRequest, Sensor, Ship, ShipUpdate, TankType,
};
use crate::store::{Snapshot, SnapshotSource};

/// Default base URL of the fleet API.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

/// Failures surfaced by the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a response (connect error, timeout, ...).
    #[error("{context} ({source})")]
    Network {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success status without a usable `detail`.
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    /// The server rejected the payload and said why.
    #[error("{detail}")]
    Validation { status: StatusCode, detail: String },

    /// A success response whose body did not parse.
    #[error("{context} (invalid response body: {source})")]
    Decode {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl GatewayError {
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// HTTP client for the fleet API.
#[derive(Debug, Clone)]
pub struct FleetClient {
    base_url: String,
    client: Client,
}

impl FleetClient {
    /// Create a client whose requests give up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    async fn send(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> Result<Response, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|source| GatewayError::Network { context, source })?;
        check_status(response, context).await
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> Result<T, GatewayError> {
        let response = self.send(request, context).await?;
        response
            .json()
            .await
            .map_err(|source| GatewayError::Decode { context, source })
    }

    // ============================================================
    // Ships
    // ============================================================

    pub async fn list_ships(&self) -> Result<Vec<Ship>, GatewayError> {
        self.fetch_json(self.request(Method::GET, "/ships"), "Failed to load ships.")
            .await
    }

    pub async fn create_ship(&self, ship: &NewShip) -> Result<(), GatewayError> {
        tracing::debug!(ship_id = %ship.id, "creating ship");
        self.send(
            self.request(Method::POST, "/ships").json(ship),
            "Failed to create ship.",
        )
        .await?;
        Ok(())
    }

    pub async fn update_ship(&self, id: &str, update: &ShipUpdate) -> Result<(), GatewayError> {
        tracing::debug!(ship_id = id, status = %update.status, "updating ship");
        self.send(
            self.request(Method::PUT, &format!("/ships/{}", encode(id)))
                .json(update),
            "Failed to update ship.",
        )
        .await?;
        Ok(())
    }

    pub async fn delete_ship(&self, id: &str) -> Result<(), GatewayError> {
        tracing::debug!(ship_id = id, "deleting ship");
        self.send(
            self.request(Method::DELETE, &format!("/ships/{}", encode(id))),
            "Failed to delete ship.",
        )
        .await?;
        Ok(())
    }

    pub async fn acknowledge_alarm(&self, id: &str) -> Result<(), GatewayError> {
        tracing::debug!(ship_id = id, "acknowledging alarm");
        self.send(
            self.request(Method::PUT, &format!("/ships/{}/acknowledge", encode(id))),
            "Failed to acknowledge alarm.",
        )
        .await?;
        Ok(())
    }

    // ============================================================
    // Tanks
    // ============================================================

    pub async fn add_tank(&self, ship_id: &str, tank: &NewTank) -> Result<(), GatewayError> {
        tracing::debug!(ship_id, tank_id = %tank.id, "adding tank");
        self.send(
            self.request(Method::POST, &format!("/ships/{}/tanks", encode(ship_id)))
                .json(tank),
            "Failed to add tank.",
        )
        .await?;
        Ok(())
    }

    pub async fn assign_sensors(
        &self,
        ship_id: &str,
        tank_id: &str,
        sensor_ids: &[String],
    ) -> Result<(), GatewayError> {
        tracing::debug!(ship_id, tank_id, count = sensor_ids.len(), "assigning sensors");
        let body = SensorIdsRequest {
            sensor_ids: sensor_ids.to_vec(),
        };
        self.send(
            self.request(
                Method::POST,
                &format!(
                    "/ships/{}/tanks/{}/sensors",
                    encode(ship_id),
                    encode(tank_id)
                ),
            )
            .json(&body),
            "Failed to assign sensors.",
        )
        .await?;
        Ok(())
    }

    // ============================================================
    // Master data
    // ============================================================

    pub async fn list_sensors(&self) -> Result<Vec<Sensor>, GatewayError> {
        self.fetch_json(
            self.request(Method::GET, "/master/sensors"),
            "Failed to load sensors.",
        )
        .await
    }

    /// A single sensor including its log entries.
    pub async fn get_sensor(&self, id: &str) -> Result<Sensor, GatewayError> {
        self.fetch_json(
            self.request(Method::GET, &format!("/master/sensors/{}", encode(id))),
            "Could not load sensor details.",
        )
        .await
    }

    pub async fn list_tank_types(&self) -> Result<Vec<TankType>, GatewayError> {
        self.fetch_json(
            self.request(Method::GET, "/master/tank-types"),
            "Failed to load tank types.",
        )
        .await
    }
}

impl SnapshotSource for FleetClient {
    async fn fetch_snapshot(&self) -> Result<Snapshot, GatewayError> {
        let (ships, sensors, tank_types) = tokio::try_join!(
            self.list_ships(),
            self.list_sensors(),
            self.list_tank_types()
        )?;
        Ok(Snapshot::new(ships, sensors, tank_types))
    }
}

fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Turn a non-success response into a typed error, preferring the server's
/// `detail` message over the generic one.
async fn check_status(response: Response, context: &'static str) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|body| body.message());

    tracing::warn!(%status, context, detail = detail.as_deref(), "request rejected");

    Err(match detail {
        Some(detail) => GatewayError::Validation { status, detail },
        None => GatewayError::Http {
            status,
            message: context.to_string(),
        },
    })
}

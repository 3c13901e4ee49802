use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use aerobook_core::error::BookingError;
use aerobook_core::flight::{Flight, FlightClient};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Envelope the flight service wraps every payload in.
#[derive(Debug, Deserialize)]
struct FlightEnvelope {
    data: Flight,
}

/// `FlightClient` over HTTP, talking to
/// `{base_url}/api/v1/flights/{flight_id}`.
#[derive(Clone)]
pub struct HttpFlightClient {
    client: Client,
    base_url: String,
}

impl HttpFlightClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BookingError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BookingError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn flight_url(&self, flight_id: &str) -> String {
        format!("{}/api/v1/flights/{}", self.base_url, flight_id)
    }
}

#[async_trait]
impl FlightClient for HttpFlightClient {
    async fn fetch_flight(&self, flight_id: &str) -> Result<Flight, BookingError> {
        let response = self
            .client
            .get(self.flight_url(flight_id))
            .send()
            .await
            .map_err(|e| BookingError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BookingError::Upstream(format!(
                "flight service returned {} for flight {}",
                status, flight_id
            )));
        }

        response
            .json::<FlightEnvelope>()
            .await
            .map(|envelope| envelope.data)
            .map_err(|e| BookingError::Upstream(e.to_string()))
    }

    async fn update_seats(&self, flight_id: &str, total_seats: i64) -> Result<(), BookingError> {
        let response = self
            .client
            .patch(self.flight_url(flight_id))
            .json(&json!({ "totalSeats": total_seats }))
            .send()
            .await
            .map_err(|e| BookingError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BookingError::Upstream(format!(
                "flight service returned {} updating flight {}",
                status, flight_id
            )));
        }

        Ok(())
    }
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BookingError;

/// Snapshot of a flight as reported by the flight service. The service wraps
/// it in a `{"data": {...}}` envelope and sends camelCase field names; extra
/// fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub price: i64,
    pub total_seats: i64,
}

/// Client for the external flight inventory service.
///
/// No retries, no circuit breaking: any transport failure or non-success
/// response surfaces immediately as `BookingError::Upstream`.
#[async_trait]
pub trait FlightClient: Send + Sync {
    /// Read the current price and seat count for a flight.
    async fn fetch_flight(&self, flight_id: &str) -> Result<Flight, BookingError>;

    /// Overwrite the remote flight's seat count.
    async fn update_seats(&self, flight_id: &str, total_seats: i64) -> Result<(), BookingError>;
}

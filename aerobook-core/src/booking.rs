use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A seat reservation on a flight. `total_cost` is derived from the price the
/// flight service reported at booking time and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub flight_id: String,
    pub user_id: Option<Uuid>,
    pub no_of_seats: u32,
    pub total_cost: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rows are inserted `Initiated` and flipped to `Booked` once the remote seat
/// update has gone through. No other transitions exist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingStatus {
    Initiated,
    Booked,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Initiated => "Initiated",
            BookingStatus::Booked => "Booked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Initiated" => Some(BookingStatus::Initiated),
            "Booked" => Some(BookingStatus::Booked),
            _ => None,
        }
    }
}

/// Inbound payload for `POST /api/v1/bookings`. The wire format is camelCase
/// (`flightId`, `noOfSeats`, `userId`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub flight_id: String,
    pub no_of_seats: u32,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// What the store persists: the request fields plus the derived cost. The id,
/// status and timestamps are filled in at persistence time.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub flight_id: String,
    pub user_id: Option<Uuid>,
    pub no_of_seats: u32,
    pub total_cost: i64,
}

/// Partial update applied via `BookingStore::update`. Only the status is
/// updatable today.
#[derive(Debug, Clone, Default)]
pub struct BookingUpdate {
    pub status: Option<BookingStatus>,
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::booking::{Booking, BookingUpdate, NewBooking};
use crate::error::BookingError;

/// Persistence seam for booking records.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Insert a new booking with status `Initiated`, returning the stored row
    /// including the generated id.
    async fn create(&self, booking: NewBooking) -> Result<Booking, BookingError>;

    /// Apply a partial update to an existing booking and return the updated
    /// row. `NotFound` when the id does not exist.
    async fn update(&self, id: Uuid, changes: BookingUpdate) -> Result<Booking, BookingError>;
}

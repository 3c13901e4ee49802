use thiserror::Error;

/// Error taxonomy for the booking service.
///
/// Domain errors (`InsufficientSeats`, `Validation`, `NotFound`) travel to the
/// caller untouched; everything else is collapsed into `Internal` at the
/// workflow boundary, and the root cause survives only in the logs.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Flight service request failed: {0}")]
    Upstream(String),

    #[error("Insufficient seats: requested {requested}, available {available}")]
    InsufficientSeats { requested: u32, available: i64 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Booking not found: {0}")]
    NotFound(String),

    #[error("Something went wrong in the booking process")]
    Internal(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl BookingError {
    /// Secondary human-readable string exposed in the HTTP error body next to
    /// the message.
    pub fn explanation(&self) -> &'static str {
        match self {
            BookingError::Upstream(_) => "Flight service is unavailable",
            BookingError::InsufficientSeats { .. } => "Insufficient seats",
            BookingError::Validation(_) => "Request data failed validation",
            BookingError::NotFound(_) => "Requested resource was not found",
            BookingError::Internal(_) => "Service layer error",
        }
    }

    /// Domain errors pass through the workflow unwrapped.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            BookingError::InsufficientSeats { .. }
                | BookingError::Validation(_)
                | BookingError::NotFound(_)
        )
    }
}

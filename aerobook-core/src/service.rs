use std::sync::Arc;

use tracing::{error, info};

use crate::booking::{Booking, BookingStatus, BookingUpdate, CreateBookingRequest, NewBooking};
use crate::error::BookingError;
use crate::flight::FlightClient;
use crate::repository::BookingStore;

/// Orchestrates a booking: availability check against the flight service,
/// local persist, remote seat update, confirmation.
///
/// The sequence is not transactional. A failure after the insert leaves the
/// row `Initiated`, and a failure after the seat update leaves the remote
/// inventory decremented with no compensating action.
pub struct BookingService {
    store: Arc<dyn BookingStore>,
    flights: Arc<dyn FlightClient>,
}

impl BookingService {
    pub fn new(store: Arc<dyn BookingStore>, flights: Arc<dyn FlightClient>) -> Self {
        Self { store, flights }
    }

    pub async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> Result<Booking, BookingError> {
        self.run(request).await.map_err(|err| {
            if err.is_domain() {
                err
            } else {
                error!("Booking failed: {}", err);
                BookingError::Internal(err.to_string())
            }
        })
    }

    async fn run(&self, request: CreateBookingRequest) -> Result<Booking, BookingError> {
        let flight = self.flights.fetch_flight(&request.flight_id).await?;

        let seats_left = flight.total_seats - i64::from(request.no_of_seats);
        if seats_left < 0 {
            return Err(BookingError::InsufficientSeats {
                requested: request.no_of_seats,
                available: flight.total_seats,
            });
        }

        let total_cost = flight.price * i64::from(request.no_of_seats);

        let booking = self
            .store
            .create(NewBooking {
                flight_id: request.flight_id.clone(),
                user_id: request.user_id,
                no_of_seats: request.no_of_seats,
                total_cost,
            })
            .await?;

        self.flights
            .update_seats(&request.flight_id, seats_left)
            .await?;

        let booking = self
            .store
            .update(
                booking.id,
                BookingUpdate {
                    status: Some(BookingStatus::Booked),
                },
            )
            .await?;

        info!("Booking confirmed: {}", booking.id);
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::Flight;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    struct MockFlightClient {
        flight: Flight,
        fail_fetch: bool,
        fail_update: bool,
        seat_updates: Mutex<Vec<(String, i64)>>,
    }

    impl MockFlightClient {
        fn new(price: i64, total_seats: i64) -> Self {
            Self {
                flight: Flight { price, total_seats },
                fail_fetch: false,
                fail_update: false,
                seat_updates: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl FlightClient for MockFlightClient {
        async fn fetch_flight(&self, _flight_id: &str) -> Result<Flight, BookingError> {
            if self.fail_fetch {
                return Err(BookingError::Upstream("connection refused".to_string()));
            }
            Ok(self.flight.clone())
        }

        async fn update_seats(
            &self,
            flight_id: &str,
            total_seats: i64,
        ) -> Result<(), BookingError> {
            if self.fail_update {
                return Err(BookingError::Upstream("connection reset".to_string()));
            }
            self.seat_updates
                .lock()
                .unwrap()
                .push((flight_id.to_string(), total_seats));
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockStore {
        rows: Mutex<HashMap<Uuid, Booking>>,
        fail_create: Option<fn() -> BookingError>,
        fail_update: Option<fn() -> BookingError>,
    }

    #[async_trait::async_trait]
    impl BookingStore for MockStore {
        async fn create(&self, booking: NewBooking) -> Result<Booking, BookingError> {
            if let Some(err) = self.fail_create {
                return Err(err());
            }
            let now = chrono::Utc::now();
            let row = Booking {
                id: Uuid::new_v4(),
                flight_id: booking.flight_id,
                user_id: booking.user_id,
                no_of_seats: booking.no_of_seats,
                total_cost: booking.total_cost,
                status: BookingStatus::Initiated,
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().unwrap().insert(row.id, row.clone());
            Ok(row)
        }

        async fn update(&self, id: Uuid, changes: BookingUpdate) -> Result<Booking, BookingError> {
            if let Some(err) = self.fail_update {
                return Err(err());
            }
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .get_mut(&id)
                .ok_or_else(|| BookingError::NotFound(id.to_string()))?;
            if let Some(status) = changes.status {
                row.status = status;
            }
            row.updated_at = chrono::Utc::now();
            Ok(row.clone())
        }
    }

    fn request(flight_id: &str, no_of_seats: u32) -> CreateBookingRequest {
        CreateBookingRequest {
            flight_id: flight_id.to_string(),
            no_of_seats,
            user_id: None,
        }
    }

    fn service(
        store: MockStore,
        flights: MockFlightClient,
    ) -> (BookingService, Arc<MockStore>, Arc<MockFlightClient>) {
        let store = Arc::new(store);
        let flights = Arc::new(flights);
        (
            BookingService::new(store.clone(), flights.clone()),
            store,
            flights,
        )
    }

    #[tokio::test]
    async fn test_books_when_seats_available() {
        let (svc, store, flights) = service(MockStore::default(), MockFlightClient::new(100, 5));

        let booking = svc.create_booking(request("F1", 3)).await.unwrap();

        assert_eq!(booking.status, BookingStatus::Booked);
        assert_eq!(booking.total_cost, 300);
        assert_eq!(booking.flight_id, "F1");

        // Remote inventory set to total - requested
        let updates = flights.seat_updates.lock().unwrap();
        assert_eq!(updates.as_slice(), &[("F1".to_string(), 2)]);

        // Stored row is confirmed too
        let rows = store.rows.lock().unwrap();
        assert_eq!(rows[&booking.id].status, BookingStatus::Booked);
    }

    #[tokio::test]
    async fn test_rejects_insufficient_seats_without_side_effects() {
        let (svc, store, flights) = service(MockStore::default(), MockFlightClient::new(100, 2));

        let err = svc.create_booking(request("F1", 5)).await.unwrap_err();

        match err {
            BookingError::InsufficientSeats {
                requested,
                available,
            } => {
                assert_eq!(requested, 5);
                assert_eq!(available, 2);
            }
            other => panic!("expected InsufficientSeats, got {other:?}"),
        }

        // No store write, no remote update
        assert!(store.rows.lock().unwrap().is_empty());
        assert!(flights.seat_updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_creates_nothing() {
        let mut flights = MockFlightClient::new(100, 5);
        flights.fail_fetch = true;
        let (svc, store, _) = service(MockStore::default(), flights);

        let err = svc.create_booking(request("F1", 1)).await.unwrap_err();

        // Upstream failures collapse into the generic error
        assert!(matches!(err, BookingError::Internal(_)));
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seat_update_failure_leaves_row_initiated() {
        let mut flights = MockFlightClient::new(100, 5);
        flights.fail_update = true;
        let (svc, store, _) = service(MockStore::default(), flights);

        let err = svc.create_booking(request("F1", 2)).await.unwrap_err();
        assert!(matches!(err, BookingError::Internal(_)));

        // The row was persisted and never confirmed
        let rows = store.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        let row = rows.values().next().unwrap();
        assert_eq!(row.status, BookingStatus::Initiated);
        assert_eq!(row.total_cost, 200);
    }

    #[tokio::test]
    async fn test_confirm_failure_leaves_seats_decremented() {
        let store = MockStore {
            fail_update: Some(|| BookingError::Internal("connection pool closed".to_string())),
            ..MockStore::default()
        };
        let (svc, store, flights) = service(store, MockFlightClient::new(100, 5));

        let err = svc.create_booking(request("F1", 2)).await.unwrap_err();
        assert!(matches!(err, BookingError::Internal(_)));

        // Seats were already taken remotely; no compensating action runs
        assert_eq!(flights.seat_updates.lock().unwrap().len(), 1);
        let rows = store.rows.lock().unwrap();
        assert_eq!(rows.values().next().unwrap().status, BookingStatus::Initiated);
    }

    #[tokio::test]
    async fn test_store_validation_passes_through_unwrapped() {
        let store = MockStore {
            fail_create: Some(|| BookingError::Validation("noOfSeats must be positive".to_string())),
            ..MockStore::default()
        };
        let (svc, _, _) = service(store, MockFlightClient::new(100, 5));

        let err = svc.create_booking(request("F1", 3)).await.unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[tokio::test]
    async fn test_repeat_requests_book_twice() {
        let (svc, store, flights) = service(MockStore::default(), MockFlightClient::new(100, 5));

        let first = svc.create_booking(request("F1", 3)).await.unwrap();
        let second = svc.create_booking(request("F1", 3)).await.unwrap();

        // No idempotence: two rows, two seat updates
        assert_ne!(first.id, second.id);
        assert_eq!(store.rows.lock().unwrap().len(), 2);
        assert_eq!(flights.seat_updates.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_exact_seat_count_books_to_zero() {
        let (svc, _, flights) = service(MockStore::default(), MockFlightClient::new(80, 4));

        let booking = svc.create_booking(request("F9", 4)).await.unwrap();

        assert_eq!(booking.total_cost, 320);
        let updates = flights.seat_updates.lock().unwrap();
        assert_eq!(updates.as_slice(), &[("F9".to_string(), 0)]);
    }
}

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::Row;
use uuid::Uuid;

use aerobook_core::booking::{Booking, BookingStatus, BookingUpdate, NewBooking};
use aerobook_core::error::BookingError;
use aerobook_core::repository::BookingStore;

use crate::database::DbClient;

const BOOKING_COLUMNS: &str =
    "id, flight_id, user_id, no_of_seats, total_cost, status, created_at, updated_at";

/// Postgres-backed booking store.
pub struct PgBookingStore {
    db: DbClient,
}

impl PgBookingStore {
    pub fn new(db: DbClient) -> Self {
        Self { db }
    }

    fn map_row(row: &PgRow) -> Result<Booking, BookingError> {
        let status: String = row.try_get("status").map_err(store_error)?;
        let status = BookingStatus::parse(&status)
            .ok_or_else(|| BookingError::Validation(format!("unknown booking status: {status}")))?;
        let no_of_seats: i32 = row.try_get("no_of_seats").map_err(store_error)?;

        Ok(Booking {
            id: row.try_get("id").map_err(store_error)?,
            flight_id: row.try_get("flight_id").map_err(store_error)?,
            user_id: row.try_get("user_id").map_err(store_error)?,
            no_of_seats: no_of_seats as u32,
            total_cost: row.try_get("total_cost").map_err(store_error)?,
            status,
            created_at: row.try_get("created_at").map_err(store_error)?,
            updated_at: row.try_get("updated_at").map_err(store_error)?,
        })
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn create(&self, booking: NewBooking) -> Result<Booking, BookingError> {
        let sql = format!(
            "INSERT INTO bookings ({BOOKING_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {BOOKING_COLUMNS}"
        );
        let now = Utc::now();

        let row = sqlx::query(&sql)
            .bind(Uuid::new_v4())
            .bind(&booking.flight_id)
            .bind(booking.user_id)
            .bind(booking.no_of_seats as i32)
            .bind(booking.total_cost)
            .bind(BookingStatus::Initiated.as_str())
            .bind(now)
            .bind(now)
            .fetch_one(&self.db.pool)
            .await
            .map_err(store_error)?;

        Self::map_row(&row)
    }

    async fn update(&self, id: Uuid, changes: BookingUpdate) -> Result<Booking, BookingError> {
        let row = match changes.status {
            Some(status) => {
                let sql = format!(
                    "UPDATE bookings SET status = $1, updated_at = $2 \
                     WHERE id = $3 \
                     RETURNING {BOOKING_COLUMNS}"
                );
                sqlx::query(&sql)
                    .bind(status.as_str())
                    .bind(Utc::now())
                    .bind(id)
                    .fetch_optional(&self.db.pool)
                    .await
            }
            // Nothing to change: read the current row back
            None => {
                let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1");
                sqlx::query(&sql)
                    .bind(id)
                    .fetch_optional(&self.db.pool)
                    .await
            }
        }
        .map_err(store_error)?;

        let row = row.ok_or_else(|| BookingError::NotFound(id.to_string()))?;
        Self::map_row(&row)
    }
}

fn store_error(err: sqlx::Error) -> BookingError {
    match err {
        sqlx::Error::RowNotFound => BookingError::NotFound("booking".to_string()),
        sqlx::Error::Database(db) if db.constraint().is_some() => {
            BookingError::Validation(db.to_string())
        }
        other => BookingError::Internal(other.to_string()),
    }
}

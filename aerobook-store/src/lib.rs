pub mod app_config;
pub mod booking_repo;
pub mod database;
pub mod events;
pub mod flight_client;

pub use booking_repo::PgBookingStore;
pub use database::DbClient;
pub use events::EventProducer;
pub use flight_client::HttpFlightClient;

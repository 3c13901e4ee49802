use std::net::SocketAddr;
use std::sync::Arc;

use aerobook_api::{app, state::AppState};
use aerobook_core::service::BookingService;
use aerobook_store::{DbClient, EventProducer, HttpFlightClient, PgBookingStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aerobook_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = aerobook_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Aerobook API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let flights = HttpFlightClient::new(config.flight_service.base_url.clone())
        .expect("Failed to build flight service client");

    let events =
        EventProducer::new(&config.kafka.brokers).expect("Failed to create Kafka producer");

    let bookings = BookingService::new(Arc::new(PgBookingStore::new(db)), Arc::new(flights));

    let state = AppState {
        bookings: Arc::new(bookings),
        events: Arc::new(events),
        reminder_topic: config.kafka.reminder_topic.clone(),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app(state)).await.unwrap();
}

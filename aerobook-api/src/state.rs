use std::sync::Arc;

use aerobook_core::service::BookingService;
use aerobook_store::EventProducer;

#[derive(Clone)]
pub struct AppState {
    pub bookings: Arc<BookingService>,
    pub events: Arc<EventProducer>,
    pub reminder_topic: String,
}

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use aerobook_core::booking::CreateBookingRequest;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/bookings", post(create_booking))
        .route("/api/v1/bookings/publish", post(publish_reminder))
}

async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let booking = state.bookings.create_booking(req).await?;

    Ok(Json(json!({
        "message": "Successfully completed booking",
        "success": true,
        "err": {},
        "data": booking,
    })))
}

/// Publishes a fixed success notice to the reminder topic. Delivery is
/// fire-and-forget: the outcome is logged by the producer, not awaited here.
async fn publish_reminder(State(state): State<AppState>) -> Json<serde_json::Value> {
    let events = state.events.clone();
    let topic = state.reminder_topic.clone();

    tokio::spawn(async move {
        let payload = json!({ "message": "Success" }).to_string();
        let _ = events.publish(&topic, "reminder", &payload).await;
    });

    Json(json!({ "message": "Successfully published the event" }))
}

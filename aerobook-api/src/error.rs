use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use aerobook_core::error::BookingError;

/// Turns workflow errors into the service's wire format. Every failure kind
/// maps to 500; client-caused conditions are not distinguished.
#[derive(Debug)]
pub struct ApiError(pub BookingError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        tracing::error!("Request failed: {}", err);

        let body = Json(json!({
            "message": err.to_string(),
            "success": false,
            "error": err.explanation(),
            "data": {},
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        Self(err)
    }
}

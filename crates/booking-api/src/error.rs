//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use booking::BookingError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// Booking saga error, mapped per the taxonomy below.
    Booking(BookingError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, serde_json::json!({ "error": msg }))
            }
            ApiError::Booking(err) => booking_error_to_response(err),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Maps booking errors to wire responses.
///
/// Structured rejections from the schedule service keep their status and
/// payload so the true cause, including current availability, reaches the
/// caller.
fn booking_error_to_response(err: BookingError) -> (StatusCode, serde_json::Value) {
    match &err {
        BookingError::Validation(msg) => {
            (StatusCode::BAD_REQUEST, serde_json::json!({ "error": msg }))
        }
        BookingError::TripNotFound(_) | BookingError::ReservationNotFound(_) => (
            StatusCode::NOT_FOUND,
            serde_json::json!({ "error": err.to_string() }),
        ),
        BookingError::InsufficientSeats { available } => (
            StatusCode::CONFLICT,
            serde_json::json!({ "error": "insufficient_seats", "available": available }),
        ),
        BookingError::Upstream(_) => (
            StatusCode::BAD_GATEWAY,
            serde_json::json!({ "error": err.to_string() }),
        ),
        BookingError::Store(_) => {
            tracing::error!(error = %err, "reservation storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": err.to_string() }),
            )
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        ApiError::Booking(err)
    }
}

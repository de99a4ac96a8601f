use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use roadhire_core::BookingError;

#[derive(Debug)]
pub enum AppError {
    Booking(BookingError),
    BadRequest(String),
    Internal(anyhow::Error),
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        Self::Booking(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Booking(err) => booking_error_response(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Maps the booking taxonomy onto HTTP. Details that would leak internals
/// (payment transport errors, storage errors) go to the log, not the body.
fn booking_error_response(err: BookingError) -> (StatusCode, String) {
    match err {
        BookingError::Validation { field } => {
            (StatusCode::BAD_REQUEST, format!("Missing field: {}", field))
        }
        BookingError::NotFound(id) => {
            tracing::info!("Booking not found: {}", id);
            (StatusCode::NOT_FOUND, "Booking not found".to_string())
        }
        BookingError::Payment(detail) => {
            tracing::error!("Payment session error: {}", detail);
            (
                StatusCode::BAD_REQUEST,
                "Invalid payment session".to_string(),
            )
        }
        BookingError::IncompletePayment { status } => {
            tracing::info!("Deposit confirmation refused, payment_status={}", status);
            (StatusCode::BAD_REQUEST, "Payment not completed".to_string())
        }
        BookingError::Correlation => (
            StatusCode::BAD_REQUEST,
            "No bookingId in session metadata".to_string(),
        ),
        BookingError::Persistence(detail) => {
            tracing::error!("Storage error: {}", detail);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            )
        }
        BookingError::Notification(detail) => {
            // The flow logs and swallows these; kept so the mapping is total.
            tracing::error!("Notification error surfaced: {}", detail);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            )
        }
    }
}

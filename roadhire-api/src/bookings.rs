use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use serde::Serialize;
use uuid::Uuid;

use roadhire_core::booking::BookingSubmission;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BookingCreated {
    booking_id: Uuid,
    message: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/booking", post(create_booking))
}

async fn create_booking(
    State(state): State<AppState>,
    Json(submission): Json<BookingSubmission>,
) -> Result<Json<BookingCreated>, AppError> {
    let booking = state.flow.submit(submission).await?;

    Ok(Json(BookingCreated {
        booking_id: booking.id,
        message: "Booking saved".to_string(),
    }))
}

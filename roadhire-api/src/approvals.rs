use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/approve", get(approve))
}

/// Opened by the owner from the approval email, so the response is a small
/// HTML page rather than JSON.
async fn approve(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let raw = params
        .get("bookingId")
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing bookingId".to_string()))?;
    let booking_id = Uuid::parse_str(raw)
        .map_err(|_| AppError::BadRequest("Invalid bookingId".to_string()))?;

    let booking = state.flow.approve(booking_id).await?;

    Ok(Html(format!(
        r#"<html>
  <body style="font-family: Arial; padding: 2rem;">
    <h2>Booking Approved</h2>
    <p>Booking ID <strong>{}</strong> has been confirmed.</p>
    <p>The customer has been notified by email.</p>
  </body>
</html>"#,
        booking.id
    )))
}

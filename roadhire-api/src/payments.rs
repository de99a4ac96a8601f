use std::collections::HashMap;

use axum::{
    extract::{Json, Query, State},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionRequest {
    #[serde(default)]
    booking_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionCreated {
    session_id: String,
    url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentConfirmed {
    status: String,
    booking_id: Uuid,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/create-checkout-session", post(create_checkout_session))
        .route("/api/confirm-payment", get(confirm_payment))
}

async fn create_checkout_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<Json<SessionCreated>, AppError> {
    let booking_id = req
        .booking_id
        .ok_or_else(|| AppError::BadRequest("Missing bookingId".to_string()))?;

    let session = state.flow.open_deposit_session(booking_id).await?;

    Ok(Json(SessionCreated {
        session_id: session.id,
        url: session.url,
    }))
}

/// Redirect target after checkout. The session id in the query string is
/// untrusted; the handler only ever acts on what the processor reports
/// back for that id.
async fn confirm_payment(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PaymentConfirmed>, AppError> {
    let session_id = params
        .get("session_id")
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing session_id".to_string()))?;

    let booking = state.flow.confirm_deposit(session_id).await?;

    Ok(Json(PaymentConfirmed {
        status: "ok".to_string(),
        booking_id: booking.id,
    }))
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::booking::Booking;

/// Payment status as reported by the processor for a checkout session.
/// The vocabulary is the processor's own; only `Paid` unlocks a booking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    NoPaymentRequired,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::NoPaymentRequired => "no_payment_required",
        }
    }
}

/// A processor-side handle representing one payment attempt, correlated to
/// a booking via the metadata tag set at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// Hosted payment page the customer is redirected to.
    pub url: Option<String>,
    pub payment_status: PaymentStatus,
    /// Parsed back from session metadata; absent when the session was not
    /// created by this system.
    pub booking_id: Option<Uuid>,
}

/// What the deposit session charges and where the processor sends the
/// customer afterwards.
#[derive(Debug, Clone)]
pub struct DepositCharge {
    pub amount_minor: i64,
    pub currency: String,
    pub success_url: String,
    pub cancel_url: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a checkout session for the booking's deposit, tagged with the
    /// booking id as correlation metadata.
    async fn create_checkout_session(
        &self,
        booking: &Booking,
        charge: &DepositCharge,
    ) -> Result<CheckoutSession, Box<dyn std::error::Error + Send + Sync>>;

    /// Retrieve a session by id to read back its payment status.
    async fn retrieve_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, Box<dyn std::error::Error + Send + Sync>>;
}

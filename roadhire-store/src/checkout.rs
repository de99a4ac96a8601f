use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use roadhire_core::booking::Booking;
use roadhire_core::payment::{CheckoutSession, DepositCharge, PaymentGateway, PaymentStatus};

/// Thin client for the Stripe Checkout API. Only the two calls the booking
/// flow needs: open a session and read one back.
pub struct StripeClient {
    http: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(api_base: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
            secret_key: secret_key.into(),
        }
    }
}

/// Stripe's checkout.session object, reduced to the fields we read.
#[derive(Debug, Deserialize)]
struct SessionPayload {
    id: String,
    #[serde(default)]
    url: Option<String>,
    payment_status: String,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

impl From<SessionPayload> for CheckoutSession {
    fn from(payload: SessionPayload) -> Self {
        // Anything other than "paid" blocks confirmation, so statuses we
        // do not recognise collapse into unpaid.
        let payment_status = match payload.payment_status.as_str() {
            "paid" => PaymentStatus::Paid,
            "no_payment_required" => PaymentStatus::NoPaymentRequired,
            _ => PaymentStatus::Unpaid,
        };
        let booking_id = payload
            .metadata
            .get("bookingId")
            .and_then(|raw| Uuid::parse_str(raw).ok());
        CheckoutSession {
            id: payload.id,
            url: payload.url,
            payment_status,
            booking_id,
        }
    }
}

fn session_form(booking: &Booking, charge: &DepositCharge) -> Vec<(String, String)> {
    vec![
        ("mode".into(), "payment".into()),
        ("payment_method_types[0]".into(), "card".into()),
        ("line_items[0][quantity]".into(), "1".into()),
        (
            "line_items[0][price_data][currency]".into(),
            charge.currency.clone(),
        ),
        (
            "line_items[0][price_data][unit_amount]".into(),
            charge.amount_minor.to_string(),
        ),
        (
            "line_items[0][price_data][product_data][name]".into(),
            format!(
                "Rental deposit - {} ({} to {})",
                booking.vehicle_id, booking.start_date, booking.end_date
            ),
        ),
        ("customer_email".into(), booking.email.clone()),
        ("success_url".into(), charge.success_url.clone()),
        ("cancel_url".into(), charge.cancel_url.clone()),
        ("metadata[bookingId]".into(), booking.id.to_string()),
    ]
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_checkout_session(
        &self,
        booking: &Booking,
        charge: &DepositCharge,
    ) -> Result<CheckoutSession, Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&session_form(booking, charge))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("checkout session create failed ({status}): {body}").into());
        }

        let payload: SessionPayload = response.json().await?;
        Ok(payload.into())
    }

    async fn retrieve_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .http
            .get(format!(
                "{}/v1/checkout/sessions/{}",
                self.api_base, session_id
            ))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("checkout session lookup failed ({status}): {body}").into());
        }

        let payload: SessionPayload = response.json().await?;
        Ok(payload.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roadhire_core::booking::BookingDetails;

    fn booking() -> Booking {
        Booking::new(BookingDetails {
            vehicle_id: "Transit L2".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            pickup_time: "10:00".to_string(),
            dropoff_time: "10:00".to_string(),
            full_name: "A B".to_string(),
            email: "a@b.com".to_string(),
            phone: "123".to_string(),
            age: 30,
            address: "X".to_string(),
            license_number: "L1".to_string(),
            notes: String::new(),
            id_document: None,
        })
    }

    #[test]
    fn parses_a_paid_session_with_booking_metadata() {
        let id = Uuid::new_v4();
        let raw = format!(
            r#"{{
                "id": "cs_test_123",
                "url": null,
                "payment_status": "paid",
                "metadata": {{"bookingId": "{id}"}}
            }}"#
        );

        let payload: SessionPayload = serde_json::from_str(&raw).unwrap();
        let session = CheckoutSession::from(payload);

        assert_eq!(session.id, "cs_test_123");
        assert_eq!(session.payment_status, PaymentStatus::Paid);
        assert_eq!(session.booking_id, Some(id));
    }

    #[test]
    fn maps_the_three_payment_statuses() {
        for (raw, expected) in [
            ("paid", PaymentStatus::Paid),
            ("unpaid", PaymentStatus::Unpaid),
            ("no_payment_required", PaymentStatus::NoPaymentRequired),
            ("something_new", PaymentStatus::Unpaid),
        ] {
            let payload: SessionPayload = serde_json::from_str(&format!(
                r#"{{"id": "cs_1", "payment_status": "{raw}"}}"#
            ))
            .unwrap();
            assert_eq!(CheckoutSession::from(payload).payment_status, expected);
        }
    }

    #[test]
    fn missing_or_garbled_metadata_yields_no_booking_id() {
        let no_metadata: SessionPayload =
            serde_json::from_str(r#"{"id": "cs_1", "payment_status": "paid"}"#).unwrap();
        assert_eq!(CheckoutSession::from(no_metadata).booking_id, None);

        let garbled: SessionPayload = serde_json::from_str(
            r#"{"id": "cs_1", "payment_status": "paid", "metadata": {"bookingId": "not-a-uuid"}}"#,
        )
        .unwrap();
        assert_eq!(CheckoutSession::from(garbled).booking_id, None);
    }

    #[test]
    fn session_form_carries_the_charge_and_the_correlation_tag() {
        let booking = booking();
        let charge = DepositCharge {
            amount_minor: 5000,
            currency: "gbp".to_string(),
            success_url: "https://x/payment-success?session_id={CHECKOUT_SESSION_ID}".to_string(),
            cancel_url: "https://x/payment-cancelled".to_string(),
        };

        let form = session_form(&booking, &charge);
        let get = |key: &str| {
            form.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };

        assert_eq!(get("mode"), "payment");
        assert_eq!(get("line_items[0][price_data][unit_amount]"), "5000");
        assert_eq!(get("line_items[0][price_data][currency]"), "gbp");
        assert!(get("line_items[0][price_data][product_data][name]").contains("Transit L2"));
        assert_eq!(get("metadata[bookingId]"), booking.id.to_string());
        assert!(get("success_url").contains("{CHECKOUT_SESSION_ID}"));
    }
}

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::booking::{Booking, BookingStatus, BookingSubmission};
use crate::mailer::{Email, Mailer};
use crate::notify;
use crate::payment::{CheckoutSession, DepositCharge, PaymentGateway, PaymentStatus};
use crate::repository::BookingRepository;
use crate::{BookingError, BookingResult};

/// Environment-provided settings, injected once at construction instead of
/// read ad hoc from the process environment.
#[derive(Debug, Clone)]
pub struct BookingSettings {
    pub owner_email: String,
    pub from_address: String,
    pub public_base_url: String,
    pub deposit_minor: i64,
    pub deposit_currency: String,
    pub pickup_instructions: String,
}

/// Coordinates the booking lifecycle across the storage, payment and mail
/// collaborators. Each stage is triggered by a separate inbound request;
/// the only ordering is the precondition each stage checks itself.
pub struct BookingFlow {
    repo: Arc<dyn BookingRepository>,
    payments: Arc<dyn PaymentGateway>,
    mailer: Arc<dyn Mailer>,
    settings: BookingSettings,
}

impl BookingFlow {
    pub fn new(
        repo: Arc<dyn BookingRepository>,
        payments: Arc<dyn PaymentGateway>,
        mailer: Arc<dyn Mailer>,
        settings: BookingSettings,
    ) -> Self {
        Self {
            repo,
            payments,
            mailer,
            settings,
        }
    }

    /// Intake: validate the submission, persist a pending booking, tell the
    /// owner. Returns the stored booking.
    pub async fn submit(&self, submission: BookingSubmission) -> BookingResult<Booking> {
        let details = submission.validate()?;
        let booking = Booking::new(details);

        self.repo
            .insert(&booking)
            .await
            .map_err(|e| BookingError::Persistence(e.to_string()))?;

        info!("Booking created: {} ({})", booking.id, booking.vehicle_id);

        self.send(notify::owner_new_booking(
            &self.settings.from_address,
            &self.settings.owner_email,
            &booking,
        ))
        .await;

        Ok(booking)
    }

    /// Open a deposit checkout session for an existing booking. No state
    /// transition happens here; the booking stays pending until the
    /// processor reports the session paid.
    pub async fn open_deposit_session(&self, booking_id: Uuid) -> BookingResult<CheckoutSession> {
        let booking = self
            .repo
            .find(booking_id)
            .await
            .map_err(|e| BookingError::Persistence(e.to_string()))?
            .ok_or_else(|| BookingError::NotFound(booking_id.to_string()))?;

        let charge = DepositCharge {
            amount_minor: self.settings.deposit_minor,
            currency: self.settings.deposit_currency.clone(),
            // The processor substitutes the placeholder with the real id.
            success_url: format!(
                "{}/payment-success?session_id={{CHECKOUT_SESSION_ID}}",
                self.settings.public_base_url
            ),
            cancel_url: format!("{}/payment-cancelled", self.settings.public_base_url),
        };

        let session = self
            .payments
            .create_checkout_session(&booking, &charge)
            .await
            .map_err(|e| BookingError::Payment(e.to_string()))?;

        info!(
            "Deposit session {} opened for booking {} ({} {})",
            session.id, booking.id, charge.amount_minor, charge.currency
        );

        Ok(session)
    }

    /// Confirm a paid deposit session and advance the booking. The
    /// processor is the single source of truth for "paid": nothing the
    /// caller sends can mark a booking paid, only the status read back for
    /// the given session id.
    pub async fn confirm_deposit(&self, session_id: &str) -> BookingResult<Booking> {
        let session = self
            .payments
            .retrieve_checkout_session(session_id)
            .await
            .map_err(|e| BookingError::Payment(e.to_string()))?;

        if session.payment_status != PaymentStatus::Paid {
            return Err(BookingError::IncompletePayment {
                status: session.payment_status.as_str().to_string(),
            });
        }

        let booking_id = session.booking_id.ok_or(BookingError::Correlation)?;

        let booking = self
            .repo
            .set_status(booking_id, BookingStatus::DepositPaid)
            .await
            .map_err(|e| BookingError::Persistence(e.to_string()))?
            .ok_or_else(|| BookingError::NotFound(booking_id.to_string()))?;

        info!("Deposit paid for booking {}", booking.id);

        let approve_link = format!(
            "{}/api/approve?bookingId={}",
            self.settings.public_base_url, booking.id
        );
        self.send(notify::owner_deposit_paid(
            &self.settings.from_address,
            &self.settings.owner_email,
            &booking,
            &approve_link,
        ))
        .await;
        self.send(notify::customer_deposit_received(
            &self.settings.from_address,
            &booking,
        ))
        .await;

        Ok(booking)
    }

    /// Final approval. Deliberately unconditional on the prior state: the
    /// owner's link acts as a manual override, so a second click or an
    /// approval ahead of the deposit both land on `confirmed`.
    pub async fn approve(&self, booking_id: Uuid) -> BookingResult<Booking> {
        let booking = self
            .repo
            .set_status(booking_id, BookingStatus::Confirmed)
            .await
            .map_err(|e| BookingError::Persistence(e.to_string()))?
            .ok_or_else(|| BookingError::NotFound(booking_id.to_string()))?;

        info!("Booking approved: {}", booking.id);

        self.send(notify::customer_booking_confirmed(
            &self.settings.from_address,
            &booking,
            &self.settings.pickup_instructions,
        ))
        .await;

        Ok(booking)
    }

    /// Best-effort delivery: a failed send is logged and never rolls back
    /// the state transition that preceded it.
    async fn send(&self, email: Email) {
        let to = email.to.clone();
        if let Err(e) = self.mailer.send(email).await {
            let err = BookingError::Notification(e.to_string());
            warn!("Mail to {} not delivered: {}", to, err);
        }
    }
}

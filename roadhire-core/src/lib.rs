pub mod booking;
pub mod flow;
pub mod mailer;
pub mod notify;
pub mod payment;
pub mod repository;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Missing field: {field}")]
    Validation { field: String },
    #[error("Booking not found: {0}")]
    NotFound(String),
    #[error("Invalid payment session: {0}")]
    Payment(String),
    #[error("Payment not completed (status: {status})")]
    IncompletePayment { status: String },
    #[error("No bookingId in session metadata")]
    Correlation,
    #[error("Storage error: {0}")]
    Persistence(String),
    #[error("Notification failed: {0}")]
    Notification(String),
}

impl BookingError {
    pub fn validation(field: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;

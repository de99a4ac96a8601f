use async_trait::async_trait;
use uuid::Uuid;

use crate::booking::{Booking, BookingStatus};

/// Repository trait for booking persistence. The record is owned by the
/// external storage service; this system only holds it for the duration of
/// one request.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(
        &self,
        booking: &Booking,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn find(
        &self,
        id: Uuid,
    ) -> Result<Option<Booking>, Box<dyn std::error::Error + Send + Sync>>;

    /// Update-by-id with returning-row semantics: `None` means no such
    /// booking. The `deposit_paid` column is derived from `status`, and a
    /// write that would lower the lifecycle rank leaves the row untouched
    /// (the current row is still returned).
    async fn set_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>, Box<dyn std::error::Error + Send + Sync>>;
}

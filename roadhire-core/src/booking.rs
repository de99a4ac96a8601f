use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{BookingError, BookingResult};

/// Booking status in the deposit lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    DepositPaid,
    Confirmed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::DepositPaid => "deposit_paid",
            BookingStatus::Confirmed => "confirmed",
        }
    }

    /// Position in the forward-only lifecycle. Writes must never lower it.
    pub fn rank(&self) -> i16 {
        match self {
            BookingStatus::Pending => 0,
            BookingStatus::DepositPaid => 1,
            BookingStatus::Confirmed => 2,
        }
    }

    /// The redundant `deposit_paid` flag is derived from the status so the
    /// two columns cannot drift apart.
    pub fn deposit_paid(&self) -> bool {
        !matches!(self, BookingStatus::Pending)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "deposit_paid" => Ok(BookingStatus::DepositPaid),
            "confirmed" => Ok(BookingStatus::Confirmed),
            other => Err(format!("unknown booking status: {other}")),
        }
    }
}

/// The rental record tracked through its lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub vehicle_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub pickup_time: String,
    pub dropoff_time: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub age: i32,
    pub address: String,
    pub license_number: String,
    pub notes: String,
    pub id_document: Option<String>,
    pub status: BookingStatus,
    pub deposit_paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(details: BookingDetails) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            vehicle_id: details.vehicle_id,
            start_date: details.start_date,
            end_date: details.end_date,
            pickup_time: details.pickup_time,
            dropoff_time: details.dropoff_time,
            full_name: details.full_name,
            email: details.email,
            phone: details.phone,
            age: details.age,
            address: details.address,
            license_number: details.license_number,
            notes: details.notes,
            id_document: details.id_document,
            status: BookingStatus::Pending,
            deposit_paid: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Advance to `status`. Regressions are ignored: once a booking is
    /// confirmed, a late deposit callback must not pull it backwards.
    /// Returns whether the write was applied.
    pub fn transition(&mut self, status: BookingStatus) -> bool {
        if status.rank() < self.status.rank() {
            return false;
        }
        self.status = status;
        self.deposit_paid = status.deposit_paid();
        self.updated_at = Utc::now();
        true
    }
}

/// Validated intake payload, ready to become a pending booking
#[derive(Debug, Clone)]
pub struct BookingDetails {
    pub vehicle_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub pickup_time: String,
    pub dropoff_time: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub age: i32,
    pub address: String,
    pub license_number: String,
    pub notes: String,
    pub id_document: Option<String>,
}

/// Raw intake submission as posted by the frontend. Every field is optional
/// at the wire level so that `validate` can name the first missing one
/// instead of failing in deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSubmission {
    #[serde(default)]
    pub car: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub pickup_time: Option<String>,
    #[serde(default)]
    pub dropoff_time: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub age: Option<AgeField>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub id_file_path: Option<String>,
}

/// Age arrives as a JSON number or a numeric string depending on the form
/// widget; both coerce to the same integer.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AgeField {
    Number(i64),
    Text(String),
}

impl AgeField {
    fn coerce(&self) -> Option<i32> {
        let n = match self {
            AgeField::Number(n) => *n,
            AgeField::Text(s) => s.trim().parse::<i64>().ok()?,
        };
        if n <= 0 {
            return None;
        }
        i32::try_from(n).ok()
    }
}

impl BookingSubmission {
    /// Presence check for all 11 required fields, in the order the frontend
    /// shows them. Errors carry the wire-level field name.
    pub fn validate(self) -> BookingResult<BookingDetails> {
        let vehicle_id = required("car", self.car)?;
        let start_date = required_date("startDate", self.start_date)?;
        let end_date = required_date("endDate", self.end_date)?;
        let pickup_time = required("pickupTime", self.pickup_time)?;
        let dropoff_time = required("dropoffTime", self.dropoff_time)?;
        let full_name = required("fullName", self.full_name)?;
        let email = required("email", self.email)?;
        let phone = required("phone", self.phone)?;
        let age = self
            .age
            .as_ref()
            .and_then(AgeField::coerce)
            .ok_or_else(|| BookingError::validation("age"))?;
        let address = required("address", self.address)?;
        let license_number = required("licenseNumber", self.license_number)?;

        Ok(BookingDetails {
            vehicle_id,
            start_date,
            end_date,
            pickup_time,
            dropoff_time,
            full_name,
            email,
            phone,
            age,
            address,
            license_number,
            notes: self.notes.unwrap_or_default(),
            id_document: self.id_file_path.filter(|p| !p.trim().is_empty()),
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> BookingResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(BookingError::validation(field)),
    }
}

fn required_date(field: &'static str, value: Option<String>) -> BookingResult<NaiveDate> {
    let raw = required(field, value)?;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| BookingError::validation(field))
}

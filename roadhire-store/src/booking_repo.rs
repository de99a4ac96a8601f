use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use roadhire_core::booking::{Booking, BookingStatus};
use roadhire_core::repository::BookingRepository;

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    vehicle_id: String,
    start_date: chrono::NaiveDate,
    end_date: chrono::NaiveDate,
    pickup_time: String,
    dropoff_time: String,
    full_name: String,
    email: String,
    phone: String,
    age: i32,
    address: String,
    license_number: String,
    notes: String,
    id_document: Option<String>,
    status: String,
    deposit_paid: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = Box<dyn std::error::Error + Send + Sync>;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status: BookingStatus = row.status.parse()?;
        Ok(Booking {
            id: row.id,
            vehicle_id: row.vehicle_id,
            start_date: row.start_date,
            end_date: row.end_date,
            pickup_time: row.pickup_time,
            dropoff_time: row.dropoff_time,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            age: row.age,
            address: row.address,
            license_number: row.license_number,
            notes: row.notes,
            id_document: row.id_document,
            status,
            deposit_paid: row.deposit_paid,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn insert(
        &self,
        booking: &Booking,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO bookings (id, vehicle_id, start_date, end_date, pickup_time, dropoff_time, full_name, email, phone, age, address, license_number, notes, id_document, status, deposit_paid, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(booking.id)
        .bind(&booking.vehicle_id)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(&booking.pickup_time)
        .bind(&booking.dropoff_time)
        .bind(&booking.full_name)
        .bind(&booking.email)
        .bind(&booking.phone)
        .bind(booking.age)
        .bind(&booking.address)
        .bind(&booking.license_number)
        .bind(&booking.notes)
        .bind(&booking.id_document)
        .bind(booking.status.as_str())
        .bind(booking.deposit_paid)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(
        &self,
        id: Uuid,
    ) -> Result<Option<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, BookingRow>(
            "SELECT id, vehicle_id, start_date, end_date, pickup_time, dropoff_time, full_name, email, phone, age, address, license_number, notes, id_document, status, deposit_paid, created_at, updated_at FROM bookings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Booking::try_from).transpose()
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        // The rank guard makes the write forward-only. A late deposit
        // callback against a confirmed booking matches zero rows and the
        // fallback read returns the row as it stands.
        let updated = sqlx::query_as::<_, BookingRow>(
            r#"
            UPDATE bookings
            SET status = $2, deposit_paid = $3, updated_at = NOW()
            WHERE id = $1
              AND CASE status
                    WHEN 'pending' THEN 0
                    WHEN 'deposit_paid' THEN 1
                    ELSE 2
                  END <= $4
            RETURNING id, vehicle_id, start_date, end_date, pickup_time, dropoff_time, full_name, email, phone, age, address, license_number, notes, id_document, status, deposit_paid, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(status.deposit_paid())
        .bind(status.rank() as i32)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(row) => Ok(Some(row.try_into()?)),
            None => self.find(id).await,
        }
    }
}

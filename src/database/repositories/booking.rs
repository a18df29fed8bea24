use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{Booking, BookingStatus};

const BOOKING_COLUMNS: &str = "id, service_id, user_id, scheduled_date, scheduled_time, location, \
                               status, created_at, updated_at";

/// Read side of the booking table plus status transitions. Slot-changing
/// writes (reserve, release) live in `SlotRepository`; rows are never
/// physically deleted, so cancelled bookings stay visible for history.
#[derive(Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS} FROM bookings
            WHERE user_id = ?
            ORDER BY scheduled_date, scheduled_time
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn list_by_service(&self, service_id: Uuid) -> Result<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS} FROM bookings
            WHERE service_id = ?
            ORDER BY scheduled_date, scheduled_time
            "#
        ))
        .bind(service_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT b.id, b.service_id, b.user_id, b.scheduled_date, b.scheduled_time,
                   b.location, b.status, b.created_at, b.updated_at
            FROM bookings b
            INNER JOIN services s ON s.id = b.service_id
            WHERE s.owner_id = ?
            ORDER BY b.scheduled_date, b.scheduled_time
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Set a new status without re-checking the transition table; the
    /// booking service is the gatekeeper for which transitions are legal.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>> {
        let now = Utc::now();
        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings
            SET status = ?, updated_at = ?
            WHERE id = ?
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(status)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }
}

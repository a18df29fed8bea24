use anyhow::Result;
use chrono::{NaiveDate, NaiveTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{Booking, BookingStatus};

const BOOKING_COLUMNS: &str = "id, service_id, user_id, scheduled_date, scheduled_time, location, \
                               status, created_at, updated_at";

/// The slot availability index. A slot is a `(service_id, scheduled_date,
/// scheduled_time)` tuple; the partial unique index on live booking rows is
/// the single arbiter of who holds it, so reserving is one guarded INSERT
/// and never a check-then-insert.
#[derive(Clone)]
pub struct SlotRepository {
    pool: SqlitePool,
}

/// Outcome of a reservation attempt. Losing the race for a tuple is an
/// expected result, not a database error.
#[derive(Debug)]
pub enum ReserveOutcome {
    Reserved(Booking),
    SlotTaken,
}

#[derive(Debug, Clone)]
pub struct SlotReservation {
    pub service_id: Uuid,
    pub user_id: Uuid,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub location: String,
}

/// What releasing a slot freed, reported back for stats invalidation and
/// audit logging.
#[derive(Debug, Clone)]
pub struct ReleasedSlot {
    pub booking_id: Uuid,
    pub service_id: Uuid,
    pub owner_id: Uuid,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub released_assignments: u64,
}

impl SlotRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Every time already reserved (status != cancelled) for the service on
    /// the given date, sorted. Callers render the complement as free.
    pub async fn booked_times(
        &self,
        service_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<NaiveTime>> {
        let times = sqlx::query_scalar::<_, NaiveTime>(
            r#"
            SELECT scheduled_time FROM bookings
            WHERE service_id = ? AND scheduled_date = ? AND status != 'cancelled'
            ORDER BY scheduled_time
            "#,
        )
        .bind(service_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(times)
    }

    /// Atomically convert a free slot into a pending booking. Exactly one of
    /// any number of concurrent attempts for the same tuple gets the row;
    /// the rest see the unique index fire and come back as `SlotTaken`.
    pub async fn reserve(&self, input: SlotReservation) -> Result<ReserveOutcome> {
        let now = Utc::now();
        let result = sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings (id, service_id, user_id, scheduled_date, scheduled_time, location, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {BOOKING_COLUMNS}
            "#,
        ))
        .bind(Uuid::new_v4())
        .bind(input.service_id)
        .bind(input.user_id)
        .bind(input.scheduled_date)
        .bind(input.scheduled_time)
        .bind(&input.location)
        .bind(BookingStatus::Pending)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(booking) => Ok(ReserveOutcome::Reserved(booking)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Ok(ReserveOutcome::SlotTaken)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Free the slot held by a booking: flip its status to cancelled and, in
    /// the same transaction, deactivate its staff assignments (a cancelled
    /// booking cannot retain staff). Returns `None` when the booking is
    /// missing or already cancelled, leaving the caller to tell those apart.
    pub async fn release(&self, booking_id: Uuid) -> Result<Option<ReleasedSlot>> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let freed = sqlx::query_as::<_, (Uuid, NaiveDate, NaiveTime)>(
            r#"
            UPDATE bookings
            SET status = 'cancelled', updated_at = ?
            WHERE id = ? AND status != 'cancelled'
            RETURNING service_id, scheduled_date, scheduled_time
            "#,
        )
        .bind(now)
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((service_id, scheduled_date, scheduled_time)) = freed else {
            tx.rollback().await?;
            return Ok(None);
        };

        let released = sqlx::query(
            r#"
            UPDATE staff_assignments
            SET active = 0, released_at = ?
            WHERE booking_id = ? AND active = 1
            "#,
        )
        .bind(now)
        .bind(booking_id)
        .execute(&mut *tx)
        .await?;

        let owner_id = sqlx::query_scalar::<_, Uuid>("SELECT owner_id FROM services WHERE id = ?")
            .bind(service_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(ReleasedSlot {
            booking_id,
            service_id,
            owner_id,
            scheduled_date,
            scheduled_time,
            released_assignments: released.rows_affected(),
        }))
    }
}

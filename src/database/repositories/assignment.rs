use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{StaffAssignment, StaffMember};

const ASSIGNMENT_COLUMNS: &str = "id, booking_id, staff_id, active, assigned_at, released_at";

/// The booking <-> staff relation. One row per `(booking_id, staff_id)` pair
/// ever; `active` toggles on assign/unassign so the pair's history survives
/// and repeat-unassign stays distinguishable from never-assigned.
#[derive(Clone)]
pub struct AssignmentRepository {
    pool: SqlitePool,
}

/// Outcome of an assign attempt. An already-active pair is surfaced as its
/// own case rather than as a database error.
#[derive(Debug)]
pub enum AssignOutcome {
    Assigned(StaffAssignment),
    PairActive,
}

impl AssignmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the pair, or re-activate it if a released row already exists.
    /// The unique index on `(booking_id, staff_id)` is the final arbiter
    /// under concurrent assigns: the insert either wins, or the violation
    /// routes to the conditional re-activate, which only fires on an
    /// inactive row. An active pair falls through to `PairActive`.
    pub async fn assign(&self, booking_id: Uuid, staff_id: Uuid) -> Result<AssignOutcome> {
        let now = Utc::now();
        let inserted = sqlx::query_as::<_, StaffAssignment>(&format!(
            r#"
            INSERT INTO staff_assignments (booking_id, staff_id, active, assigned_at, released_at)
            VALUES (?, ?, 1, ?, NULL)
            RETURNING {ASSIGNMENT_COLUMNS}
            "#
        ))
        .bind(booking_id)
        .bind(staff_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(assignment) => return Ok(AssignOutcome::Assigned(assignment)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {}
            Err(err) => return Err(err.into()),
        }

        // The pair exists. A fresh assigned_at puts a re-activated pair at
        // the end of the listing, as if newly assigned.
        let reactivated = sqlx::query_as::<_, StaffAssignment>(&format!(
            r#"
            UPDATE staff_assignments
            SET active = 1, assigned_at = ?, released_at = NULL
            WHERE booking_id = ? AND staff_id = ? AND active = 0
            RETURNING {ASSIGNMENT_COLUMNS}
            "#
        ))
        .bind(now)
        .bind(booking_id)
        .bind(staff_id)
        .fetch_optional(&self.pool)
        .await?;

        match reactivated {
            Some(assignment) => Ok(AssignOutcome::Assigned(assignment)),
            None => Ok(AssignOutcome::PairActive),
        }
    }

    /// Deactivate an active pair. Returns the number of rows touched; zero
    /// means the pair was not active (released earlier, or never existed).
    pub async fn release(&self, booking_id: Uuid, staff_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE staff_assignments
            SET active = 0, released_at = ?
            WHERE booking_id = ? AND staff_id = ? AND active = 1
            "#,
        )
        .bind(Utc::now())
        .bind(booking_id)
        .bind(staff_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Whether any row for the pair exists, active or not.
    pub async fn pair_exists(&self, booking_id: Uuid, staff_id: Uuid) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM staff_assignments WHERE booking_id = ? AND staff_id = ?",
        )
        .bind(booking_id)
        .bind(staff_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Active assignments in assignment order. The id tiebreak keeps the
    /// listing stable when two assigns land on the same timestamp; nothing
    /// here ever re-sorts by staff attributes.
    pub async fn list_active_by_booking(&self, booking_id: Uuid) -> Result<Vec<StaffAssignment>> {
        let assignments = sqlx::query_as::<_, StaffAssignment>(&format!(
            r#"
            SELECT {ASSIGNMENT_COLUMNS} FROM staff_assignments
            WHERE booking_id = ? AND active = 1
            ORDER BY assigned_at, id
            "#
        ))
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(assignments)
    }

    /// The owner's staff minus those already actively assigned to the target
    /// booking. A snapshot only; the unique index re-checks at assign time.
    pub async fn assignable_staff(
        &self,
        owner_id: Uuid,
        booking_id: Uuid,
    ) -> Result<Vec<StaffMember>> {
        let staff = sqlx::query_as::<_, StaffMember>(
            r#"
            SELECT st.id, st.owner_id, st.name, st.email, st.created_at
            FROM staff st
            WHERE st.owner_id = ?
              AND st.id NOT IN (
                  SELECT staff_id FROM staff_assignments
                  WHERE booking_id = ? AND active = 1
              )
            ORDER BY st.name
            "#,
        )
        .bind(owner_id)
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(staff)
    }
}

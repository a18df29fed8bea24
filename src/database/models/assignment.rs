use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One staff member attached to one booking. Rows are deactivated rather
/// than deleted so the pair's history survives unassignment.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StaffAssignment {
    pub id: i64,
    pub booking_id: Uuid,
    pub staff_id: Uuid,
    pub active: bool,
    pub assigned_at: DateTime<Utc>,
    pub released_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentInput {
    pub booking_id: Uuid,
    pub staff_id: Uuid,
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Derived aggregates, recomputed from live booking rows on demand. There is
// intentionally no table behind these.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStats {
    pub service_id: Uuid,
    pub total_booking_count: i64,
    pub unique_users_count: i64,
    pub total_price_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerStats {
    pub owner_id: Uuid,
    pub service_count: i64,
    pub total_booking_count: i64,
    pub unique_users_count: i64,
    pub total_price_cents: i64,
}

use anyhow::Result;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{OwnerStats, ServiceStats};

/// Derived aggregates over live booking rows. Nothing here is stored; every
/// number is recomputed from the bookings table joined to the live service
/// price, so the counters cannot drift from the rows they describe.
#[derive(Clone)]
pub struct StatsRepository {
    pool: SqlitePool,
}

impl StatsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn stats_for_service(&self, service_id: Uuid) -> Result<ServiceStats> {
        let (total_booking_count, unique_users_count, total_price_cents) =
            sqlx::query_as::<_, (i64, i64, i64)>(
                r#"
                SELECT COUNT(b.id),
                       COUNT(DISTINCT b.user_id),
                       COALESCE(SUM(s.base_price_cents), 0)
                FROM bookings b
                INNER JOIN services s ON s.id = b.service_id
                WHERE b.service_id = ? AND b.status != 'cancelled'
                "#,
            )
            .bind(service_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(ServiceStats {
            service_id,
            total_booking_count,
            unique_users_count,
            total_price_cents,
        })
    }

    pub async fn stats_for_owner(&self, owner_id: Uuid) -> Result<OwnerStats> {
        let service_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM services WHERE owner_id = ?")
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await?;

        let (total_booking_count, unique_users_count, total_price_cents) =
            sqlx::query_as::<_, (i64, i64, i64)>(
                r#"
                SELECT COUNT(b.id),
                       COUNT(DISTINCT b.user_id),
                       COALESCE(SUM(s.base_price_cents), 0)
                FROM bookings b
                INNER JOIN services s ON s.id = b.service_id
                WHERE s.owner_id = ? AND b.status != 'cancelled'
                "#,
            )
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(OwnerStats {
            owner_id,
            service_count,
            total_booking_count,
            unique_users_count,
            total_price_cents,
        })
    }
}

use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{Service, ServiceInput};

const SERVICE_COLUMNS: &str = "id, owner_id, name, base_price_cents, created_at, updated_at";

/// The service catalog contract surface. The booking core reads
/// `base_price_cents` and `owner_id` from here at use time and never caches
/// them on its own.
#[derive(Clone)]
pub struct ServiceRepository {
    pool: SqlitePool,
}

impl ServiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: ServiceInput) -> Result<Service> {
        let now = Utc::now();
        let service = sqlx::query_as::<_, Service>(&format!(
            r#"
            INSERT INTO services (id, owner_id, name, base_price_cents, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {SERVICE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(input.owner_id)
        .bind(&input.name)
        .bind(input.base_price_cents)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Service>> {
        let service = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Service>> {
        let services = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE owner_id = ? ORDER BY name"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }
}

use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{Activity, CreateActivityInput};

#[derive(Clone)]
pub struct ActivityRepository {
    pool: SqlitePool,
}

impl ActivityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn log_activity(&self, input: CreateActivityInput) -> Result<Activity> {
        let metadata_json = input
            .metadata
            .map(|m| serde_json::to_string(&m).unwrap_or_default());

        let activity = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities (entity_type, entity_id, action, description, metadata, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, entity_type, entity_id, action, description, metadata, created_at
            "#,
        )
        .bind(&input.entity_type)
        .bind(input.entity_id)
        .bind(&input.action)
        .bind(&input.description)
        .bind(metadata_json)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(activity)
    }

    pub async fn list_for_entity(
        &self,
        entity_type: &str,
        entity_id: Uuid,
    ) -> Result<Vec<Activity>> {
        let activities = sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, entity_type, entity_id, action, description, metadata, created_at
            FROM activities
            WHERE entity_type = ? AND entity_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(entity_type)
        .bind(entity_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(activities)
    }
}

use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{StaffInput, StaffMember, UserAccount, UserInput};

// User and staff directories. The booking core only ever asks "does this id
// exist" and, for staff, "who does it belong to"; everything richer about a
// person is out of scope here.

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: UserInput) -> Result<UserAccount> {
        let user = sqlx::query_as::<_, UserAccount>(
            r#"
            INSERT INTO users (id, name, email, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(&input.email)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }
}

#[derive(Clone)]
pub struct StaffRepository {
    pool: SqlitePool,
}

impl StaffRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: StaffInput) -> Result<StaffMember> {
        let staff = sqlx::query_as::<_, StaffMember>(
            r#"
            INSERT INTO staff (id, owner_id, name, email, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, owner_id, name, email, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.owner_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(staff)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<StaffMember>> {
        let staff = sqlx::query_as::<_, StaffMember>(
            "SELECT id, owner_id, name, email, created_at FROM staff WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(staff)
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<StaffMember>> {
        let staff = sqlx::query_as::<_, StaffMember>(
            "SELECT id, owner_id, name, email, created_at FROM staff WHERE owner_id = ? ORDER BY name",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(staff)
    }
}

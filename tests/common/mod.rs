#![allow(dead_code)]

use actix_web::dev::ServiceResponse;
use actix_web::{test, web};
use anyhow::Result;
use fake::Fake;
use fake::faker::name::en::Name;
use sqlx::SqlitePool;
use tempfile::TempDir;
use uuid::Uuid;

use bookline::database::init_database;
use bookline::database::models::*;
use bookline::{AppState, Config};

/// A well-formed (base64) payment token; the static gateway accepts it in
/// `approve` mode.
pub const PAYMENT_TOKEN: &str = "dG9rLXZpc2EtNDI0Mg==";

// Test database wrapper: a real file-backed SQLite in a temp dir, so WAL and
// the unique index behave exactly as in production.
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let database_url = format!("sqlite:{}/test.db", temp_dir.path().display());
        let pool = init_database(&database_url).await?;

        Ok(TestDb {
            pool,
            _temp_dir: temp_dir,
        })
    }
}

pub fn test_config(payment_mode: &str) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        client_base_url: "http://localhost:3000".to_string(),
        payment_mode: payment_mode.to_string(),
        op_timeout_ms: 5000,
        stats_cache_ttl_secs: 60,
    }
}

// Test application context: a fresh database plus the fully wired AppState.
pub struct TestCtx {
    pub db: TestDb,
    pub state: web::Data<AppState>,
    pub config: Config,
}

impl TestCtx {
    pub async fn new() -> Result<Self> {
        Self::with_payment_mode("approve").await
    }

    pub async fn with_payment_mode(mode: &str) -> Result<Self> {
        let db = TestDb::new().await?;
        let config = test_config(mode);
        let state = web::Data::new(AppState::new(db.pool.clone(), &config));

        Ok(TestCtx { db, state, config })
    }
}

/// Build the actix test service with the production route table.
macro_rules! build_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($ctx.state.clone())
                .configure(bookline::routes::configure),
        )
        .await
    };
}
pub(crate) use build_app;

// Mock data generators
pub struct MockData;

impl MockData {
    pub fn service(owner_id: Uuid) -> ServiceInput {
        ServiceInput {
            owner_id,
            name: format!("{} Studio", Name().fake::<String>()),
            base_price_cents: 10_000,
        }
    }

    // Emails carry a uuid so the UNIQUE constraint never trips across seeds.
    pub fn user() -> UserInput {
        UserInput {
            name: Name().fake(),
            email: format!("user-{}@example.com", Uuid::new_v4().simple()),
        }
    }

    pub fn staff(owner_id: Uuid) -> StaffInput {
        StaffInput {
            owner_id,
            name: Name().fake(),
            email: format!("staff-{}@example.com", Uuid::new_v4().simple()),
        }
    }

    pub fn booking_input(service_id: Uuid, user_id: Uuid, date: &str, time: &str) -> BookingInput {
        BookingInput {
            service_id,
            user_id,
            scheduled_date: date.to_string(),
            scheduled_time: time.to_string(),
            location: "Main studio".to_string(),
            payment: PaymentDetails {
                token: PAYMENT_TOKEN.to_string(),
            },
        }
    }

    pub fn booking_json(
        service_id: Uuid,
        user_id: Uuid,
        date: &str,
        time: &str,
    ) -> serde_json::Value {
        serde_json::json!({
            "service_id": service_id,
            "user_id": user_id,
            "scheduled_date": date,
            "scheduled_time": time,
            "location": "Main studio",
            "payment": { "token": PAYMENT_TOKEN },
        })
    }
}

// Seed helpers going straight through the repositories
pub async fn seed_service(ctx: &TestCtx, owner_id: Uuid) -> Service {
    ctx.state
        .catalog
        .create(MockData::service(owner_id))
        .await
        .expect("Failed to seed service")
}

pub async fn seed_user(ctx: &TestCtx) -> UserAccount {
    ctx.state
        .users
        .create(MockData::user())
        .await
        .expect("Failed to seed user")
}

pub async fn seed_staff(ctx: &TestCtx, owner_id: Uuid) -> StaffMember {
    ctx.state
        .staff
        .create(MockData::staff(owner_id))
        .await
        .expect("Failed to seed staff")
}

pub async fn seed_booking(
    ctx: &TestCtx,
    service_id: Uuid,
    user_id: Uuid,
    date: &str,
    time: &str,
) -> Booking {
    ctx.state
        .bookings
        .create(MockData::booking_input(service_id, user_id, date, time))
        .await
        .expect("Failed to seed booking")
}

/// Read a response body as JSON, panicking with the raw body on parse
/// failure so assertion output stays useful.
pub async fn read_json(resp: ServiceResponse) -> serde_json::Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body)
        .unwrap_or_else(|_| panic!("Non-JSON body: {}", String::from_utf8_lossy(&body)))
}

pub async fn assert_record_count(pool: &SqlitePool, table: &str, expected_count: i64) {
    let query = format!("SELECT COUNT(*) as count FROM {}", table);
    let result = sqlx::query_scalar::<_, i64>(&query)
        .fetch_one(pool)
        .await
        .expect("Failed to count records");

    assert_eq!(
        result, expected_count,
        "Expected {} records in {} table, but found {}",
        expected_count, table, result
    );
}

pub fn setup_test_env() {
    let _ = env_logger::builder().is_test(true).try_init();
}

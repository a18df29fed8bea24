use std::sync::Arc;

use sqlx::SqlitePool;

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::AppError;

use database::repositories::{
    ActivityRepository, AssignmentRepository, BookingRepository, ServiceRepository,
    SlotRepository, StaffRepository, StatsRepository, UserRepository,
};
use services::{
    ActivityLogger, AssignmentService, BookingService, PaymentGateway, StaticGateway, StatsService,
};

/// Everything the handlers need, wired once at startup (and once per test).
pub struct AppState {
    pub bookings: BookingService,
    pub assignments: AssignmentService,
    pub stats: StatsService,
    pub slots: SlotRepository,
    pub catalog: ServiceRepository,
    pub users: UserRepository,
    pub staff: StaffRepository,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        let gateway: Arc<dyn PaymentGateway> =
            Arc::new(StaticGateway::from_config(&config.payment_mode));
        Self::with_gateway(pool, config, gateway)
    }

    /// Same wiring with the payment gateway injected, for tests and for any
    /// deployment that swaps in a real processor.
    pub fn with_gateway(
        pool: SqlitePool,
        config: &Config,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        let slots = SlotRepository::new(pool.clone());
        let booking_repository = BookingRepository::new(pool.clone());
        let assignment_repository = AssignmentRepository::new(pool.clone());
        let catalog = ServiceRepository::new(pool.clone());
        let users = UserRepository::new(pool.clone());
        let staff = StaffRepository::new(pool.clone());
        let activity_logger = ActivityLogger::new(ActivityRepository::new(pool.clone()));
        let stats = StatsService::new(StatsRepository::new(pool), config.stats_cache_ttl_secs);

        let bookings = BookingService::new(
            slots.clone(),
            booking_repository.clone(),
            catalog.clone(),
            users.clone(),
            gateway,
            stats.clone(),
            activity_logger.clone(),
            config.op_timeout_ms,
        );
        let assignments = AssignmentService::new(
            assignment_repository,
            booking_repository,
            staff.clone(),
            catalog.clone(),
            stats.clone(),
            activity_logger,
        );

        Self {
            bookings,
            assignments,
            stats,
            slots,
            catalog,
            users,
            staff,
        }
    }
}

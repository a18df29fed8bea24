pub mod activity_logger;
pub mod assignment;
pub mod booking;
pub mod payments;
pub mod stats;

pub use activity_logger::ActivityLogger;
pub use assignment::{AssignmentService, UnassignOutcome};
pub use booking::BookingService;
pub use payments::{PaymentGateway, PaymentMode, StaticGateway};
pub use stats::StatsService;

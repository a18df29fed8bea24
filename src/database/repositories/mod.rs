pub mod activity;
pub mod assignment;
pub mod booking;
pub mod catalog;
pub mod directory;
pub mod slots;
pub mod stats;

// Re-export all repositories for easy importing
pub use activity::ActivityRepository;
pub use assignment::{AssignOutcome, AssignmentRepository};
pub use booking::BookingRepository;
pub use catalog::ServiceRepository;
pub use directory::{StaffRepository, UserRepository};
pub use slots::{ReleasedSlot, ReserveOutcome, SlotRepository, SlotReservation};
pub use stats::StatsRepository;

pub mod assignments;
pub mod availability;
pub mod bookings;
pub mod catalog;
pub mod directory;
pub mod shared;
pub mod stats;

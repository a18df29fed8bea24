pub mod activity;
pub mod assignment;
pub mod booking;
pub mod catalog;
pub mod directory;
pub mod stats;

// Re-export all models for easy importing
pub use activity::*;
pub use assignment::*;
pub use booking::*;
pub use catalog::*;
pub use directory::*;
pub use stats::*;

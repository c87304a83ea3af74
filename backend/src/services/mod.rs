//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories, the live tracker registry and metrics.

pub mod hydration;
pub mod profile;
pub mod reminders;
pub mod sources;
pub mod user;

pub use hydration::HydrationService;
pub use profile::ProfileService;
pub use reminders::ReminderService;
pub use sources::SourceService;
pub use user::UserService;

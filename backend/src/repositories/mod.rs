//! Database repositories
//!
//! Data access layer. Repositories return `anyhow::Result`; services map
//! failures to `ApiError`.

pub mod intake;
pub mod profile;
pub mod sources;
pub mod user;

pub use intake::{DailyTotal, IntakeLogRecord, IntakeRepository, ProgressRecord, ProgressRepository};
pub use profile::{ProfileRecord, ProfileRepository};
pub use sources::{NewWaterSource, WaterSourceRecord, WaterSourceRepository};
pub use user::{NewUser, UserRecord, UserRepository};

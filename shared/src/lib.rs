//! AquaTrack Shared Library
//!
//! Hydration domain core (goal calculation, intake tracking, validation)
//! and the API types shared by the backend and WASM modules.

pub mod beverages;
pub mod errors;
pub mod goal;
pub mod profile;
pub mod reminders;
pub mod sources;
pub mod tracker;
pub mod types;
pub mod validation;
pub mod weekly;

// Re-export commonly used items
pub use errors::*;
pub use goal::{compute_daily_goal, ActivityLabel, ActivityLevel, DailyGoalMl, GoalCalculator, GoalInputs};
pub use profile::{Gender, ProfileField, ProfileValue};
pub use tracker::{BeverageKind, IntakeEvent, IntakeTracker, ProgressState, RolloverPolicy};

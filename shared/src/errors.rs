//! Error types for the hydration core

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the goal calculator, the intake tracker and the
/// validation helpers.
///
/// Every variant is recoverable: the caller rejects the originating user
/// action and asks again.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydrationError {
    /// Malformed weight, activity level or other profile scalar
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Non-positive or otherwise unusable intake quantity
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Intake dated before the tracker's current day boundary
    #[error("Intake dated {event_day} precedes the current day {current_day}")]
    StaleEvent {
        event_day: NaiveDate,
        current_day: NaiveDate,
    },
}

impl HydrationError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_quantity(message: impl Into<String>) -> Self {
        Self::InvalidQuantity(message.into())
    }
}

/// Result alias for core operations
pub type HydrationResult<T> = Result<T, HydrationError>;

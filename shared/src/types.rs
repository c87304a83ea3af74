//! API request and response types

use crate::sources::NearbySource;
use crate::tracker::ProgressState;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

// ============================================================================
// Accounts
// ============================================================================

/// Authentication tokens response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Token refresh request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Account summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Profile
// ============================================================================

/// Full profile with the goal derived from it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub email: String,
    pub username: String,
    pub phone_number: Option<String>,
    pub age: Option<i32>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<String>,
    pub gender: Option<String>,
    /// HH:MM
    pub wake_up_time: Option<String>,
    /// HH:MM
    pub bedtime: Option<String>,
    pub water_consumption_ml: Option<i32>,
    pub profile_picture_url: Option<String>,
    /// Present once weight is known
    pub daily_goal_ml: Option<u32>,
    pub updated_at: DateTime<Utc>,
}

/// Keyed profile update: `PUT /profile/:field` with `{ "value": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileFieldRequest {
    pub value: serde_json::Value,
}

/// Result of a keyed profile update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileFieldResponse {
    pub field: String,
    pub value: serde_json::Value,
    /// Recomputed goal when the field feeds the goal calculation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_goal_ml: Option<u32>,
}

// ============================================================================
// Hydration
// ============================================================================

/// Record intake request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordIntakeRequest {
    pub quantity_ml: i32,
    /// Beverage label, defaults to the selected menu entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beverage: Option<String>,
    /// When the drink was consumed (defaults to now)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_at: Option<DateTime<Utc>>,
}

/// Stored intake entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeLogResponse {
    pub id: String,
    pub quantity_ml: u32,
    pub beverage: String,
    pub consumed_at: DateTime<Utc>,
}

/// Record intake response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordIntakeResponse {
    pub entry: IntakeLogResponse,
    pub progress: ProgressState,
}

/// Weekly view query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklyQuery {
    /// Any day in the requested week (defaults to today)
    #[serde(default)]
    pub week_of: Option<NaiveDate>,
}

/// Beverage menu with quick-add quantities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeverageMenuResponse {
    pub options: Vec<String>,
    pub selected: String,
    pub quick_quantities_ml: Vec<u32>,
}

/// Add a beverage to the menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddBeverageRequest {
    pub label: String,
    /// Select the new beverage after adding it
    #[serde(default)]
    pub select: bool,
}

/// Choose the beverage used when an intake names none
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectBeverageRequest {
    pub label: String,
}

// ============================================================================
// Reminders
// ============================================================================

/// Reminder query; the interval defaults to the server setting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReminderQuery {
    #[serde(default)]
    pub interval_minutes: Option<u32>,
}

/// Reminder instants for one day (local time)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderScheduleResponse {
    pub date: NaiveDate,
    pub interval_minutes: u32,
    pub reminders: Vec<NaiveDateTime>,
}

/// Next reminder, absent once the goal is met or the day is over
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextReminderResponse {
    pub next_at: Option<NaiveDateTime>,
    pub progress_percent: f64,
}

// ============================================================================
// Water sources
// ============================================================================

/// Register a water source request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWaterSourceRequest {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Nearby search query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbySourcesQuery {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub radius_km: Option<f64>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Nearby search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbySourcesResponse {
    pub sources: Vec<NearbySource>,
}

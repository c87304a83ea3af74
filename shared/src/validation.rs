//! Input validation functions
//!
//! Every scalar that comes from outside the core (request bodies, stored
//! profile fields that were written as strings) passes through one of these
//! before it reaches arithmetic. Uses both custom validators and the
//! `validator` crate.

use crate::errors::{HydrationError, HydrationResult};
use chrono::NaiveTime;
use std::sync::OnceLock;
use validator::{ValidateEmail, ValidateUrl};

/// Largest single intake accepted from a request (10 litres)
pub const MAX_SINGLE_INTAKE_ML: i32 = 10_000;

fn phone_regex() -> &'static regex_lite::Regex {
    static PHONE: OnceLock<regex_lite::Regex> = OnceLock::new();
    PHONE.get_or_init(|| {
        regex_lite::Regex::new(r"^\+?[0-9]{7,15}$").expect("phone pattern is valid")
    })
}

fn username_regex() -> &'static regex_lite::Regex {
    static USERNAME: OnceLock<regex_lite::Regex> = OnceLock::new();
    USERNAME.get_or_init(|| {
        regex_lite::Regex::new(r"^[A-Za-z0-9_.]{3,32}$").expect("username pattern is valid")
    })
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !email.validate_email() {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate an avatar link: absolute http(s) URL
pub fn validate_picture_url(url: &str) -> Result<(), String> {
    if url.len() > 2048 {
        return Err("URL too long".to_string());
    }
    if !(url.starts_with("https://") || url.starts_with("http://")) || !url.validate_url() {
        return Err("Must be an http(s) URL".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate a display username
pub fn validate_username(username: &str) -> Result<(), String> {
    if !username_regex().is_match(username) {
        return Err(
            "Username must be 3-32 characters of letters, digits, '_' or '.'".to_string(),
        );
    }
    Ok(())
}

/// Validate a phone number; spaces and dashes are ignored
pub fn validate_phone_number(phone: &str) -> Result<(), String> {
    let compact = normalize_phone_number(phone);
    if !phone_regex().is_match(&compact) {
        return Err("Phone number must contain 7-15 digits".to_string());
    }
    Ok(())
}

/// Strip formatting characters from a phone number
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Parse a stored weight string.
///
/// Only rejects what the goal calculation cannot use (empty, non-numeric,
/// non-finite, non-positive); range checks on user edits go through
/// [`validate_weight`].
pub fn parse_weight_kg(raw: &str) -> HydrationResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(HydrationError::invalid_input("Weight is missing"));
    }
    let weight: f64 = trimmed
        .parse()
        .map_err(|_| HydrationError::invalid_input(format!("Weight '{}' is not a number", trimmed)))?;
    if !weight.is_finite() || weight <= 0.0 {
        return Err(HydrationError::invalid_input("Weight must be a positive number"));
    }
    Ok(weight)
}

/// Validate age in years
pub fn validate_age(age: i32) -> Result<(), String> {
    if age < 1 {
        return Err("Age must be at least 1 year".to_string());
    }
    if age > 150 {
        return Err("Age cannot exceed 150 years".to_string());
    }
    Ok(())
}

/// Validate a single intake amount from a request
pub fn validate_intake_ml(amount_ml: i32) -> HydrationResult<()> {
    if amount_ml <= 0 {
        return Err(HydrationError::invalid_quantity("Amount must be greater than 0"));
    }
    if amount_ml > MAX_SINGLE_INTAKE_ML {
        return Err(HydrationError::invalid_quantity(format!(
            "Amount cannot exceed {}ml",
            MAX_SINGLE_INTAKE_ML
        )));
    }
    Ok(())
}

/// Validate percentage value (0-100)
pub fn validate_percentage(value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("Percentage must be a valid number".to_string());
    }
    if !(0.0..=100.0).contains(&value) {
        return Err("Percentage must be between 0 and 100".to_string());
    }
    Ok(())
}

/// Parse a time of day in `HH:MM` (24h) or `h:MM AM/PM` form
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime, String> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .or_else(|_| NaiveTime::parse_from_str(&trimmed.to_uppercase(), "%I:%M %p"))
        .map_err(|_| format!("Invalid time '{}'. Use HH:MM", trimmed))
}

/// Validate a reminder interval in minutes
pub fn validate_reminder_interval(minutes: u32) -> Result<(), String> {
    if !(15..=240).contains(&minutes) {
        return Err("Reminder interval must be between 15 and 240 minutes".to_string());
    }
    Ok(())
}

/// Validate latitude/longitude in degrees
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), String> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90".to_string());
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180".to_string());
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "age" => "Age",
        "weight" | "weight_kg" => "Weight",
        "activity_level" => "Activity Level",
        "gender" => "Gender",
        "wake_up_time" => "Wake-up Time",
        "bedtime" => "Bedtime",
        "water_consumption" | "water_consumption_ml" => "Water Consumption",
        "email" => "Email",
        "phone_number" => "Phone Number",
        "username" => "Username",
        "profile_picture" | "profile_picture_url" => "Profile Picture",
        "daily_goal_ml" => "Daily Water Goal",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

impl From<ValidationError> for HydrationError {
    fn from(err: ValidationError) -> Self {
        HydrationError::InvalidInput(err.user_message())
    }
}

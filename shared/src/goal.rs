//! Daily hydration goal calculation
//!
//! goal_ml = weight_kg * ml_per_kg * activity_multiplier, rounded to the
//! nearest millilitre.
//!
//! All functions here are pure and may be called from any thread.

use crate::errors::{HydrationError, HydrationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default millilitres of fluid per kilogram of body weight
pub const DEFAULT_ML_PER_KG: f64 = 33.0;

// ============================================================================
// Activity Level
// ============================================================================

/// Self-reported activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    #[default]
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise most days
    Active,
    /// Very hard exercise or a physical job
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// Hydration multiplier, strictly increasing with intensity
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.0,
            ActivityLevel::Light => 1.1,
            ActivityLevel::Moderate => 1.2,
            ActivityLevel::Active => 1.3,
            ActivityLevel::VeryActive => 1.4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::Light => "Light exercise 1-3 days/week",
            ActivityLevel::Moderate => "Moderate exercise 3-5 days/week",
            ActivityLevel::Active => "Hard exercise most days",
            ActivityLevel::VeryActive => "Very hard exercise or physical job",
        }
    }

    /// Parse a stored label, falling back to [`ActivityLevel::Sedentary`].
    ///
    /// The returned [`ActivityLabel`] records whether the label was
    /// recognised so callers can report the fallback.
    pub fn from_label_or_default(label: &str) -> ActivityLabel {
        match label.parse::<ActivityLevel>() {
            Ok(level) => ActivityLabel {
                level,
                recognised: true,
            },
            Err(_) => ActivityLabel {
                level: ActivityLevel::default(),
                recognised: false,
            },
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = HydrationError;

    /// Case- and separator-insensitive; also accepts the older
    /// `lightly_active` / `moderately_active` / `extra_active` labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" | "lightlyactive" => Ok(ActivityLevel::Light),
            "moderate" | "moderatelyactive" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "veryactive" | "extraactive" => Ok(ActivityLevel::VeryActive),
            _ => Err(HydrationError::invalid_input(format!(
                "Unknown activity level '{}'",
                s
            ))),
        }
    }
}

/// Outcome of lenient activity-level parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityLabel {
    pub level: ActivityLevel,
    /// False when the label was unknown and the default was substituted
    pub recognised: bool,
}

// ============================================================================
// Goal Types
// ============================================================================

/// Inputs to the goal calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalInputs {
    pub body_weight_kg: f64,
    pub activity_level: ActivityLevel,
}

/// Daily fluid target in whole millilitres (always at least 1 ml)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DailyGoalMl(u32);

impl DailyGoalMl {
    pub fn new(ml: u32) -> HydrationResult<Self> {
        if ml == 0 {
            return Err(HydrationError::invalid_input(
                "Daily goal must be at least 1 ml",
            ));
        }
        Ok(Self(ml))
    }

    #[inline]
    pub fn ml(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for DailyGoalMl {
    type Error = HydrationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DailyGoalMl> for u32 {
    fn from(goal: DailyGoalMl) -> Self {
        goal.0
    }
}

impl fmt::Display for DailyGoalMl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ml", self.0)
    }
}

// ============================================================================
// Calculator
// ============================================================================

/// Goal calculator with a tunable ml-per-kg base rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalCalculator {
    ml_per_kg: f64,
}

impl Default for GoalCalculator {
    fn default() -> Self {
        Self {
            ml_per_kg: DEFAULT_ML_PER_KG,
        }
    }
}

impl GoalCalculator {
    pub fn new(ml_per_kg: f64) -> HydrationResult<Self> {
        if !ml_per_kg.is_finite() || ml_per_kg <= 0.0 {
            return Err(HydrationError::invalid_input(
                "ml per kg must be a positive number",
            ));
        }
        Ok(Self { ml_per_kg })
    }

    pub fn ml_per_kg(&self) -> f64 {
        self.ml_per_kg
    }

    /// Compute the daily goal for a body weight and activity level
    pub fn compute(&self, weight_kg: f64, activity_level: ActivityLevel) -> HydrationResult<DailyGoalMl> {
        if weight_kg.is_nan() || weight_kg.is_infinite() {
            return Err(HydrationError::invalid_input("Weight must be a valid number"));
        }
        if weight_kg <= 0.0 {
            return Err(HydrationError::invalid_input("Weight must be greater than 0 kg"));
        }

        let goal = (weight_kg * self.ml_per_kg * activity_level.multiplier()).round();
        if goal > u32::MAX as f64 {
            return Err(HydrationError::invalid_input("Weight is out of range"));
        }

        DailyGoalMl::new(goal as u32)
            .map_err(|_| HydrationError::invalid_input("Weight is too small to derive a goal"))
    }

    pub fn compute_for(&self, inputs: &GoalInputs) -> HydrationResult<DailyGoalMl> {
        self.compute(inputs.body_weight_kg, inputs.activity_level)
    }
}

/// Compute the daily goal using the default base rate
pub fn compute_daily_goal(weight_kg: f64, activity_level: ActivityLevel) -> HydrationResult<DailyGoalMl> {
    GoalCalculator::default().compute(weight_kg, activity_level)
}

/// Compute the goal from raw stored profile fields.
///
/// A missing or malformed weight is `InvalidInput`; a missing or unknown
/// activity label falls back to sedentary.
pub fn compute_goal_from_raw(
    calculator: &GoalCalculator,
    weight: Option<&str>,
    activity: Option<&str>,
) -> HydrationResult<(DailyGoalMl, ActivityLabel)> {
    let weight = weight.ok_or_else(|| HydrationError::invalid_input("Weight is missing"))?;
    let weight_kg = crate::validation::parse_weight_kg(weight)?;

    let activity = match activity {
        Some(label) => ActivityLevel::from_label_or_default(label),
        None => ActivityLabel {
            level: ActivityLevel::default(),
            recognised: false,
        },
    };

    let goal = calculator.compute(weight_kg, activity.level)?;
    Ok((goal, activity))
}

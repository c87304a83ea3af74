//! User profile fields and the keyed update model
//!
//! Each editable field is a [`ProfileField`]; raw input (JSON number or
//! string, since older clients stored everything as strings) is turned into a
//! typed [`ProfileValue`] by [`ProfileField::parse_value`] before anything is
//! persisted.

use crate::goal::ActivityLevel;
use crate::validation::{
    self, get_field_display_label, normalize_phone_number, parse_time_of_day, ValidationError,
};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound for self-reported usual water consumption
const MAX_WATER_CONSUMPTION_ML: i64 = 20_000;

/// Gender as entered during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" | "prefer_not_to_say" => Ok(Gender::Other),
            _ => Err("Gender must be one of: male, female, other".to_string()),
        }
    }
}

/// Editable profile field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Age,
    Weight,
    ActivityLevel,
    Gender,
    WakeUpTime,
    Bedtime,
    WaterConsumption,
    Email,
    PhoneNumber,
    Username,
    ProfilePicture,
}

impl ProfileField {
    pub const ALL: [ProfileField; 11] = [
        ProfileField::Age,
        ProfileField::Weight,
        ProfileField::ActivityLevel,
        ProfileField::Gender,
        ProfileField::WakeUpTime,
        ProfileField::Bedtime,
        ProfileField::WaterConsumption,
        ProfileField::Email,
        ProfileField::PhoneNumber,
        ProfileField::Username,
        ProfileField::ProfilePicture,
    ];

    /// Name used in URLs and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Age => "age",
            ProfileField::Weight => "weight",
            ProfileField::ActivityLevel => "activity_level",
            ProfileField::Gender => "gender",
            ProfileField::WakeUpTime => "wake_up_time",
            ProfileField::Bedtime => "bedtime",
            ProfileField::WaterConsumption => "water_consumption",
            ProfileField::Email => "email",
            ProfileField::PhoneNumber => "phone_number",
            ProfileField::Username => "username",
            ProfileField::ProfilePicture => "profile_picture",
        }
    }

    /// Storage column backing the field
    pub fn column(&self) -> &'static str {
        match self {
            ProfileField::Age => "age",
            ProfileField::Weight => "weight_kg",
            ProfileField::ActivityLevel => "activity_level",
            ProfileField::Gender => "gender",
            ProfileField::WakeUpTime => "wake_up_time",
            ProfileField::Bedtime => "bedtime",
            ProfileField::WaterConsumption => "water_consumption_ml",
            ProfileField::Email => "email",
            ProfileField::PhoneNumber => "phone_number",
            ProfileField::Username => "username",
            ProfileField::ProfilePicture => "profile_picture_url",
        }
    }

    /// Whether changing this field changes the daily goal
    pub fn affects_goal(&self) -> bool {
        matches!(self, ProfileField::Weight | ProfileField::ActivityLevel)
    }

    /// Whether this field lives on the account rather than the profile
    pub fn is_account_field(&self) -> bool {
        matches!(
            self,
            ProfileField::Email | ProfileField::PhoneNumber | ProfileField::Username
        )
    }

    pub fn display_label(&self) -> &'static str {
        get_field_display_label(self.as_str())
    }

    /// Validate raw input and convert it to a typed value
    pub fn parse_value(&self, raw: &serde_json::Value) -> Result<ProfileValue, ValidationError> {
        let field = self.as_str();
        let err = |message: String| ValidationError::new(field, &message);

        match self {
            ProfileField::Age => {
                let age = as_integer(raw).ok_or_else(|| err("Must be a whole number".to_string()))?;
                let age = i32::try_from(age).map_err(|_| err("Out of range".to_string()))?;
                validation::validate_age(age).map_err(err)?;
                Ok(ProfileValue::Age(age))
            }
            ProfileField::Weight => {
                let weight = as_number(raw).ok_or_else(|| err("Must be a number".to_string()))?;
                validation::validate_weight(weight).map_err(err)?;
                Ok(ProfileValue::WeightKg(weight))
            }
            ProfileField::ActivityLevel => {
                let label = as_text(raw).ok_or_else(|| err("Must be text".to_string()))?;
                let level = label
                    .parse::<ActivityLevel>()
                    .map_err(|_| err(format!("Unknown activity level '{}'", label)))?;
                Ok(ProfileValue::ActivityLevel(level))
            }
            ProfileField::Gender => {
                let label = as_text(raw).ok_or_else(|| err("Must be text".to_string()))?;
                Ok(ProfileValue::Gender(label.parse().map_err(err)?))
            }
            ProfileField::WakeUpTime | ProfileField::Bedtime => {
                let text = as_text(raw).ok_or_else(|| err("Must be a time".to_string()))?;
                let time = parse_time_of_day(&text).map_err(err)?;
                Ok(if *self == ProfileField::WakeUpTime {
                    ProfileValue::WakeUpTime(time)
                } else {
                    ProfileValue::Bedtime(time)
                })
            }
            ProfileField::WaterConsumption => {
                let ml = as_integer(raw).ok_or_else(|| err("Must be a whole number".to_string()))?;
                if !(0..=MAX_WATER_CONSUMPTION_ML).contains(&ml) {
                    return Err(err(format!(
                        "Must be between 0 and {} ml",
                        MAX_WATER_CONSUMPTION_ML
                    )));
                }
                Ok(ProfileValue::WaterConsumptionMl(ml as i32))
            }
            ProfileField::Email => {
                let email = as_text(raw).ok_or_else(|| err("Must be text".to_string()))?;
                let email = email.trim().to_lowercase();
                validation::validate_email(&email).map_err(err)?;
                Ok(ProfileValue::Email(email))
            }
            ProfileField::PhoneNumber => {
                let phone = as_text(raw).ok_or_else(|| err("Must be text".to_string()))?;
                validation::validate_phone_number(&phone).map_err(err)?;
                Ok(ProfileValue::PhoneNumber(normalize_phone_number(&phone)))
            }
            ProfileField::Username => {
                let name = as_text(raw).ok_or_else(|| err("Must be text".to_string()))?;
                let name = name.trim().to_string();
                validation::validate_username(&name).map_err(err)?;
                Ok(ProfileValue::Username(name))
            }
            ProfileField::ProfilePicture => {
                let url = as_text(raw).ok_or_else(|| err("Must be text".to_string()))?;
                let url = url.trim().to_string();
                validation::validate_picture_url(&url).map_err(err)?;
                Ok(ProfileValue::ProfilePictureUrl(url))
            }
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        ProfileField::ALL
            .into_iter()
            .find(|f| f.as_str() == normalized)
            .ok_or_else(|| format!("Unknown profile field '{}'", s))
    }
}

/// Typed, validated profile value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProfileValue {
    Age(i32),
    WeightKg(f64),
    ActivityLevel(ActivityLevel),
    Gender(Gender),
    WakeUpTime(NaiveTime),
    Bedtime(NaiveTime),
    WaterConsumptionMl(i32),
    Email(String),
    PhoneNumber(String),
    Username(String),
    /// Link to an avatar hosted elsewhere
    ProfilePictureUrl(String),
}

impl ProfileValue {
    pub fn field(&self) -> ProfileField {
        match self {
            ProfileValue::Age(_) => ProfileField::Age,
            ProfileValue::WeightKg(_) => ProfileField::Weight,
            ProfileValue::ActivityLevel(_) => ProfileField::ActivityLevel,
            ProfileValue::Gender(_) => ProfileField::Gender,
            ProfileValue::WakeUpTime(_) => ProfileField::WakeUpTime,
            ProfileValue::Bedtime(_) => ProfileField::Bedtime,
            ProfileValue::WaterConsumptionMl(_) => ProfileField::WaterConsumption,
            ProfileValue::Email(_) => ProfileField::Email,
            ProfileValue::PhoneNumber(_) => ProfileField::PhoneNumber,
            ProfileValue::Username(_) => ProfileField::Username,
            ProfileValue::ProfilePictureUrl(_) => ProfileField::ProfilePicture,
        }
    }
}

fn as_text(raw: &serde_json::Value) -> Option<String> {
    match raw {
        serde_json::Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn as_number(raw: &serde_json::Value) -> Option<f64> {
    match raw {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn as_integer(raw: &serde_json::Value) -> Option<i64> {
    match raw {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_field_names_roundtrip() {
        for field in ProfileField::ALL {
            assert_eq!(field.as_str().parse::<ProfileField>().unwrap(), field);
        }
        assert_eq!("wake-up-time".parse::<ProfileField>().unwrap(), ProfileField::WakeUpTime);
        assert!("password".parse::<ProfileField>().is_err());
    }

    #[test]
    fn test_goal_fields() {
        assert!(ProfileField::Weight.affects_goal());
        assert!(ProfileField::ActivityLevel.affects_goal());
        assert!(!ProfileField::Age.affects_goal());
    }

    #[rstest]
    #[case(ProfileField::Age, json!(29), ProfileValue::Age(29))]
    #[case(ProfileField::Age, json!("29"), ProfileValue::Age(29))]
    #[case(ProfileField::Weight, json!(72.5), ProfileValue::WeightKg(72.5))]
    #[case(ProfileField::Weight, json!("72.5"), ProfileValue::WeightKg(72.5))]
    #[case(ProfileField::ActivityLevel, json!("Very Active"), ProfileValue::ActivityLevel(ActivityLevel::VeryActive))]
    #[case(ProfileField::Gender, json!("Female"), ProfileValue::Gender(Gender::Female))]
    #[case(ProfileField::WaterConsumption, json!(1500), ProfileValue::WaterConsumptionMl(1500))]
    #[case(ProfileField::Email, json!(" Ana@Example.com "), ProfileValue::Email("ana@example.com".to_string()))]
    #[case(ProfileField::PhoneNumber, json!("077 123 4567"), ProfileValue::PhoneNumber("0771234567".to_string()))]
    #[case(ProfileField::Username, json!("ana_b"), ProfileValue::Username("ana_b".to_string()))]
    #[case(ProfileField::ProfilePicture, json!(" https://cdn.example.com/ana.png "), ProfileValue::ProfilePictureUrl("https://cdn.example.com/ana.png".to_string()))]
    fn test_parse_valid_values(#[case] field: ProfileField, #[case] raw: serde_json::Value, #[case] expected: ProfileValue) {
        let value = field.parse_value(&raw).unwrap();
        assert_eq!(value, expected);
        assert_eq!(value.field(), field);
    }

    #[test]
    fn test_parse_times() {
        let wake = ProfileField::WakeUpTime.parse_value(&json!("06:45")).unwrap();
        assert_eq!(wake, ProfileValue::WakeUpTime(NaiveTime::from_hms_opt(6, 45, 0).unwrap()));

        let bed = ProfileField::Bedtime.parse_value(&json!("11:00 PM")).unwrap();
        assert_eq!(bed, ProfileValue::Bedtime(NaiveTime::from_hms_opt(23, 0, 0).unwrap()));
    }

    #[rstest]
    #[case(ProfileField::Age, json!(0))]
    #[case(ProfileField::Age, json!("twenty"))]
    #[case(ProfileField::Age, json!(29.5))]
    #[case(ProfileField::Weight, json!("NaN"))]
    #[case(ProfileField::Weight, json!(5))]
    #[case(ProfileField::Weight, json!(null))]
    #[case(ProfileField::ActivityLevel, json!("couch"))]
    #[case(ProfileField::Gender, json!(1))]
    #[case(ProfileField::WakeUpTime, json!("soon"))]
    #[case(ProfileField::WaterConsumption, json!(-1))]
    #[case(ProfileField::Email, json!("nope"))]
    #[case(ProfileField::PhoneNumber, json!("123"))]
    #[case(ProfileField::Username, json!("a"))]
    #[case(ProfileField::ProfilePicture, json!("file:///etc/passwd"))]
    fn test_parse_invalid_values(#[case] field: ProfileField, #[case] raw: serde_json::Value) {
        let err = field.parse_value(&raw).unwrap_err();
        assert_eq!(err.field, field.as_str());
    }

    #[test]
    fn test_display_label() {
        assert_eq!(ProfileField::WakeUpTime.display_label(), "Wake-up Time");
        assert_eq!(ProfileField::Weight.display_label(), "Weight");
    }
}

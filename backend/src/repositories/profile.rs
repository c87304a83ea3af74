//! Profile repository: onboarding answers, stored goal and beverage menu

use anyhow::Result;
use aquatrack_shared::{ProfileField, ProfileValue};
use chrono::{DateTime, NaiveTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Account and profile columns for one user
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRecord {
    pub user_id: Uuid,
    pub email: String,
    pub username: String,
    pub phone_number: Option<String>,
    pub age: Option<i32>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<String>,
    pub gender: Option<String>,
    pub wake_up_time: Option<NaiveTime>,
    pub bedtime: Option<NaiveTime>,
    pub water_consumption_ml: Option<i32>,
    pub profile_picture_url: Option<String>,
    pub daily_goal_ml: Option<i32>,
    pub beverage_options: Vec<String>,
    pub selected_beverage: String,
    pub updated_at: DateTime<Utc>,
}

pub struct ProfileRepository;

impl ProfileRepository {
    pub async fn get(pool: &PgPool, user_id: Uuid) -> Result<Option<ProfileRecord>> {
        let record = sqlx::query_as::<_, ProfileRecord>(
            r#"
            SELECT p.user_id, u.email, u.username, u.phone_number,
                   p.age, p.weight_kg, p.activity_level, p.gender,
                   p.wake_up_time, p.bedtime, p.water_consumption_ml, p.profile_picture_url, p.daily_goal_ml,
                   p.beverage_options, p.selected_beverage, p.updated_at
            FROM user_profiles p
            JOIN users u ON u.id = p.user_id
            WHERE p.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Write one validated field. Returns false when the user does not exist.
    pub async fn update_field(pool: &PgPool, user_id: Uuid, value: &ProfileValue) -> Result<bool> {
        let field = value.field();
        let sql = update_sql(field);

        let query = sqlx::query(&sql).bind(user_id);
        let query = match value {
            ProfileValue::Age(age) => query.bind(*age),
            ProfileValue::WeightKg(kg) => query.bind(*kg),
            ProfileValue::ActivityLevel(level) => query.bind(level.as_str()),
            ProfileValue::Gender(gender) => query.bind(gender.as_str()),
            ProfileValue::WakeUpTime(time) | ProfileValue::Bedtime(time) => query.bind(*time),
            ProfileValue::WaterConsumptionMl(ml) => query.bind(*ml),
            ProfileValue::Email(text)
            | ProfileValue::PhoneNumber(text)
            | ProfileValue::Username(text)
            | ProfileValue::ProfilePictureUrl(text) => query.bind(text.as_str()),
        };

        let result = query.execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn set_daily_goal(pool: &PgPool, user_id: Uuid, goal_ml: Option<i32>) -> Result<()> {
        sqlx::query("UPDATE user_profiles SET daily_goal_ml = $2, updated_at = NOW() WHERE user_id = $1")
            .bind(user_id)
            .bind(goal_ml)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn update_beverages(
        pool: &PgPool,
        user_id: Uuid,
        options: &[String],
        selected: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE user_profiles
            SET beverage_options = $2, selected_beverage = $3, updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(options)
        .bind(selected)
        .execute(pool)
        .await?;

        Ok(())
    }
}

/// Column names come from `ProfileField::column`, never from input
fn update_sql(field: ProfileField) -> String {
    let (table, key) = if field.is_account_field() {
        ("users", "id")
    } else {
        ("user_profiles", "user_id")
    };
    format!(
        "UPDATE {} SET {} = $2, updated_at = NOW() WHERE {} = $1",
        table,
        field.column(),
        key
    )
}

//! Profile service - keyed field updates and goal recalculation

use crate::db::unique_violation;
use crate::error::ApiError;
use crate::repositories::{ProfileRecord, ProfileRepository};
use crate::services::HydrationService;
use crate::state::AppState;
use aquatrack_shared::types::{ProfileResponse, UpdateProfileFieldResponse};
use aquatrack_shared::ProfileField;
use tracing::info;
use uuid::Uuid;

/// Profile service for user profile operations
pub struct ProfileService;

impl ProfileService {
    /// Get user profile
    pub async fn get_profile(state: &AppState, user_id: Uuid) -> Result<ProfileResponse, ApiError> {
        let profile = HydrationService::load_profile(state, user_id).await?;
        Ok(profile_response(profile))
    }

    /// Validate and store one field.
    ///
    /// Weight and activity level changes recompute the goal and push it
    /// into the live tracker without touching today's intake.
    pub async fn update_field(
        state: &AppState,
        user_id: Uuid,
        field: &str,
        raw: &serde_json::Value,
    ) -> Result<UpdateProfileFieldResponse, ApiError> {
        let field: ProfileField = field.parse().map_err(ApiError::NotFound)?;
        let value = field.parse_value(raw)?;

        let updated = ProfileRepository::update_field(state.db(), user_id, &value)
            .await
            .map_err(|e| match unique_violation(&e) {
                Some(_) => ApiError::Conflict(format!("{} is already in use", field.display_label())),
                None => ApiError::Internal(e),
            })?;
        if !updated {
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        info!(user_id = %user_id, field = %field, "Profile field updated");

        let daily_goal_ml = if field.affects_goal() {
            Self::refresh_goal(state, user_id).await?
        } else {
            None
        };

        let value = serde_json::to_value(&value).map_err(|e| ApiError::Internal(e.into()))?;

        Ok(UpdateProfileFieldResponse {
            field: field.as_str().to_string(),
            value,
            daily_goal_ml,
        })
    }

    /// Recompute and store the goal; None until a weight is set
    async fn refresh_goal(state: &AppState, user_id: Uuid) -> Result<Option<u32>, ApiError> {
        let profile = HydrationService::load_profile(state, user_id).await?;
        if profile.weight_kg.is_none() {
            return Ok(None);
        }

        let goal = HydrationService::goal_for(&state.goals, &profile)?;
        let goal_ml = i32::try_from(goal.ml()).map_err(|e| ApiError::Internal(e.into()))?;
        ProfileRepository::set_daily_goal(state.db(), user_id, Some(goal_ml))
            .await
            .map_err(ApiError::Internal)?;

        HydrationService::apply_goal_change(state, user_id, goal).await?;

        info!(user_id = %user_id, goal_ml = goal.ml(), "Daily goal recalculated");
        Ok(Some(goal.ml()))
    }
}

fn profile_response(profile: ProfileRecord) -> ProfileResponse {
    ProfileResponse {
        email: profile.email,
        username: profile.username,
        phone_number: profile.phone_number,
        age: profile.age,
        weight_kg: profile.weight_kg,
        activity_level: profile.activity_level,
        gender: profile.gender,
        wake_up_time: profile.wake_up_time.map(|t| t.format("%H:%M").to_string()),
        bedtime: profile.bedtime.map(|t| t.format("%H:%M").to_string()),
        water_consumption_ml: profile.water_consumption_ml,
        profile_picture_url: profile.profile_picture_url,
        daily_goal_ml: profile.daily_goal_ml.and_then(|g| u32::try_from(g).ok()),
        updated_at: profile.updated_at,
    }
}

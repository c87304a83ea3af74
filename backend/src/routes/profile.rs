//! User profile API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use aquatrack_shared::types::{
    ProfileResponse, UpdateProfileFieldRequest, UpdateProfileFieldResponse,
};

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile))
        .route("/:field", put(update_field))
}

/// GET /api/v1/profile - Profile with the derived daily goal
async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = ProfileService::get_profile(&state, auth.user_id).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/profile/:field - Update one field
///
/// Field names use snake_case or kebab-case (`wake_up_time`, `wake-up-time`).
async fn update_field(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(field): Path<String>,
    Json(req): Json<UpdateProfileFieldRequest>,
) -> Result<Json<UpdateProfileFieldResponse>, ApiError> {
    let updated = ProfileService::update_field(&state, auth.user_id, &field, &req.value).await?;
    Ok(Json(updated))
}

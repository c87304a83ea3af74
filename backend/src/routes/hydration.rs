//! Hydration tracking API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::HydrationService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use aquatrack_shared::types::{
    AddBeverageRequest, BeverageMenuResponse, RecordIntakeRequest, RecordIntakeResponse,
    SelectBeverageRequest, WeeklyQuery,
};
use aquatrack_shared::weekly::WeeklyProgress;
use aquatrack_shared::ProgressState;

/// Create hydration routes
pub fn hydration_routes() -> Router<AppState> {
    Router::new()
        .route("/today", get(get_today))
        .route("/intake", post(record_intake))
        .route("/reset", post(reset_progress))
        .route("/weekly", get(get_weekly))
        .route("/beverages", get(get_beverages).post(add_beverage))
        .route("/beverages/selected", put(select_beverage))
}

/// GET /api/v1/hydration/today
async fn get_today(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProgressState>, ApiError> {
    let progress = HydrationService::today(&state, auth.user_id).await?;
    Ok(Json(progress))
}

/// POST /api/v1/hydration/intake - Record a drink
async fn record_intake(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<RecordIntakeRequest>,
) -> Result<(StatusCode, Json<RecordIntakeResponse>), ApiError> {
    let recorded = HydrationService::record_intake(&state, auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(recorded)))
}

/// POST /api/v1/hydration/reset - Zero today's intake
async fn reset_progress(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProgressState>, ApiError> {
    let progress = HydrationService::reset(&state, auth.user_id).await?;
    Ok(Json(progress))
}

/// GET /api/v1/hydration/weekly?week_of=YYYY-MM-DD
async fn get_weekly(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<WeeklyQuery>,
) -> Result<Json<WeeklyProgress>, ApiError> {
    let weekly = HydrationService::weekly(&state, auth.user_id, query.week_of).await?;
    Ok(Json(weekly))
}

/// GET /api/v1/hydration/beverages
async fn get_beverages(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<BeverageMenuResponse>, ApiError> {
    let menu = HydrationService::beverage_menu(&state, auth.user_id).await?;
    Ok(Json(BeverageMenuResponse::from(&menu)))
}

/// POST /api/v1/hydration/beverages
async fn add_beverage(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AddBeverageRequest>,
) -> Result<Json<BeverageMenuResponse>, ApiError> {
    let menu = HydrationService::add_beverage(&state, auth.user_id, req).await?;
    Ok(Json(BeverageMenuResponse::from(&menu)))
}

/// PUT /api/v1/hydration/beverages/selected
async fn select_beverage(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SelectBeverageRequest>,
) -> Result<Json<BeverageMenuResponse>, ApiError> {
    let menu = HydrationService::select_beverage(&state, auth.user_id, &req.label).await?;
    Ok(Json(BeverageMenuResponse::from(&menu)))
}

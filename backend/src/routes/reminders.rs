//! Reminder schedule routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::ReminderService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use aquatrack_shared::types::{NextReminderResponse, ReminderQuery, ReminderScheduleResponse};

pub fn reminder_routes() -> Router<AppState> {
    Router::new()
        .route("/today", get(get_schedule))
        .route("/next", get(get_next))
}

/// GET /api/v1/reminders/today?interval_minutes=N
async fn get_schedule(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ReminderQuery>,
) -> Result<Json<ReminderScheduleResponse>, ApiError> {
    let schedule = ReminderService::today(&state, auth.user_id, query.interval_minutes).await?;
    Ok(Json(schedule))
}

/// GET /api/v1/reminders/next?interval_minutes=N
async fn get_next(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ReminderQuery>,
) -> Result<Json<NextReminderResponse>, ApiError> {
    let next = ReminderService::next(&state, auth.user_id, query.interval_minutes).await?;
    Ok(Json(next))
}

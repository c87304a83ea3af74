//! Water source routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::SourceService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use aquatrack_shared::sources::WaterSource;
use aquatrack_shared::types::{CreateWaterSourceRequest, NearbySourcesQuery, NearbySourcesResponse};

pub fn source_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_source))
        .route("/nearby", get(nearby_sources))
}

/// POST /api/v1/sources
async fn create_source(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateWaterSourceRequest>,
) -> Result<(StatusCode, Json<WaterSource>), ApiError> {
    let source = SourceService::create(&state, auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(source)))
}

/// GET /api/v1/sources/nearby?lat=..&lon=..&radius_km=..&limit=..
async fn nearby_sources(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<NearbySourcesQuery>,
) -> Result<Json<NearbySourcesResponse>, ApiError> {
    let sources = SourceService::nearby(&state, &query).await?;
    Ok(Json(NearbySourcesResponse { sources }))
}

//! Water source registry and proximity search

use crate::error::ApiError;
use crate::repositories::{NewWaterSource, WaterSourceRepository};
use crate::state::AppState;
use anyhow::anyhow;
use aquatrack_shared::sources::{bounding_box, nearest, GeoPoint, NearbySource, WaterSource};
use aquatrack_shared::types::{CreateWaterSourceRequest, NearbySourcesQuery};
use aquatrack_shared::validation::{normalize_phone_number, validate_phone_number, ValidationError};
use tracing::info;
use uuid::Uuid;

const DEFAULT_RADIUS_KM: f64 = 10.0;
const MAX_RADIUS_KM: f64 = 100.0;
const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;
const MAX_NAME_LEN: usize = 120;
const MAX_ADDRESS_LEN: usize = 255;

pub struct SourceService;

impl SourceService {
    /// Register a shop or refill station
    pub async fn create(
        state: &AppState,
        user_id: Uuid,
        req: CreateWaterSourceRequest,
    ) -> Result<WaterSource, ApiError> {
        let name = required_text("name", &req.name, MAX_NAME_LEN)?;
        let address = required_text("address", &req.address, MAX_ADDRESS_LEN)?;
        let location = GeoPoint::new(req.latitude, req.longitude)?;
        let phone_number = match req.phone_number.as_deref().map(str::trim) {
            Some(phone) if !phone.is_empty() => {
                validate_phone_number(phone).map_err(|e| ValidationError::new("phone_number", &e))?;
                Some(normalize_phone_number(phone))
            }
            _ => None,
        };

        let record = WaterSourceRepository::create(
            state.db(),
            NewWaterSource {
                name,
                address,
                location,
                phone_number: phone_number.as_deref(),
                created_by: user_id,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(source_id = %record.id, user_id = %user_id, "Water source registered");

        record
            .into_source()
            .ok_or_else(|| ApiError::Internal(anyhow!("Stored water source has invalid coordinates")))
    }

    /// Sources within the radius, closest first
    pub async fn nearby(state: &AppState, query: &NearbySourcesQuery) -> Result<Vec<NearbySource>, ApiError> {
        let origin = GeoPoint::new(query.lat, query.lon)?;
        let (radius_km, limit) = search_bounds(query)?;

        let records = WaterSourceRepository::within_box(state.db(), bounding_box(&origin, radius_km))
            .await
            .map_err(ApiError::Internal)?;
        let sources: Vec<WaterSource> = records.into_iter().filter_map(|r| r.into_source()).collect();

        Ok(nearest(&origin, &sources, radius_km, limit))
    }
}

fn required_text<'a>(field: &str, raw: &'a str, max_len: usize) -> Result<&'a str, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::invalid_field(field, "Cannot be empty"));
    }
    if trimmed.chars().count() > max_len {
        return Err(ApiError::invalid_field(
            field,
            format!("Cannot exceed {} characters", max_len),
        ));
    }
    Ok(trimmed)
}

/// Radius and result limit with defaults applied
fn search_bounds(query: &NearbySourcesQuery) -> Result<(f64, usize), ApiError> {
    let radius_km = query.radius_km.unwrap_or(DEFAULT_RADIUS_KM);
    if !radius_km.is_finite() || radius_km <= 0.0 || radius_km > MAX_RADIUS_KM {
        return Err(ApiError::invalid_field(
            "radius_km",
            format!("Radius must be greater than 0 and at most {} km", MAX_RADIUS_KM),
        ));
    }

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    Ok((radius_km, limit))
}

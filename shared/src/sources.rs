//! Water source locations and proximity search

use crate::errors::{HydrationError, HydrationResult};
use crate::validation::validate_coordinates;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const EARTH_RADIUS_KM: f64 = 6371.0088;

/// A validated WGS84 coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> HydrationResult<Self> {
        validate_coordinates(latitude, longitude).map_err(HydrationError::InvalidInput)?;
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance (haversine)
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
    }
}

/// A shop or refill station offering drinking water
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterSource {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
    pub phone_number: Option<String>,
}

/// A source together with its distance from the search origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbySource {
    pub source: WaterSource,
    pub distance_km: f64,
}

/// Sources within `radius_km` of `origin`, closest first, at most `limit`
pub fn nearest(origin: &GeoPoint, sources: &[WaterSource], radius_km: f64, limit: usize) -> Vec<NearbySource> {
    let mut nearby: Vec<NearbySource> = sources
        .iter()
        .map(|s| NearbySource {
            distance_km: origin.distance_km(&s.location),
            source: s.clone(),
        })
        .filter(|n| n.distance_km <= radius_km)
        .collect();

    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    nearby.truncate(limit);
    nearby
}

/// Rough lat/lon box enclosing a radius, for pre-filtering in storage
pub fn bounding_box(origin: &GeoPoint, radius_km: f64) -> (f64, f64, f64, f64) {
    let d_lat = (radius_km / EARTH_RADIUS_KM).to_degrees();
    let cos_lat = origin.latitude.to_radians().cos().max(1e-6);
    let d_lon = (radius_km / (EARTH_RADIUS_KM * cos_lat)).to_degrees();

    (
        (origin.latitude - d_lat).max(-90.0),
        (origin.latitude + d_lat).min(90.0),
        (origin.longitude - d_lon).max(-180.0),
        (origin.longitude + d_lon).min(180.0),
    )
}

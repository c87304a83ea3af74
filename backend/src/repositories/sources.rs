//! Water source repository

use anyhow::Result;
use aquatrack_shared::sources::{GeoPoint, WaterSource};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WaterSourceRecord {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub phone_number: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl WaterSourceRecord {
    /// Convert to the domain type; rows failing coordinate checks are skipped
    pub fn into_source(self) -> Option<WaterSource> {
        let location = GeoPoint::new(self.latitude, self.longitude).ok()?;
        Some(WaterSource {
            id: self.id,
            name: self.name,
            address: self.address,
            location,
            phone_number: self.phone_number,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewWaterSource<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub location: GeoPoint,
    pub phone_number: Option<&'a str>,
    pub created_by: Uuid,
}

pub struct WaterSourceRepository;

impl WaterSourceRepository {
    pub async fn create(pool: &PgPool, source: NewWaterSource<'_>) -> Result<WaterSourceRecord> {
        let record = sqlx::query_as::<_, WaterSourceRecord>(
            r#"
            INSERT INTO water_sources (name, address, latitude, longitude, phone_number, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, address, latitude, longitude, phone_number, created_by, created_at
            "#,
        )
        .bind(source.name)
        .bind(source.address)
        .bind(source.location.latitude())
        .bind(source.location.longitude())
        .bind(source.phone_number)
        .bind(source.created_by)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Sources inside a lat/lon box
    pub async fn within_box(
        pool: &PgPool,
        (min_lat, max_lat, min_lon, max_lon): (f64, f64, f64, f64),
    ) -> Result<Vec<WaterSourceRecord>> {
        let records = sqlx::query_as::<_, WaterSourceRecord>(
            r#"
            SELECT id, name, address, latitude, longitude, phone_number, created_by, created_at
            FROM water_sources
            WHERE latitude BETWEEN $1 AND $2
              AND longitude BETWEEN $3 AND $4
            "#,
        )
        .bind(min_lat)
        .bind(max_lat)
        .bind(min_lon)
        .bind(max_lon)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}

//! Application state management
//!
//! Shared resources passed to all handlers via Axum's state extraction.
//! Everything here is created once at startup and cloned cheaply per request.

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::registry::TrackerRegistry;
use anyhow::Result;
use aquatrack_shared::GoalCalculator;
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
///
/// - `db`: PgPool is internally Arc'd
/// - `config`, `trackers`: wrapped in Arc
/// - `jwt`: pre-computed keys wrapped in Arc
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub jwt: JwtService,
    pub goals: GoalCalculator,
    pub trackers: Arc<TrackerRegistry>,
    pub metrics: PrometheusHandle,
    offset: FixedOffset,
}

impl AppState {
    /// Create the application state.
    ///
    /// Fails when the hydration settings are unusable (non-positive base
    /// rate, out-of-range UTC offset).
    pub fn new(db: PgPool, config: AppConfig, metrics: PrometheusHandle) -> Result<Self> {
        let jwt = JwtService::new(
            &config.jwt.secret,
            config.jwt.access_token_expiry_secs,
            config.jwt.refresh_token_expiry_secs,
        );
        let goals = config.hydration.goal_calculator()?;
        let offset = config.hydration.utc_offset()?;

        Ok(Self {
            db,
            config: Arc::new(config),
            jwt,
            goals,
            trackers: Arc::new(TrackerRegistry::new()),
            metrics,
            offset,
        })
    }

    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    /// Offset used to derive users' local calendar day
    #[inline]
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Current local wall-clock time
    pub fn local_now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.offset).naive_local()
    }

    /// Current local calendar day
    pub fn today(&self) -> NaiveDate {
        self.local_now().date()
    }
}

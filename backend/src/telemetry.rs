//! Tracing setup and Prometheus counters

use crate::config::AppConfig;
use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const INTAKE_RECORDED_TOTAL: &str = "aquatrack_intake_recorded_total";
pub const PROGRESS_RESETS_TOTAL: &str = "aquatrack_progress_resets_total";
pub const GOAL_REACHED_TOTAL: &str = "aquatrack_goal_reached_total";

/// Initialize tracing: pretty output in development, JSON in production
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if AppConfig::is_production() {
            "aquatrack_backend=info,tower_http=info".into()
        } else {
            "aquatrack_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if AppConfig::is_production() {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

/// Install the global metrics recorder
pub fn install_metrics_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    metrics::describe_counter!(INTAKE_RECORDED_TOTAL, "Confirmed intake events");
    metrics::describe_counter!(PROGRESS_RESETS_TOTAL, "Manual or rollover progress resets");
    metrics::describe_counter!(GOAL_REACHED_TOTAL, "Days on which the goal was first reached");
    Ok(handle)
}

pub fn intake_recorded() {
    metrics::counter!(INTAKE_RECORDED_TOTAL).increment(1);
}

pub fn progress_reset(reason: &'static str) {
    metrics::counter!(PROGRESS_RESETS_TOTAL, "reason" => reason).increment(1);
}

pub fn goal_reached() {
    metrics::counter!(GOAL_REACHED_TOTAL).increment(1);
}

//! Intake log and tracker progress persistence

use anyhow::{Context, Result};
use aquatrack_shared::{IntakeEvent, ProgressState};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

// ============================================================================
// Intake Logs
// ============================================================================

/// Intake log record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct IntakeLogRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quantity_ml: i32,
    pub beverage: String,
    pub consumed_at: DateTime<Utc>,
    pub consumed_on: NaiveDate,
    pub goal_ml: i32,
    pub created_at: DateTime<Utc>,
}

/// Total consumed on one local day
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailyTotal {
    pub day: NaiveDate,
    pub total_ml: i64,
    /// Goal in effect at the day's latest intake
    pub goal_ml: i32,
}

pub struct IntakeRepository;

impl IntakeRepository {
    /// Store an intake and the tracker state it produced in one transaction
    pub async fn record(
        pool: &PgPool,
        user_id: Uuid,
        event: &IntakeEvent,
        consumed_on: NaiveDate,
        progress: &ProgressState,
    ) -> Result<IntakeLogRecord> {
        let mut tx = pool.begin().await?;

        let record = sqlx::query_as::<_, IntakeLogRecord>(
            r#"
            INSERT INTO intake_logs (user_id, quantity_ml, beverage, consumed_at, consumed_on, goal_ml)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, quantity_ml, beverage, consumed_at, consumed_on, goal_ml, created_at
            "#,
        )
        .bind(user_id)
        .bind(i32::try_from(event.quantity_ml()).context("Quantity out of range")?)
        .bind(event.beverage().label())
        .bind(event.timestamp())
        .bind(consumed_on)
        .bind(i32::try_from(progress.goal_ml).context("Goal out of range")?)
        .fetch_one(&mut *tx)
        .await?;

        ProgressRepository::save(&mut *tx, user_id, progress).await?;

        tx.commit().await?;

        Ok(record)
    }

    /// Per-day totals between two local days, inclusive
    pub async fn daily_totals(
        pool: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyTotal>> {
        let totals = sqlx::query_as::<_, DailyTotal>(
            r#"
            SELECT
                consumed_on AS day,
                SUM(quantity_ml)::bigint AS total_ml,
                (ARRAY_AGG(goal_ml ORDER BY consumed_at DESC))[1] AS goal_ml
            FROM intake_logs
            WHERE user_id = $1 AND consumed_on BETWEEN $2 AND $3
            GROUP BY consumed_on
            ORDER BY consumed_on
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(totals)
    }
}

// ============================================================================
// Tracker Progress
// ============================================================================

/// Persisted tracker state
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProgressRecord {
    pub user_id: Uuid,
    pub day: NaiveDate,
    pub accumulated_ml: i64,
    pub goal_ml: i32,
    pub updated_at: DateTime<Utc>,
}

pub struct ProgressRepository;

impl ProgressRepository {
    pub async fn get(pool: &PgPool, user_id: Uuid) -> Result<Option<ProgressRecord>> {
        let record = sqlx::query_as::<_, ProgressRecord>(
            r#"
            SELECT user_id, day, accumulated_ml, goal_ml, updated_at
            FROM hydration_progress
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Upsert the tracker state for a user
    pub async fn save<'e, E>(executor: E, user_id: Uuid, progress: &ProgressState) -> Result<()>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query(
            r#"
            INSERT INTO hydration_progress (user_id, day, accumulated_ml, goal_ml)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE SET
                day = EXCLUDED.day,
                accumulated_ml = EXCLUDED.accumulated_ml,
                goal_ml = EXCLUDED.goal_ml,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(progress.day)
        .bind(i64::try_from(progress.accumulated_ml).context("Accumulated intake out of range")?)
        .bind(i32::try_from(progress.goal_ml).context("Goal out of range")?)
        .execute(executor)
        .await?;

        Ok(())
    }
}

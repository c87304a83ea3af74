//! Reminder schedule from the user's wake-up time and bedtime

use crate::error::ApiError;
use crate::repositories::ProfileRecord;
use crate::services::HydrationService;
use crate::state::AppState;
use aquatrack_shared::reminders::ReminderWindow;
use aquatrack_shared::types::{NextReminderResponse, ReminderScheduleResponse};
use uuid::Uuid;

pub struct ReminderService;

impl ReminderService {
    /// Reminder instants for the window opening today
    pub async fn today(
        state: &AppState,
        user_id: Uuid,
        interval_minutes: Option<u32>,
    ) -> Result<ReminderScheduleResponse, ApiError> {
        let profile = HydrationService::load_profile(state, user_id).await?;
        let window = reminder_window(&profile, interval_or_default(state, interval_minutes))?;
        let date = state.today();

        Ok(ReminderScheduleResponse {
            date,
            interval_minutes: window.interval_minutes,
            reminders: window.schedule(date),
        })
    }

    /// Next reminder after now; none once today's goal is met
    pub async fn next(
        state: &AppState,
        user_id: Uuid,
        interval_minutes: Option<u32>,
    ) -> Result<NextReminderResponse, ApiError> {
        let profile = HydrationService::load_profile(state, user_id).await?;
        let window = reminder_window(&profile, interval_or_default(state, interval_minutes))?;

        let progress_percent = match HydrationService::today(state, user_id).await {
            Ok(progress) => progress.progress_percent,
            // No goal yet, so nothing has been drunk towards it
            Err(ApiError::InvalidField { .. }) => 0.0,
            Err(e) => return Err(e),
        };

        Ok(NextReminderResponse {
            next_at: window.next_reminder(state.local_now(), progress_percent),
            progress_percent,
        })
    }
}

fn interval_or_default(state: &AppState, interval_minutes: Option<u32>) -> u32 {
    interval_minutes.unwrap_or(state.config().hydration.default_reminder_interval_minutes)
}

fn reminder_window(profile: &ProfileRecord, interval_minutes: u32) -> Result<ReminderWindow, ApiError> {
    let wake_up = profile.wake_up_time.ok_or_else(|| {
        ApiError::invalid_field("wake_up_time", "Set your wake-up time to schedule reminders")
    })?;
    let bedtime = profile
        .bedtime
        .ok_or_else(|| ApiError::invalid_field("bedtime", "Set your bedtime to schedule reminders"))?;

    Ok(ReminderWindow::new(wake_up, bedtime, interval_minutes)?)
}

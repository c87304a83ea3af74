//! Drink reminder scheduling
//!
//! Reminders fire on the hour grid between a user's wake-up time and
//! bedtime. Delivery (push notifications) belongs to the client; this module
//! only decides when.

use crate::errors::{HydrationError, HydrationResult};
use crate::validation::validate_reminder_interval;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Default spacing between reminders
pub const DEFAULT_REMINDER_INTERVAL_MINUTES: u32 = 60;

/// Daily window in which reminders may fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderWindow {
    pub wake_up: NaiveTime,
    pub bedtime: NaiveTime,
    pub interval_minutes: u32,
}

impl ReminderWindow {
    pub fn new(wake_up: NaiveTime, bedtime: NaiveTime, interval_minutes: u32) -> HydrationResult<Self> {
        validate_reminder_interval(interval_minutes).map_err(HydrationError::InvalidInput)?;
        if wake_up == bedtime {
            return Err(HydrationError::invalid_input(
                "Wake-up time and bedtime cannot be equal",
            ));
        }
        Ok(Self {
            wake_up,
            bedtime,
            interval_minutes,
        })
    }

    /// Start and end of the window that opens on `day`.
    /// A bedtime at or before the wake-up time falls on the next day.
    pub fn bounds(&self, day: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let start = day.and_time(self.wake_up);
        let end_day = if self.bedtime <= self.wake_up {
            day + Duration::days(1)
        } else {
            day
        };
        (start, end_day.and_time(self.bedtime))
    }

    /// All reminder instants for the window opening on `day`.
    ///
    /// The first reminder is the top of the hour following wake-up; later
    /// ones are spaced by the interval and stop before bedtime.
    pub fn schedule(&self, day: NaiveDate) -> Vec<NaiveDateTime> {
        let (start, end) = self.bounds(day);
        let step = Duration::minutes(self.interval_minutes as i64);

        let mut next = truncate_to_hour(start) + Duration::hours(1);
        let mut times = Vec::new();
        while next < end {
            times.push(next);
            next += step;
        }
        times
    }

    /// Next reminder strictly after `now`.
    ///
    /// `None` once the goal is met or today's window has closed.
    pub fn next_reminder(&self, now: NaiveDateTime, progress_percent: f64) -> Option<NaiveDateTime> {
        if progress_percent >= 100.0 {
            return None;
        }

        let today = now.date();
        [today - Duration::days(1), today]
            .into_iter()
            .flat_map(|day| self.schedule(day))
            .filter(|t| *t > now)
            .min()
    }
}

fn truncate_to_hour(t: NaiveDateTime) -> NaiveDateTime {
    t - Duration::minutes(t.minute() as i64)
        - Duration::seconds(t.second() as i64)
        - Duration::nanoseconds(t.nanosecond() as i64)
}

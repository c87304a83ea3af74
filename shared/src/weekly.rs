//! Weekly progress aggregation (Monday to Sunday)

use crate::errors::{HydrationError, HydrationResult};
use crate::goal::DailyGoalMl;
use crate::tracker::progress_percent;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One day of the weekly view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayProgress {
    pub date: NaiveDate,
    pub total_ml: u64,
    pub goal_ml: u32,
    pub progress_percent: f64,
    pub goal_met: bool,
}

/// Seven days of progress with summary figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyProgress {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub days: Vec<DayProgress>,
    pub total_ml: u64,
    pub average_percent: f64,
    pub days_goal_met: u32,
    /// Consecutive goal-met days ending at the last met day of the week
    pub current_streak: u32,
}

/// Monday and Sunday of the week containing `date`.
///
/// Fails for the first and last weeks of the calendar range.
pub fn week_bounds(date: NaiveDate) -> HydrationResult<(NaiveDate, NaiveDate)> {
    let monday = date.checked_sub_signed(Duration::days(date.weekday().num_days_from_monday() as i64));
    let sunday = monday.and_then(|start| start.checked_add_signed(Duration::days(6)));
    match (monday, sunday) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(HydrationError::invalid_input(format!(
            "No complete week around {}",
            date
        ))),
    }
}

impl WeeklyProgress {
    /// Build the week containing `week_of`.
    ///
    /// `totals` maps days to (ml consumed, goal in effect). Days outside the
    /// week are ignored; missing days count as nothing consumed against
    /// `default_goal`.
    pub fn from_days(
        week_of: NaiveDate,
        totals: &HashMap<NaiveDate, (u64, DailyGoalMl)>,
        default_goal: DailyGoalMl,
    ) -> HydrationResult<Self> {
        let (start, end) = week_bounds(week_of)?;

        let days: Vec<DayProgress> = start
            .iter_days()
            .take(7)
            .map(|date| {
                let (total_ml, goal) = totals.get(&date).copied().unwrap_or((0, default_goal));
                DayProgress {
                    date,
                    total_ml,
                    goal_ml: goal.ml(),
                    progress_percent: progress_percent(total_ml, goal),
                    goal_met: total_ml >= goal.ml() as u64,
                }
            })
            .collect();

        let total_ml = days.iter().map(|d| d.total_ml).sum();
        let average_percent = days.iter().map(|d| d.progress_percent).sum::<f64>() / days.len() as f64;
        let days_goal_met = days.iter().filter(|d| d.goal_met).count() as u32;

        let current_streak = days
            .iter()
            .rposition(|d| d.goal_met)
            .map(|last| days[..=last].iter().rev().take_while(|d| d.goal_met).count() as u32)
            .unwrap_or(0);

        Ok(Self {
            week_start: start,
            week_end: end,
            days,
            total_ml,
            average_percent,
            days_goal_met,
            current_streak,
        })
    }
}

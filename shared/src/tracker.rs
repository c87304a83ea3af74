//! Daily intake tracking
//!
//! [`IntakeTracker`] accumulates intake events against a daily goal and
//! reports progress as a percentage clamped to 100. It performs no I/O;
//! callers persist or broadcast the returned [`ProgressState`].
//!
//! The tracker is not internally synchronized. Hosts with several event
//! sources must serialize calls per instance (the backend wraps each user's
//! tracker in a mutex).

use crate::errors::{HydrationError, HydrationResult};
use crate::goal::DailyGoalMl;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Intake Events
// ============================================================================

/// Kind of beverage consumed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum BeverageKind {
    #[default]
    Water,
    Coffee,
    Tea,
    Yogurt,
    Milk,
    OrangeJuice,
    RedWine,
    /// User-added label
    Custom(String),
}

impl BeverageKind {
    pub fn label(&self) -> &str {
        match self {
            BeverageKind::Water => "Water",
            BeverageKind::Coffee => "Coffee",
            BeverageKind::Tea => "Tea",
            BeverageKind::Yogurt => "Yogurt",
            BeverageKind::Milk => "Milk",
            BeverageKind::OrangeJuice => "Orange Juice",
            BeverageKind::RedWine => "Red Wine",
            BeverageKind::Custom(label) => label,
        }
    }

    /// Map a label to a known kind, case-insensitively; anything else is custom
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_lowercase().as_str() {
            "water" => BeverageKind::Water,
            "coffee" => BeverageKind::Coffee,
            "tea" => BeverageKind::Tea,
            "yogurt" => BeverageKind::Yogurt,
            "milk" => BeverageKind::Milk,
            "orange juice" | "orange_juice" => BeverageKind::OrangeJuice,
            "red wine" | "red_wine" => BeverageKind::RedWine,
            _ => BeverageKind::Custom(trimmed.to_string()),
        }
    }
}

impl fmt::Display for BeverageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for BeverageKind {
    fn from(label: String) -> Self {
        BeverageKind::from_label(&label)
    }
}

impl From<BeverageKind> for String {
    fn from(kind: BeverageKind) -> Self {
        kind.label().to_string()
    }
}

/// A single confirmed intake. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntakeEvent {
    quantity_ml: u32,
    beverage: BeverageKind,
    timestamp: DateTime<Utc>,
}

impl IntakeEvent {
    pub fn new(quantity_ml: i32, beverage: BeverageKind, timestamp: DateTime<Utc>) -> HydrationResult<Self> {
        let quantity_ml = validate_quantity(quantity_ml)?;
        Ok(Self {
            quantity_ml,
            beverage,
            timestamp,
        })
    }

    pub fn quantity_ml(&self) -> u32 {
        self.quantity_ml
    }

    pub fn beverage(&self) -> &BeverageKind {
        &self.beverage
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Calendar day of the event at `offset`
    pub fn local_day(&self, offset: FixedOffset) -> HydrationResult<NaiveDate> {
        self.timestamp
            .naive_utc()
            .checked_add_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
            .map(|local| local.date())
            .ok_or_else(|| HydrationError::invalid_input("Intake time is out of range"))
    }
}

fn validate_quantity(quantity_ml: i32) -> HydrationResult<u32> {
    if quantity_ml <= 0 {
        return Err(HydrationError::invalid_quantity(format!(
            "Quantity must be greater than 0 ml, got {}",
            quantity_ml
        )));
    }
    Ok(quantity_ml as u32)
}

// ============================================================================
// Progress State
// ============================================================================

/// Snapshot of a day's progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    pub goal_ml: u32,
    pub accumulated_ml: u64,
    /// min(100, accumulated / goal * 100)
    pub progress_percent: f64,
    /// Calendar day the accumulator applies to
    pub day: NaiveDate,
    pub goal_met: bool,
    /// Intake beyond the goal, not reflected in the percentage
    pub overshoot_ml: u64,
}

impl ProgressState {
    fn compute(goal: DailyGoalMl, accumulated_ml: u64, day: NaiveDate) -> Self {
        let goal_ml = goal.ml();
        Self {
            goal_ml,
            accumulated_ml,
            progress_percent: progress_percent(accumulated_ml, goal),
            day,
            goal_met: accumulated_ml >= goal_ml as u64,
            overshoot_ml: accumulated_ml.saturating_sub(goal_ml as u64),
        }
    }
}

/// Percentage of the goal reached, clamped to [0, 100]
pub fn progress_percent(accumulated_ml: u64, goal: DailyGoalMl) -> f64 {
    let percent = accumulated_ml as f64 * 100.0 / goal.ml() as f64;
    percent.min(100.0)
}

// ============================================================================
// Tracker
// ============================================================================

/// When the accumulator rolls over to a new day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RolloverPolicy {
    /// Only an explicit reset clears the accumulator
    #[default]
    Manual,
    /// The first event or clock tick on a later day clears it
    AtMidnight,
}

/// Progress-accumulation state machine for one user-day
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeTracker {
    goal: DailyGoalMl,
    accumulated_ml: u64,
    day: NaiveDate,
    policy: RolloverPolicy,
    offset: FixedOffset,
}

impl IntakeTracker {
    /// Start tracking `today` with an empty accumulator
    pub fn initialize(goal: DailyGoalMl, today: NaiveDate) -> Self {
        Self::resume(goal, today, 0)
    }

    /// Rebuild a tracker from persisted progress
    pub fn resume(goal: DailyGoalMl, day: NaiveDate, accumulated_ml: u64) -> Self {
        Self {
            goal,
            accumulated_ml,
            day,
            policy: RolloverPolicy::default(),
            offset: Utc.fix(),
        }
    }

    pub fn with_policy(mut self, policy: RolloverPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Offset used to map event timestamps to calendar days
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn goal(&self) -> DailyGoalMl {
        self.goal
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn policy(&self) -> RolloverPolicy {
        self.policy
    }

    /// Add `quantity_ml` to today's accumulator.
    ///
    /// Non-positive quantities fail with `InvalidQuantity` and leave the
    /// state untouched.
    pub fn record(&mut self, quantity_ml: i32) -> HydrationResult<ProgressState> {
        let quantity_ml = validate_quantity(quantity_ml)?;
        self.accumulate(quantity_ml)
    }

    /// Record an event, rolling over first when the policy asks for it
    pub fn record_event(&mut self, event: &IntakeEvent) -> HydrationResult<ProgressState> {
        let event_day = event.local_day(self.offset)?;

        if self.policy == RolloverPolicy::AtMidnight {
            if event_day < self.day {
                return Err(HydrationError::StaleEvent {
                    event_day,
                    current_day: self.day,
                });
            }
            self.advance_to(event_day);
        }

        self.accumulate(event.quantity_ml())
    }

    fn accumulate(&mut self, quantity_ml: u32) -> HydrationResult<ProgressState> {
        self.accumulated_ml = self
            .accumulated_ml
            .checked_add(quantity_ml as u64)
            .ok_or_else(|| HydrationError::invalid_quantity("Accumulated intake overflow"))?;
        Ok(self.current_state())
    }

    /// Zero the accumulator, keeping goal and day
    pub fn reset(&mut self) -> ProgressState {
        self.accumulated_ml = 0;
        self.current_state()
    }

    /// Zero the accumulator and move to `today` if a new day has begun
    pub fn reset_on(&mut self, today: NaiveDate) -> ProgressState {
        if today > self.day {
            self.day = today;
        }
        self.reset()
    }

    /// Apply the rollover policy for the clock reading `today`.
    ///
    /// Returns true when the accumulator was rolled over.
    pub fn advance_to(&mut self, today: NaiveDate) -> bool {
        if self.policy == RolloverPolicy::AtMidnight && today > self.day {
            self.day = today;
            self.accumulated_ml = 0;
            return true;
        }
        false
    }

    /// Replace the goal keeping today's intake
    pub fn change_goal(&mut self, goal: DailyGoalMl) -> ProgressState {
        self.goal = goal;
        self.current_state()
    }

    /// Start over with a new goal and day
    pub fn reinitialize(&mut self, goal: DailyGoalMl, today: NaiveDate) -> ProgressState {
        self.goal = goal;
        self.day = today;
        self.accumulated_ml = 0;
        self.current_state()
    }

    pub fn current_state(&self) -> ProgressState {
        ProgressState::compute(self.goal, self.accumulated_ml, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn goal(ml: u32) -> DailyGoalMl {
        DailyGoalMl::new(ml).unwrap()
    }

    fn at(d: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, d, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_initialize_starts_empty() {
        let tracker = IntakeTracker::initialize(goal(2000), day(1));
        let state = tracker.current_state();
        assert_eq!(state.accumulated_ml, 0);
        assert_eq!(state.progress_percent, 0.0);
        assert_eq!(state.goal_ml, 2000);
        assert_eq!(state.day, day(1));
        assert!(!state.goal_met);
    }

    #[test]
    fn test_record_sequence_clamps_at_100() {
        let mut tracker = IntakeTracker::initialize(goal(2000), day(1));

        let state = tracker.record(150).unwrap();
        assert_eq!(state.accumulated_ml, 150);
        assert!((state.progress_percent - 7.5).abs() < 1e-9);

        let state = tracker.record(1850).unwrap();
        assert_eq!(state.accumulated_ml, 2000);
        assert_eq!(state.progress_percent, 100.0);
        assert!(state.goal_met);

        let state = tracker.record(500).unwrap();
        assert_eq!(state.accumulated_ml, 2500);
        assert_eq!(state.progress_percent, 100.0);
        assert_eq!(state.overshoot_ml, 500);

        let state = tracker.reset();
        assert_eq!(state.accumulated_ml, 0);
        assert_eq!(state.progress_percent, 0.0);
        assert_eq!(state.goal_ml, 2000);
    }

    #[test]
    fn test_invalid_quantities_leave_state_unchanged() {
        let mut tracker = IntakeTracker::initialize(goal(2000), day(1));
        tracker.record(300).unwrap();

        assert!(matches!(tracker.record(-50), Err(HydrationError::InvalidQuantity(_))));
        assert!(matches!(tracker.record(0), Err(HydrationError::InvalidQuantity(_))));
        assert_eq!(tracker.current_state().accumulated_ml, 300);
    }

    #[test]
    fn test_intake_event_rejects_non_positive() {
        assert!(IntakeEvent::new(0, BeverageKind::Water, at(1, 8)).is_err());
        assert!(IntakeEvent::new(-1, BeverageKind::Tea, at(1, 8)).is_err());
        let event = IntakeEvent::new(250, BeverageKind::Tea, at(1, 8)).unwrap();
        assert_eq!(event.quantity_ml(), 250);
        assert_eq!(event.beverage(), &BeverageKind::Tea);
    }

    #[test]
    fn test_manual_policy_never_rolls_over() {
        let mut tracker = IntakeTracker::initialize(goal(2000), day(1));
        tracker.record(500).unwrap();

        assert!(!tracker.advance_to(day(2)));
        let event = IntakeEvent::new(200, BeverageKind::Water, at(3, 9)).unwrap();
        let state = tracker.record_event(&event).unwrap();
        assert_eq!(state.accumulated_ml, 700);
        assert_eq!(state.day, day(1));
    }

    #[test]
    fn test_midnight_policy_rolls_over_on_new_day() {
        let mut tracker =
            IntakeTracker::initialize(goal(2000), day(1)).with_policy(RolloverPolicy::AtMidnight);

        let e1 = IntakeEvent::new(500, BeverageKind::Water, at(1, 22)).unwrap();
        assert_eq!(tracker.record_event(&e1).unwrap().accumulated_ml, 500);

        let e2 = IntakeEvent::new(300, BeverageKind::Coffee, at(2, 7)).unwrap();
        let state = tracker.record_event(&e2).unwrap();
        assert_eq!(state.accumulated_ml, 300);
        assert_eq!(state.day, day(2));
    }

    #[test]
    fn test_midnight_policy_rejects_stale_event() {
        let mut tracker =
            IntakeTracker::initialize(goal(2000), day(2)).with_policy(RolloverPolicy::AtMidnight);
        tracker.record(100).unwrap();

        let stale = IntakeEvent::new(300, BeverageKind::Water, at(1, 23)).unwrap();
        let err = tracker.record_event(&stale).unwrap_err();
        assert_eq!(
            err,
            HydrationError::StaleEvent {
                event_day: day(1),
                current_day: day(2)
            }
        );
        assert_eq!(tracker.current_state().accumulated_ml, 100);
    }

    #[test]
    fn test_offset_moves_day_boundary() {
        // 23:30 UTC on the 1st is already the 2nd at UTC+2
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let mut tracker = IntakeTracker::initialize(goal(2000), day(1))
            .with_policy(RolloverPolicy::AtMidnight)
            .with_offset(offset);

        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 23, 30, 0).unwrap();
        let event = IntakeEvent::new(250, BeverageKind::Water, ts).unwrap();
        assert_eq!(tracker.record_event(&event).unwrap().day, day(2));
    }

    #[test]
    fn test_event_at_calendar_edge_is_rejected() {
        let west = FixedOffset::west_opt(5 * 3600).unwrap();
        let mut tracker = IntakeTracker::initialize(goal(2000), day(1))
            .with_policy(RolloverPolicy::AtMidnight)
            .with_offset(west);

        let event = IntakeEvent::new(250, BeverageKind::Water, DateTime::<Utc>::MIN_UTC).unwrap();
        assert!(event.local_day(west).is_err());
        assert!(tracker.record_event(&event).is_err());
        assert_eq!(tracker.current_state().accumulated_ml, 0);
    }

    #[test]
    fn test_reset_on_advances_day_only_forward() {
        let mut tracker = IntakeTracker::initialize(goal(2000), day(5));
        tracker.record(400).unwrap();

        let state = tracker.reset_on(day(4));
        assert_eq!(state.day, day(5));
        assert_eq!(state.accumulated_ml, 0);

        tracker.record(400).unwrap();
        let state = tracker.reset_on(day(6));
        assert_eq!(state.day, day(6));
        assert_eq!(state.accumulated_ml, 0);
    }

    #[test]
    fn test_change_goal_keeps_intake() {
        let mut tracker = IntakeTracker::initialize(goal(2000), day(1));
        tracker.record(1000).unwrap();

        let state = tracker.change_goal(goal(4000));
        assert_eq!(state.accumulated_ml, 1000);
        assert_eq!(state.progress_percent, 25.0);

        let state = tracker.reinitialize(goal(3000), day(2));
        assert_eq!(state.accumulated_ml, 0);
        assert_eq!(state.day, day(2));
    }

    #[test]
    fn test_resume_from_persisted_progress() {
        let tracker = IntakeTracker::resume(goal(2000), day(1), 2500);
        let state = tracker.current_state();
        assert_eq!(state.progress_percent, 100.0);
        assert_eq!(state.overshoot_ml, 500);
    }

    #[test]
    fn test_beverage_labels() {
        assert_eq!(BeverageKind::from_label("coffee"), BeverageKind::Coffee);
        assert_eq!(BeverageKind::from_label("Orange Juice"), BeverageKind::OrangeJuice);
        assert_eq!(
            BeverageKind::from_label(" Kombucha "),
            BeverageKind::Custom("Kombucha".to_string())
        );
        assert_eq!(BeverageKind::RedWine.to_string(), "Red Wine");

        let json = serde_json::to_string(&BeverageKind::OrangeJuice).unwrap();
        assert_eq!(json, "\"Orange Juice\"");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: accumulator equals the sum recorded since the last reset
        #[test]
        fn prop_accumulated_is_sum_since_reset(
            before in prop::collection::vec(1i32..2000, 0..10),
            after in prop::collection::vec(1i32..2000, 0..20),
            goal_ml in 1u32..10000
        ) {
            let mut tracker = IntakeTracker::initialize(goal(goal_ml), day(1));
            for q in &before {
                tracker.record(*q).unwrap();
            }
            tracker.reset();
            for q in &after {
                tracker.record(*q).unwrap();
            }
            let expected: u64 = after.iter().map(|q| *q as u64).sum();
            prop_assert_eq!(tracker.current_state().accumulated_ml, expected);
        }

        /// Property: percent always within [0, 100]
        #[test]
        fn prop_percent_in_range(
            quantities in prop::collection::vec(1i32..i32::MAX, 0..10),
            goal_ml in 1u32..20000
        ) {
            let mut tracker = IntakeTracker::initialize(goal(goal_ml), day(1));
            for q in quantities {
                let state = tracker.record(q).unwrap();
                prop_assert!((0.0..=100.0).contains(&state.progress_percent));
            }
        }

        /// Property: reset always yields zero and preserves the goal
        #[test]
        fn prop_reset_zeroes(
            quantities in prop::collection::vec(1i32..5000, 0..10),
            goal_ml in 1u32..20000
        ) {
            let mut tracker = IntakeTracker::initialize(goal(goal_ml), day(1));
            for q in quantities {
                tracker.record(q).unwrap();
            }
            let state = tracker.reset();
            prop_assert_eq!(state.accumulated_ml, 0);
            prop_assert_eq!(state.progress_percent, 0.0);
            prop_assert_eq!(state.goal_ml, goal_ml);
        }
    }
}

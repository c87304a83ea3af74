//! AquaTrack WASM Module
//!
//! Runs the hydration core in the browser or mobile web view so the client
//! shows the same goal and progress as the server without a round trip.

use aquatrack_shared::beverages::QUICK_QUANTITIES_ML;
use aquatrack_shared::{ActivityLevel, DailyGoalMl, GoalCalculator, IntakeTracker};
use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

fn to_js<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Daily goal in ml; unknown activity labels count as sedentary
#[wasm_bindgen]
pub fn compute_daily_goal(weight_kg: f64, activity_level: &str) -> Result<u32, JsValue> {
    let level = ActivityLevel::from_label_or_default(activity_level).level;
    GoalCalculator::default()
        .compute(weight_kg, level)
        .map(|goal| goal.ml())
        .map_err(to_js)
}

/// Quick-add intake presets in ml
#[wasm_bindgen]
pub fn quick_quantities() -> Vec<u32> {
    QUICK_QUANTITIES_ML.to_vec()
}

/// Client-side intake tracker
#[wasm_bindgen]
pub struct WasmIntakeTracker {
    inner: IntakeTracker,
}

#[wasm_bindgen]
impl WasmIntakeTracker {
    /// `today` is an ISO date (`YYYY-MM-DD`)
    #[wasm_bindgen(constructor)]
    pub fn new(goal_ml: u32, today: &str) -> Result<WasmIntakeTracker, JsValue> {
        let goal = DailyGoalMl::new(goal_ml).map_err(to_js)?;
        let today = today.parse::<NaiveDate>().map_err(to_js)?;
        Ok(Self {
            inner: IntakeTracker::initialize(goal, today),
        })
    }

    /// Add an intake and return the new percentage
    pub fn record(&mut self, quantity_ml: i32) -> Result<f64, JsValue> {
        self.inner
            .record(quantity_ml)
            .map(|state| state.progress_percent)
            .map_err(to_js)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[wasm_bindgen(getter)]
    pub fn progress_percent(&self) -> f64 {
        self.inner.current_state().progress_percent
    }

    #[wasm_bindgen(getter)]
    pub fn accumulated_ml(&self) -> f64 {
        self.inner.current_state().accumulated_ml as f64
    }

    /// Full progress state as JSON
    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.current_state()).map_err(to_js)
    }
}

//! Beverage menu shown next to the quick-add buttons

use crate::errors::{HydrationError, HydrationResult};
use crate::tracker::BeverageKind;
use serde::{Deserialize, Serialize};

/// Quick-add quantities offered to the user, in ml
pub const QUICK_QUANTITIES_ML: [u32; 6] = [150, 200, 250, 300, 350, 400];

/// Maximum number of beverages on the menu
pub const MAX_BEVERAGE_OPTIONS: usize = 3;

const MAX_LABEL_LEN: usize = 40;

/// Rolling list of beverage options with the current selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeverageMenu {
    options: Vec<BeverageKind>,
    selected: BeverageKind,
}

impl Default for BeverageMenu {
    fn default() -> Self {
        Self {
            options: vec![BeverageKind::Coffee, BeverageKind::Yogurt, BeverageKind::Tea],
            selected: BeverageKind::Coffee,
        }
    }
}

impl BeverageMenu {
    /// Restore a persisted menu, keeping at most the newest options
    pub fn from_labels<I, S>(labels: I, selected: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options: Vec<BeverageKind> = labels
            .into_iter()
            .map(|l| BeverageKind::from_label(l.as_ref()))
            .collect();
        if options.is_empty() {
            return Self::default();
        }
        if options.len() > MAX_BEVERAGE_OPTIONS {
            options.drain(..options.len() - MAX_BEVERAGE_OPTIONS);
        }

        let selected = selected
            .map(BeverageKind::from_label)
            .filter(|kind| options.contains(kind))
            .unwrap_or_else(|| options[0].clone());

        Self { options, selected }
    }

    pub fn options(&self) -> &[BeverageKind] {
        &self.options
    }

    pub fn selected(&self) -> &BeverageKind {
        &self.selected
    }

    pub fn labels(&self) -> Vec<String> {
        self.options.iter().map(|o| o.label().to_string()).collect()
    }

    /// Add a beverage, dropping the oldest option when the menu is full
    pub fn add(&mut self, label: &str) -> HydrationResult<BeverageKind> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(HydrationError::invalid_input("Beverage name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_LABEL_LEN {
            return Err(HydrationError::invalid_input(format!(
                "Beverage name cannot exceed {} characters",
                MAX_LABEL_LEN
            )));
        }

        let kind = BeverageKind::from_label(trimmed);
        if self
            .options
            .iter()
            .any(|o| o.label().eq_ignore_ascii_case(kind.label()))
        {
            return Err(HydrationError::invalid_input(format!(
                "'{}' is already on the menu",
                kind.label()
            )));
        }

        if self.options.len() >= MAX_BEVERAGE_OPTIONS {
            let removed = self.options.remove(0);
            if removed == self.selected {
                self.selected = self.options[0].clone();
            }
        }
        self.options.push(kind.clone());
        Ok(kind)
    }

    /// Select one of the listed beverages
    pub fn select(&mut self, label: &str) -> HydrationResult<&BeverageKind> {
        let wanted = label.trim();
        let known = BeverageKind::from_label(wanted);
        let kind = self
            .options
            .iter()
            .find(|o| **o == known || o.label().eq_ignore_ascii_case(wanted))
            .cloned()
            .ok_or_else(|| HydrationError::invalid_input(format!("'{}' is not on the menu", wanted)))?;
        self.selected = kind;
        Ok(&self.selected)
    }
}

/// Whether `quantity_ml` is one of the quick-add presets
pub fn is_quick_quantity(quantity_ml: u32) -> bool {
    QUICK_QUANTITIES_ML.contains(&quantity_ml)
}


impl From<&BeverageMenu> for crate::types::BeverageMenuResponse {
    fn from(menu: &BeverageMenu) -> Self {
        Self {
            options: menu.labels(),
            selected: menu.selected().label().to_string(),
            quick_quantities_ml: QUICK_QUANTITIES_ML.to_vec(),
        }
    }
}

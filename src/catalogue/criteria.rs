//! Search and filter parameters sent to the listing service.

use crate::constants::{DEFAULT_LIMIT, DEFAULT_YEAR, PAGE_SIZE};
use serde::{Deserialize, Serialize};

/// Filter parameters for a listing fetch.
///
/// Fields hold whatever the user last entered. Empty strings and zero numbers
/// mean "unset"; [`FilterCriteria::with_defaults`] substitutes the defaults
/// before the criteria leave the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub manufacturer: String,
    pub model: String,
    pub fuel: String,
    pub year: u16,
    pub limit: u32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            manufacturer: String::new(),
            model: String::new(),
            fuel: String::new(),
            year: DEFAULT_YEAR,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl FilterCriteria {
    /// Copy of these criteria with every falsy field replaced by its default.
    ///
    /// A year of `0` cannot be told apart from "unset" and becomes
    /// [`DEFAULT_YEAR`]; a limit of `0` becomes [`DEFAULT_LIMIT`].
    pub fn with_defaults(&self) -> Self {
        Self {
            manufacturer: self.manufacturer.clone(),
            model: self.model.clone(),
            fuel: self.fuel.clone(),
            year: if self.year == 0 {
                DEFAULT_YEAR
            } else {
                self.year
            },
            limit: if self.limit == 0 {
                DEFAULT_LIMIT
            } else {
                self.limit
            },
        }
    }

    /// 1-based page number derived from the current limit.
    pub fn page_number(&self) -> u32 {
        self.with_defaults().limit / PAGE_SIZE
    }

    /// Apply a single field update. Returns true when the value actually changed.
    pub fn apply(&mut self, update: FilterUpdate) -> bool {
        match update {
            FilterUpdate::Manufacturer(value) => replace_if_changed(&mut self.manufacturer, value),
            FilterUpdate::Model(value) => replace_if_changed(&mut self.model, value),
            FilterUpdate::Fuel(value) => replace_if_changed(&mut self.fuel, value),
            FilterUpdate::Year(value) => replace_if_changed(&mut self.year, value),
        }
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// A request from the presentation layer to change one filter field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    Manufacturer(String),
    Model(String),
    Fuel(String),
    /// `0` clears the year filter.
    Year(u16),
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout entry model for storage and display.

use crate::error::StoreError;
use crate::models::category::{self, CategoryDef};
use crate::time_utils::format_display_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Stored workout entry in `@workout_logs_{profileId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct WorkoutEntry {
    /// Timestamp-derived id, unique within the owning profile
    pub id: String,
    /// Free-text description
    pub name: String,
    /// Display date captured at creation (e.g. "05.03.2024")
    pub date: String,
    /// Category snapshot taken at creation
    #[serde(default)]
    pub category: Category,
    /// Attributes with a value, in display order
    #[serde(default)]
    pub units: Vec<Unit>,
}

/// Category copied by value into each entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct Category {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub color: String,
    #[serde(rename = "defaultUnits", default)]
    pub default_units: Vec<String>,
}

impl Default for Category {
    /// Entries written before categories existed display as "other".
    fn default() -> Self {
        category::find_category(category::FALLBACK_CATEGORY_ID)
            .map(CategoryDef::snapshot)
            .unwrap_or_else(|| category::default_category().snapshot())
    }
}

/// Quantitative attribute (weight, reps, duration, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct Unit {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub icon: String,
    /// Raw text typed into the form
    #[serde(default)]
    pub value: String,
}

impl Unit {
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Entry as collected by the add-entry form, before it is stored.
#[derive(Debug, Clone, Validate)]
pub struct WorkoutDraft {
    #[validate(custom(function = "crate::models::not_blank"))]
    pub name: String,
    pub date: NaiveDate,
    pub category: Category,
    pub units: Vec<Unit>,
}

impl WorkoutDraft {
    /// Draft for `category` seeded with its default (blank) units.
    pub fn new(name: impl Into<String>, date: NaiveDate, category: &CategoryDef) -> Self {
        Self {
            name: name.into(),
            date,
            category: category.snapshot(),
            units: category.default_units(),
        }
    }

    /// Set the value of the unit at `index`. Out-of-range indexes are ignored.
    pub fn set_unit_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(unit) = self.units.get_mut(index) {
            unit.value = value.into();
        }
    }

    /// Append a unit from the registry. Returns `false` for an unknown unit id.
    pub fn add_unit(&mut self, unit_id: &str) -> bool {
        match category::unit_template(unit_id) {
            Some(unit) => {
                self.units.push(unit);
                true
            }
            None => false,
        }
    }

    pub fn remove_unit(&mut self, index: usize) -> Option<Unit> {
        (index < self.units.len()).then(|| self.units.remove(index))
    }

    /// Build the stored entry, dropping units left blank.
    ///
    /// Fails if `date_format` cannot render the draft's date.
    pub fn into_entry(self, id: String, date_format: &str) -> crate::error::Result<WorkoutEntry> {
        let date = format_display_date(self.date, date_format).ok_or_else(|| {
            StoreError::Internal(anyhow::anyhow!(
                "date format '{}' cannot render {}",
                date_format,
                self.date
            ))
        })?;

        Ok(WorkoutEntry {
            id,
            name: self.name,
            date,
            category: self.category,
            units: self.units.into_iter().filter(|u| !u.is_blank()).collect(),
        })
    }
}

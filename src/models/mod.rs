// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the store.

pub mod category;
pub mod profile;
pub mod workout;

pub use category::{CategoryDef, UnitDef};
pub use profile::{LegacyProfile, NewProfile, Profile, ProfileSummary};
pub use workout::{Category, Unit, WorkoutDraft, WorkoutEntry};

use validator::ValidationError;

/// Reject values that are empty after trimming whitespace.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

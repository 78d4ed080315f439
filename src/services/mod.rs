// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - store logic layer.

pub mod calendar;
pub mod migration;
pub mod profile;
pub mod session;
pub mod workout;

pub use calendar::{DayMarker, DotColorRule};
pub use migration::{migrate_legacy_profile, MigrationOutcome};
pub use profile::{ProfileDeletion, ProfileStore};
pub use session::ActiveSession;
pub use workout::WorkoutLogStore;

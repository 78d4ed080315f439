// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitlog: local profiles and workout logs on on-device key-value storage.
//!
//! This crate provides the data store behind the fitness tracker: profile
//! management with an optional password gate, per-profile workout logs,
//! the calendar index derived from them, and the one-time upgrade from the
//! single-profile storage layout.

pub mod config;
pub mod db;
pub mod error;
pub mod ids;
pub mod logging;
pub mod models;
pub mod services;
pub mod time_utils;

use config::{Config, StorageBackend};
use db::KvStore;
use error::Result;
use models::WorkoutEntry;
use services::{
    calendar, migrate_legacy_profile, ActiveSession, DayMarker, MigrationOutcome, ProfileStore,
    WorkoutLogStore,
};
use std::collections::BTreeMap;

/// Shared store handles.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub kv: KvStore,
    pub session: ActiveSession,
    pub profiles: ProfileStore,
    pub workouts: WorkoutLogStore,
}

/// State resolved at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Startup {
    /// Profile to open, or `None` to show profile selection
    pub active_profile_id: Option<String>,
    /// `None` if the migration failed (the failure is logged)
    pub migration: Option<MigrationOutcome>,
}

impl AppState {
    /// Build the stores over an existing key-value store.
    pub fn new(config: Config, kv: KvStore) -> Self {
        let session = ActiveSession::new(kv.clone());
        let workouts = WorkoutLogStore::new(kv.clone(), config.date_format.clone());
        let profiles = ProfileStore::new(kv.clone(), session.clone(), workouts.clone());

        Self {
            config,
            kv,
            session,
            profiles,
            workouts,
        }
    }

    /// Open the storage backend named by `config`.
    pub async fn open(config: Config) -> Result<Self> {
        let kv = match &config.storage {
            StorageBackend::Memory => KvStore::new_in_memory(),
            StorageBackend::File(dir) => KvStore::open(dir).await?,
        };
        Ok(Self::new(config, kv))
    }

    /// Run the legacy migration, then resolve the active session.
    ///
    /// Never fails: a migration error is logged and startup continues with
    /// the normal session check.
    pub async fn bootstrap(&self) -> Startup {
        let migration = match migrate_legacy_profile(&self.kv, &self.session).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!(error = %e, "Legacy migration failed");
                None
            }
        };

        let active_profile_id = match &migration {
            Some(MigrationOutcome::Migrated { profile, .. }) => Some(profile.id.clone()),
            _ => self.session.resolve().await,
        };

        tracing::info!(
            active = active_profile_id.is_some(),
            migrated = matches!(migration, Some(MigrationOutcome::Migrated { .. })),
            "Startup resolved"
        );

        Startup {
            active_profile_id,
            migration,
        }
    }

    /// Calendar markers for a profile's log, using the configured tie-break.
    pub async fn day_index(&self, profile_id: &str) -> Result<BTreeMap<String, DayMarker>> {
        let entries = self.workouts.list_entries(profile_id).await?;
        Ok(calendar::build_day_index(&entries, self.config.calendar_dot))
    }

    /// A profile's entries dated `iso_date` (`YYYY-MM-DD`).
    pub async fn entries_on(
        &self,
        profile_id: &str,
        iso_date: &str,
    ) -> Result<Vec<WorkoutEntry>> {
        let entries = self.workouts.list_entries(profile_id).await?;
        Ok(calendar::entries_for_date(&entries, iso_date)
            .into_iter()
            .cloned()
            .collect())
    }
}

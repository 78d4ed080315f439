// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-profile workout log.
//!
//! Each profile owns one collection under `@workout_logs_{profileId}`,
//! stored newest-first. Every operation names the profile explicitly; there
//! is no way to reach another profile's collection through this API.

use crate::db::{keys, KvStore};
use crate::error::{Result, StoreError};
use crate::ids;
use crate::models::{WorkoutDraft, WorkoutEntry};
use validator::Validate;

/// Workout log store, namespaced by profile id.
#[derive(Clone)]
pub struct WorkoutLogStore {
    kv: KvStore,
    date_format: String,
}

impl WorkoutLogStore {
    /// `date_format` is the chrono format used for the stored display date.
    pub fn new(kv: KvStore, date_format: impl Into<String>) -> Self {
        Self {
            kv,
            date_format: date_format.into(),
        }
    }

    async fn load(&self, key: &str) -> Result<Vec<WorkoutEntry>> {
        Ok(self.kv.get_json(key).await?.unwrap_or_default())
    }

    /// All entries for a profile, newest first.
    ///
    /// A missing collection is empty. A collection that fails to parse is
    /// logged and also treated as empty.
    pub async fn list_entries(&self, profile_id: &str) -> Result<Vec<WorkoutEntry>> {
        match self.load(&keys::workout_logs(profile_id)).await {
            Err(StoreError::Corrupt { key, source }) => {
                tracing::error!(
                    key = %key,
                    error = %source,
                    "Unreadable workout log, showing empty"
                );
                Ok(Vec::new())
            }
            other => other,
        }
    }

    pub async fn get_entry(
        &self,
        profile_id: &str,
        entry_id: &str,
    ) -> Result<Option<WorkoutEntry>> {
        Ok(self
            .list_entries(profile_id)
            .await?
            .into_iter()
            .find(|e| e.id == entry_id))
    }

    /// Store a new entry at the front of the profile's log.
    ///
    /// Fails with [`StoreError::Validation`] if the name is blank. Units
    /// without a value are dropped.
    pub async fn add_entry(&self, profile_id: &str, draft: WorkoutDraft) -> Result<WorkoutEntry> {
        draft.validate()?;

        let key = keys::workout_logs(profile_id);
        let _guard = self.kv.lock_key(&key).await;

        let mut entries = self.load(&key).await?;

        let mut id = ids::next_id();
        while entries.iter().any(|e| e.id == id) {
            id = ids::next_id();
        }

        let entry = draft.into_entry(id, &self.date_format)?;
        entries.insert(0, entry.clone());
        self.kv.set_json(&key, &entries).await?;

        tracing::debug!(
            profile_id,
            entry_id = %entry.id,
            category = %entry.category.id,
            units = entry.units.len(),
            "Workout entry added"
        );

        Ok(entry)
    }

    /// Delete one entry. Returns `false` if no entry had that id.
    pub async fn delete_entry(&self, profile_id: &str, entry_id: &str) -> Result<bool> {
        let key = keys::workout_logs(profile_id);
        let _guard = self.kv.lock_key(&key).await;

        let mut entries = self.load(&key).await?;
        let before = entries.len();
        entries.retain(|e| e.id != entry_id);

        if entries.len() == before {
            return Ok(false);
        }

        self.kv.set_json(&key, &entries).await?;
        tracing::debug!(profile_id, entry_id, "Workout entry deleted");
        Ok(true)
    }

    /// Remove the profile's whole collection. Returns the number of entries removed.
    pub async fn delete_all_entries(&self, profile_id: &str) -> Result<usize> {
        let key = keys::workout_logs(profile_id);
        let _guard = self.kv.lock_key(&key).await;

        let count = match self.load(&key).await {
            Ok(entries) => entries.len(),
            Err(StoreError::Corrupt { .. }) => 0,
            Err(e) => return Err(e),
        };

        self.kv.remove_item(&key).await?;
        tracing::debug!(profile_id, count, "Workout log removed");
        Ok(count)
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile management.
//!
//! Handles the profile lifecycle:
//! 1. Create (and activate) a profile
//! 2. Select a profile, gated by its password if one is set
//! 3. Change or remove the password
//! 4. Delete a profile together with its workout log
//!
//! Every mutation rewrites the whole `profiles` collection.

use crate::db::{keys, KvStore};
use crate::error::{Result, StoreError};
use crate::ids;
use crate::models::{NewProfile, Profile, ProfileSummary};
use crate::services::{ActiveSession, WorkoutLogStore};
use crate::time_utils::format_utc_rfc3339;
use serde::Serialize;
use validator::Validate;

/// Profile store and active-session selection.
#[derive(Clone)]
pub struct ProfileStore {
    kv: KvStore,
    session: ActiveSession,
    workouts: WorkoutLogStore,
}

/// Report returned after a profile is deleted.
///
/// The caller returns to profile selection afterwards in every case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileDeletion {
    pub profile_id: String,
    /// Workout entries removed with the profile
    pub entries_removed: usize,
    /// Whether the deleted profile was the active session
    pub session_cleared: bool,
}

impl ProfileStore {
    pub fn new(kv: KvStore, session: ActiveSession, workouts: WorkoutLogStore) -> Self {
        Self {
            kv,
            session,
            workouts,
        }
    }

    async fn load(&self) -> Result<Vec<Profile>> {
        Ok(self.kv.get_json(keys::PROFILES).await?.unwrap_or_default())
    }

    async fn save(&self, profiles: &[Profile]) -> Result<()> {
        self.kv.set_json(keys::PROFILES, profiles).await
    }

    // ─── Queries ─────────────────────────────────────────────────

    /// All profiles in creation order.
    ///
    /// Missing storage is an empty list. An unreadable collection is logged
    /// and also shown as empty.
    pub async fn list_profiles(&self) -> Result<Vec<Profile>> {
        match self.load().await {
            Err(StoreError::Corrupt { key, source }) => {
                tracing::error!(
                    key = %key,
                    error = %source,
                    "Unreadable profile list, showing empty"
                );
                Ok(Vec::new())
            }
            other => other,
        }
    }

    pub async fn list_profile_summaries(&self) -> Result<Vec<ProfileSummary>> {
        Ok(self
            .list_profiles()
            .await?
            .iter()
            .map(Profile::summary)
            .collect())
    }

    pub async fn get_profile(&self, profile_id: &str) -> Result<Option<Profile>> {
        Ok(self
            .list_profiles()
            .await?
            .into_iter()
            .find(|p| p.id == profile_id))
    }

    pub async fn get_active_profile_id(&self) -> Result<Option<String>> {
        self.session.current().await
    }

    // ─── Mutations ───────────────────────────────────────────────

    /// Create a profile and make it the active session.
    ///
    /// Creating a profile while another is active replaces the active one.
    /// If the profile cannot be activated it is removed again, so a failed
    /// call leaves no profile behind.
    pub async fn create_profile(&self, name: &str, password: Option<&str>) -> Result<Profile> {
        let draft = NewProfile {
            name: name.to_string(),
            password: password.map(str::to_string),
        };
        draft.validate()?;

        let profile = {
            let _guard = self.kv.lock_key(keys::PROFILES).await;
            let mut profiles = self.load().await?;

            let mut id = ids::next_id();
            while profiles.iter().any(|p| p.id == id) {
                id = ids::next_id();
            }

            let profile = Profile {
                id,
                name: draft.name,
                password: draft.password,
                created_at: format_utc_rfc3339(chrono::Utc::now()),
            };
            profiles.push(profile.clone());
            self.save(&profiles).await?;
            profile
        };

        if let Err(e) = self.session.activate(&profile.id).await {
            // Rollback the saved profile
            if let Err(rollback_err) = self.remove_from_list(&profile.id).await {
                tracing::error!(
                    profile_id = %profile.id,
                    error = %rollback_err,
                    "Failed to rollback profile after activation error"
                );
            }
            return Err(e);
        }

        tracing::info!(
            profile_id = %profile.id,
            locked = profile.requires_password(),
            "Profile created"
        );

        Ok(profile)
    }

    /// Make `profile_id` the active session.
    ///
    /// If the profile has a password, `password` must match it exactly;
    /// otherwise the active session is left untouched.
    pub async fn select_profile(&self, profile_id: &str, password: Option<&str>) -> Result<()> {
        let profile = self
            .get_profile(profile_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Profile {}", profile_id)))?;

        if profile.requires_password() && !profile.password_matches(password.unwrap_or("")) {
            tracing::warn!(profile_id, "Profile selection rejected: wrong password");
            return Err(StoreError::Authentication);
        }

        self.session.activate(profile_id).await?;
        tracing::info!(profile_id, "Profile selected");
        Ok(())
    }

    /// Replace the profile's password. An empty `new_password` removes the gate.
    ///
    /// When a password is currently set, `current_password` must match it.
    pub async fn update_password(
        &self,
        profile_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let _guard = self.kv.lock_key(keys::PROFILES).await;
        let mut profiles = self.load().await?;

        let profile = profiles
            .iter_mut()
            .find(|p| p.id == profile_id)
            .ok_or_else(|| StoreError::NotFound(format!("Profile {}", profile_id)))?;

        if profile.has_password() && !profile.password_matches(current_password) {
            tracing::warn!(profile_id, "Password change rejected: wrong current password");
            return Err(StoreError::Authentication);
        }

        profile.password = Some(new_password.to_string());
        self.save(&profiles).await?;

        tracing::info!(
            profile_id,
            locked = !new_password.trim().is_empty(),
            "Password updated"
        );
        Ok(())
    }

    /// Delete a profile, its workout log, and the active session if it
    /// pointed at this profile. Irreversible.
    pub async fn delete_profile(&self, profile_id: &str) -> Result<ProfileDeletion> {
        if !self.remove_from_list(profile_id).await? {
            tracing::warn!(profile_id, "Deleting profile that is not in the list");
        }

        let entries_removed = self.workouts.delete_all_entries(profile_id).await?;
        let session_cleared = self.session.clear_if(profile_id).await?;

        tracing::info!(
            profile_id,
            entries_removed,
            session_cleared,
            "Profile deleted"
        );

        Ok(ProfileDeletion {
            profile_id: profile_id.to_string(),
            entries_removed,
            session_cleared,
        })
    }

    /// Drop `profile_id` from the collection. Returns `false` if it was absent.
    async fn remove_from_list(&self, profile_id: &str) -> Result<bool> {
        let _guard = self.kv.lock_key(keys::PROFILES).await;
        let mut profiles = self.load().await?;
        let before = profiles.len();
        profiles.retain(|p| p.id != profile_id);

        if profiles.len() == before {
            return Ok(false);
        }
        self.save(&profiles).await?;
        Ok(true)
    }

    /// Clear the active session. Profiles and workout logs are untouched.
    pub async fn logout(&self) -> Result<()> {
        self.session.clear().await?;
        tracing::info!("Logged out");
        Ok(())
    }
}

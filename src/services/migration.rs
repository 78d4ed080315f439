// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One-time upgrade from the single-profile layout.
//!
//! Before multi-profile support the app kept one `user_profile` record and
//! one unscoped `@workout_logs` collection. The upgrade:
//! 1. Creates a profile from the legacy record (fresh id, no password)
//! 2. Copies the legacy workout log to the new profile's key
//! 3. Writes the one-element `profiles` collection
//! 4. Activates the new profile
//! 5. Removes both legacy keys
//!
//! The steps are not atomic. The presence of `profiles` is the only guard,
//! so once step 3 has completed the upgrade never runs again and any legacy
//! keys left behind by an interrupted step 5 are ignored.

use crate::db::{keys, KvStore};
use crate::error::{Result, StoreError};
use crate::ids;
use crate::models::{LegacyProfile, Profile};
use crate::services::ActiveSession;

/// Name given to a migrated profile whose legacy record has no usable name.
pub const LEGACY_FALLBACK_NAME: &str = "Профиль";

/// Outcome of a migration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// No legacy record, or the multi-profile layout already exists
    NotNeeded,
    Migrated {
        profile: Profile,
        /// Whether a legacy workout log was moved
        workouts_moved: bool,
    },
}

/// Run the legacy upgrade if its precondition holds.
pub async fn migrate_legacy_profile(
    kv: &KvStore,
    session: &ActiveSession,
) -> Result<MigrationOutcome> {
    let _guard = kv.lock_key(keys::PROFILES).await;

    let Some(raw_legacy) = kv.get_item(keys::LEGACY_PROFILE).await? else {
        return Ok(MigrationOutcome::NotNeeded);
    };
    if kv.contains_key(keys::PROFILES).await? {
        tracing::debug!("Profiles already present, skipping legacy migration");
        return Ok(MigrationOutcome::NotNeeded);
    }

    let legacy: LegacyProfile =
        serde_json::from_str(&raw_legacy).map_err(|source| StoreError::Corrupt {
            key: keys::LEGACY_PROFILE.to_string(),
            source,
        })?;

    let name = if legacy.name.trim().is_empty() {
        tracing::warn!("Legacy profile has no name, using fallback");
        LEGACY_FALLBACK_NAME.to_string()
    } else {
        legacy.name
    };

    let profile = Profile {
        id: ids::next_id(),
        name,
        password: None,
        created_at: legacy.created_at,
    };

    tracing::info!(profile_id = %profile.id, "Migrating legacy profile");

    // The log is copied verbatim; entry shapes are not touched.
    let workouts_moved = match kv.get_item(keys::LEGACY_WORKOUT_LOGS).await? {
        Some(raw_logs) => {
            kv.set_item(&keys::workout_logs(&profile.id), &raw_logs)
                .await?;
            true
        }
        None => false,
    };

    kv.set_json(keys::PROFILES, std::slice::from_ref(&profile))
        .await?;
    session.activate(&profile.id).await?;

    kv.remove_item(keys::LEGACY_WORKOUT_LOGS).await?;
    kv.remove_item(keys::LEGACY_PROFILE).await?;

    tracing::info!(
        profile_id = %profile.id,
        workouts_moved,
        "Legacy migration complete"
    );

    Ok(MigrationOutcome::Migrated {
        profile,
        workouts_moved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_legacy_record() {
        let kv = KvStore::new_in_memory();
        let session = ActiveSession::new(kv.clone());

        let outcome = migrate_legacy_profile(&kv, &session).await.unwrap();
        assert_eq!(outcome, MigrationOutcome::NotNeeded);
        assert!(!kv.contains_key("profiles").await.unwrap());
    }

    #[tokio::test]
    async fn test_legacy_without_workouts() {
        let kv = KvStore::new_in_memory();
        let session = ActiveSession::new(kv.clone());
        kv.set_item("user_profile", r#"{"name":"Old"}"#).await.unwrap();

        let outcome = migrate_legacy_profile(&kv, &session).await.unwrap();
        let MigrationOutcome::Migrated {
            profile,
            workouts_moved,
        } = outcome
        else {
            panic!("expected migration");
        };

        assert!(!workouts_moved);
        assert_eq!(profile.name, "Old");
        assert_eq!(profile.created_at, "");
        assert!(!kv
            .contains_key(&keys::workout_logs(&profile.id))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_legacy_without_name_gets_fallback() {
        let kv = KvStore::new_in_memory();
        let session = ActiveSession::new(kv.clone());
        kv.set_item("user_profile", r#"{"name":"  ","createdAt":"x"}"#)
            .await
            .unwrap();

        let MigrationOutcome::Migrated { profile, .. } =
            migrate_legacy_profile(&kv, &session).await.unwrap()
        else {
            panic!("expected migration");
        };
        assert_eq!(profile.name, LEGACY_FALLBACK_NAME);
        assert_eq!(profile.created_at, "x");
    }

    #[tokio::test]
    async fn test_malformed_legacy_record_fails_without_writes() {
        let kv = KvStore::new_in_memory();
        let session = ActiveSession::new(kv.clone());
        kv.set_item("user_profile", "not json").await.unwrap();

        assert!(migrate_legacy_profile(&kv, &session).await.is_err());
        assert!(!kv.contains_key("profiles").await.unwrap());
        assert!(kv.contains_key("user_profile").await.unwrap());
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Active session pointer.
//!
//! The selected profile id lives under `active_profile_id`. Every read goes
//! to storage, so there is no in-memory copy to drift.

use crate::db::{keys, KvStore};
use crate::error::Result;

/// Handle that owns the `active_profile_id` key.
#[derive(Clone)]
pub struct ActiveSession {
    kv: KvStore,
}

impl ActiveSession {
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// Currently selected profile id, if any.
    pub async fn current(&self) -> Result<Option<String>> {
        self.kv.get_item(keys::ACTIVE_PROFILE_ID).await
    }

    /// Resolve the session at startup. Storage failures resolve to "no session".
    pub async fn resolve(&self) -> Option<String> {
        match self.current().await {
            Ok(active) => active,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read active profile");
                None
            }
        }
    }

    pub async fn activate(&self, profile_id: &str) -> Result<()> {
        let _guard = self.kv.lock_key(keys::ACTIVE_PROFILE_ID).await;
        self.kv.set_item(keys::ACTIVE_PROFILE_ID, profile_id).await?;
        tracing::debug!(profile_id, "Active profile set");
        Ok(())
    }

    /// Clear the pointer (logout).
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.kv.lock_key(keys::ACTIVE_PROFILE_ID).await;
        self.kv.remove_item(keys::ACTIVE_PROFILE_ID).await
    }

    /// Clear the pointer only if it refers to `profile_id`.
    ///
    /// Returns `true` if the pointer was cleared.
    pub async fn clear_if(&self, profile_id: &str) -> Result<bool> {
        let _guard = self.kv.lock_key(keys::ACTIVE_PROFILE_ID).await;
        if self.kv.get_item(keys::ACTIVE_PROFILE_ID).await?.as_deref() != Some(profile_id) {
            return Ok(false);
        }
        self.kv.remove_item(keys::ACTIVE_PROFILE_ID).await?;
        Ok(true)
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local profile model.

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Profile stored in the `profiles` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct Profile {
    /// Timestamp-derived id, immutable once created
    pub id: String,
    /// Display name
    pub name: String,
    /// Plaintext password; empty or absent means no gate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Creation timestamp (ISO 8601)
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

impl Profile {
    /// Whether selecting this profile must be gated by a password prompt.
    ///
    /// A password made only of whitespace does not gate selection.
    pub fn requires_password(&self) -> bool {
        self.password
            .as_deref()
            .is_some_and(|p| !p.trim().is_empty())
    }

    /// Whether any password is stored, including whitespace-only ones.
    pub fn has_password(&self) -> bool {
        self.password.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Byte-for-byte comparison of `candidate` against the stored password.
    pub fn password_matches(&self, candidate: &str) -> bool {
        let stored = self.password.as_deref().unwrap_or("");
        stored.as_bytes().ct_eq(candidate.as_bytes()).into()
    }

    /// Row for the profile selection list.
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            locked: self.requires_password(),
        }
    }
}

/// Profile as listed on the selection screen. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct ProfileSummary {
    pub id: String,
    pub name: String,
    pub locked: bool,
}

/// Input collected by the profile creation form.
#[derive(Debug, Clone, Validate)]
pub struct NewProfile {
    #[validate(custom(function = "crate::models::not_blank"))]
    pub name: String,
    pub password: Option<String>,
}

/// Single-profile record (`user_profile`) from before multi-profile support.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyProfile {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

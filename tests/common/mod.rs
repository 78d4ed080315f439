// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::NaiveDate;
use fitlog::config::Config;
use fitlog::db::KvStore;
use fitlog::models::{category, WorkoutDraft};
use fitlog::AppState;
use std::path::Path;

/// Create app state over a fresh in-memory store.
#[allow(dead_code)]
pub fn test_state() -> AppState {
    AppState::new(Config::test_default(), KvStore::new_in_memory())
}

/// Create app state over an existing store (to share or pre-seed it).
#[allow(dead_code)]
pub fn test_state_with(kv: KvStore) -> AppState {
    AppState::new(Config::test_default(), kv)
}

/// Create app state backed by files under `dir`.
#[allow(dead_code)]
pub async fn test_state_on_disk(dir: &Path) -> AppState {
    let kv = KvStore::open(dir)
        .await
        .expect("Failed to open directory store");
    AppState::new(Config::test_default(), kv)
}

/// Parse a "YYYY-MM-DD" date for test fixtures.
#[allow(dead_code)]
pub fn day(iso: &str) -> NaiveDate {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d").expect("valid fixture date")
}

/// Draft in `category_id` with its default units, all blank.
#[allow(dead_code)]
pub fn draft(name: &str, iso: &str, category_id: &str) -> WorkoutDraft {
    let category = category::find_category(category_id).expect("known category");
    WorkoutDraft::new(name, day(iso), category)
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Integration tests for profile deletion.

mod common;
use common::{draft, test_state};

#[tokio::test]
async fn test_delete_active_profile_removes_all_records() {
    let state = test_state();
    let p = state.profiles.create_profile("Delete Me", None).await.unwrap();

    for (name, day) in [("Run", "2024-03-04"), ("Lift", "2024-03-05")] {
        state
            .workouts
            .add_entry(&p.id, draft(name, day, "power"))
            .await
            .unwrap();
    }

    // Verify everything exists before deletion
    assert_eq!(state.workouts.list_entries(&p.id).await.unwrap().len(), 2);
    assert_eq!(
        state.profiles.get_active_profile_id().await.unwrap(),
        Some(p.id.clone())
    );

    let report = state.profiles.delete_profile(&p.id).await.unwrap();
    assert_eq!(report.profile_id, p.id);
    assert_eq!(report.entries_removed, 2);
    assert!(report.session_cleared);

    // Verify everything is gone
    assert!(state.workouts.list_entries(&p.id).await.unwrap().is_empty());
    assert!(state.profiles.get_profile(&p.id).await.unwrap().is_none());
    assert_eq!(state.profiles.get_active_profile_id().await.unwrap(), None);
    assert!(!state
        .kv
        .contains_key(&format!("@workout_logs_{}", p.id))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_delete_inactive_profile_keeps_session() {
    let state = test_state();
    let doomed = state.profiles.create_profile("Doomed", None).await.unwrap();
    let survivor = state.profiles.create_profile("Survivor", None).await.unwrap();

    state
        .workouts
        .add_entry(&survivor.id, draft("Walk", "2024-03-05", "cardio"))
        .await
        .unwrap();

    let report = state.profiles.delete_profile(&doomed.id).await.unwrap();
    assert!(!report.session_cleared);
    assert_eq!(report.entries_removed, 0);

    assert_eq!(
        state.profiles.get_active_profile_id().await.unwrap(),
        Some(survivor.id.clone())
    );
    let remaining = state.profiles.list_profiles().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, survivor.id);
    assert_eq!(
        state.workouts.list_entries(&survivor.id).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn test_delete_locked_profile_needs_no_password() {
    let state = test_state();
    let p = state
        .profiles
        .create_profile("Locked", Some("secret"))
        .await
        .unwrap();

    state.profiles.delete_profile(&p.id).await.unwrap();
    assert!(state.profiles.list_profiles().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_unknown_profile_still_cleans_up() {
    let state = test_state();
    let survivor = state.profiles.create_profile("Survivor", None).await.unwrap();

    // Orphaned log left by an earlier crash.
    state
        .kv
        .set_item("@workout_logs_ghost", "[]")
        .await
        .unwrap();

    let report = state.profiles.delete_profile("ghost").await.unwrap();
    assert_eq!(report.entries_removed, 0);
    assert!(!report.session_cleared);
    assert!(!state.kv.contains_key("@workout_logs_ghost").await.unwrap());
    assert_eq!(state.profiles.list_profiles().await.unwrap(), vec![survivor]);
}

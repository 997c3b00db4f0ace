// ABOUTME: Integration tests for logout semantics and session-scoped caching
// ABOUTME: Logout flushes every cached result so no data survives an identity change
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::sync::Arc;

use fittrack_client::auth::AuthState;
use fittrack_client::models::ProgressStats;
use fittrack_client::test_utils::StubBackend;

use helpers::{bench_press_entry, logged_in_client};

#[tokio::test]
async fn test_logout_flushes_every_cached_result() {
    let backend = Arc::new(StubBackend::new().with_stats(ProgressStats {
        total_workouts: 3,
        total_plans: 1,
        total_volume: 7530.0,
    }));
    let client = logged_in_client(&backend).await;

    client.workout_history().await.unwrap();
    client.exercise_library().await.unwrap();
    client.progress_stats().await.unwrap();
    client.workout_plans().await.unwrap();
    assert_eq!(client.cache().len().await, 4);

    client.logout().await.unwrap();

    assert!(client.cache().is_empty().await);
    assert_eq!(client.gate().state().await, AuthState::Unauthenticated);

    // Queries are gated off again, without touching the backend
    let before = backend.calls().len();
    assert!(client.progress_stats().await.unwrap().is_disabled());
    assert_eq!(backend.calls().len(), before);
}

#[tokio::test]
async fn test_next_login_starts_from_an_empty_cache() {
    let backend = Arc::new(StubBackend::new());
    let client = logged_in_client(&backend).await;

    client.log_workout(vec![bench_press_entry()]).await.unwrap();
    client.workout_history().await.unwrap();
    assert_eq!(backend.call_count("getWorkoutHistory"), 1);

    client.logout().await.unwrap();
    client.login().await.unwrap();

    // A fresh fetch, not a stale hit from the previous session
    let history = client
        .workout_history()
        .await
        .unwrap()
        .into_option()
        .unwrap();
    assert_eq!(history.workouts.len(), 1);
    assert_eq!(backend.call_count("getWorkoutHistory"), 2);
}

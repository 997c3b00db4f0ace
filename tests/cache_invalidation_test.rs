// ABOUTME: Integration tests for the query cache and mutation invalidation rules
// ABOUTME: Each mutation stales exactly its declared keys; untouched keys keep serving from cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::sync::Arc;

use fittrack_client::cache::QueryKey;
use fittrack_client::errors::ErrorCode;
use fittrack_client::models::{Exercise, ProgressStats};
use fittrack_client::test_utils::StubBackend;

use helpers::{bench_press_entry, logged_in_client};

#[tokio::test]
async fn test_second_read_is_served_from_cache() {
    let backend = Arc::new(
        StubBackend::new().with_exercises(vec![Exercise::new("Bench Press", "Chest", "Gym")]),
    );
    let client = logged_in_client(&backend).await;

    let first = client.exercise_library().await.unwrap().into_option().unwrap();
    let second = client.exercise_library().await.unwrap().into_option().unwrap();

    assert_eq!(first, second);
    assert_eq!(backend.call_count("getExerciseLibrary"), 1);
}

#[tokio::test]
async fn test_log_workout_invalidates_history_and_stats_only() {
    let backend = Arc::new(StubBackend::new().with_stats(ProgressStats::default()));
    let client = logged_in_client(&backend).await;

    // Warm every cached query
    client.workout_history().await.unwrap();
    client.exercise_library().await.unwrap();
    client.progress_stats().await.unwrap();
    client.workout_plans().await.unwrap();

    client.log_workout(vec![bench_press_entry()]).await.unwrap();

    let cache = client.cache();
    assert!(cache.is_stale(QueryKey::WorkoutHistory).await);
    assert!(cache.is_stale(QueryKey::ProgressStats).await);
    assert!(cache.is_fresh(QueryKey::ExerciseLibrary).await);
    assert!(cache.is_fresh(QueryKey::WorkoutPlans).await);

    // The stale keys re-fetch; the fresh ones keep serving from cache
    client.workout_history().await.unwrap();
    client.exercise_library().await.unwrap();
    assert_eq!(backend.call_count("getWorkoutHistory"), 2);
    assert_eq!(backend.call_count("getExerciseLibrary"), 1);
}

#[tokio::test]
async fn test_add_exercise_invalidates_library_only() {
    let backend = Arc::new(StubBackend::new());
    let client = logged_in_client(&backend).await;

    client.workout_history().await.unwrap();
    client.exercise_library().await.unwrap();
    client.progress_stats().await.unwrap();
    client.workout_plans().await.unwrap();

    client
        .add_exercise("Zercher Squat", "Legs", "Gym")
        .await
        .unwrap();

    let cache = client.cache();
    assert!(cache.is_stale(QueryKey::ExerciseLibrary).await);
    assert!(cache.is_fresh(QueryKey::WorkoutHistory).await);
    assert!(cache.is_fresh(QueryKey::ProgressStats).await);
    assert!(cache.is_fresh(QueryKey::WorkoutPlans).await);

    // The re-fetched library includes the new exercise
    let library = client.exercise_library().await.unwrap().into_option().unwrap();
    assert!(library.iter().any(|e| e.name == "Zercher Squat"));
    assert_eq!(backend.call_count("getExerciseLibrary"), 2);
}

#[tokio::test]
async fn test_create_workout_plan_invalidates_plans_and_stats() {
    let backend = Arc::new(StubBackend::new());
    let client = logged_in_client(&backend).await;

    client.workout_plans().await.unwrap();
    client.progress_stats().await.unwrap();
    client.exercise_library().await.unwrap();

    client
        .create_workout_plan("Push Pull Legs", 3, vec![vec![], vec![], vec![]])
        .await
        .unwrap();

    let cache = client.cache();
    assert!(cache.is_stale(QueryKey::WorkoutPlans).await);
    assert!(cache.is_stale(QueryKey::ProgressStats).await);
    assert!(cache.is_fresh(QueryKey::ExerciseLibrary).await);

    let plans = client.workout_plans().await.unwrap().into_option().unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].name, "Push Pull Legs");
}

#[tokio::test]
async fn test_failed_mutation_does_not_invalidate() {
    let backend = Arc::new(StubBackend::new());
    let client = logged_in_client(&backend).await;

    client.workout_history().await.unwrap();
    client.progress_stats().await.unwrap();

    backend.fail_next(ErrorCode::RemoteRejected, "workout rejected");
    let err = client
        .log_workout(vec![bench_press_entry()])
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RemoteRejected);

    let cache = client.cache();
    assert!(cache.is_fresh(QueryKey::WorkoutHistory).await);
    assert!(cache.is_fresh(QueryKey::ProgressStats).await);
}

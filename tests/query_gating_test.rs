// ABOUTME: Integration tests for query gating on backend readiness and auth state
// ABOUTME: Disabled queries never reach the backend; gated mutations fail with distinct codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::sync::Arc;

use fittrack_client::errors::ErrorCode;
use fittrack_client::models::UserRole;
use fittrack_client::test_utils::StubBackend;

use helpers::{bench_press_entry, logged_in_client, logged_out_client, test_principal};

#[tokio::test]
async fn test_unauthenticated_queries_are_disabled_and_issue_no_calls() {
    let backend = Arc::new(StubBackend::new());
    let client = logged_out_client(&backend).await;

    assert!(client.workout_history().await.unwrap().is_disabled());
    assert!(client.exercise_library().await.unwrap().is_disabled());
    assert!(client.progress_stats().await.unwrap().is_disabled());
    assert!(client.workout_plans().await.unwrap().is_disabled());

    // A ready backend changes nothing while the gate is closed
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_uninitialized_backend_disables_queries_even_when_authenticated() {
    let backend = Arc::new(StubBackend::uninitialized());
    let client = logged_in_client(&backend).await;

    assert!(client.workout_history().await.unwrap().is_disabled());
    assert!(client.progress_stats().await.unwrap().is_disabled());
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_queries_enable_once_backend_becomes_ready() {
    let backend = Arc::new(StubBackend::uninitialized());
    let client = logged_in_client(&backend).await;

    assert!(client.exercise_library().await.unwrap().is_disabled());

    backend.set_ready(true);
    let library = client.exercise_library().await.unwrap();
    assert!(!library.is_disabled());
    assert_eq!(backend.call_count("getExerciseLibrary"), 1);
}

#[tokio::test]
async fn test_mutation_on_uninitialized_backend_fails_distinctly() {
    let backend = Arc::new(StubBackend::uninitialized());
    let client = logged_in_client(&backend).await;

    let err = client
        .log_workout(vec![bench_press_entry()])
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::BackendUninitialized);
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_mutation_without_identity_requires_auth() {
    let backend = Arc::new(StubBackend::new());
    let client = logged_out_client(&backend).await;

    let err = client
        .add_exercise("Zercher Squat", "Legs", "Gym")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthRequired);
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_profile_and_role_calls_require_auth() {
    let backend = Arc::new(StubBackend::new());
    let client = logged_out_client(&backend).await;

    assert_eq!(
        client.caller_profile().await.unwrap_err().code,
        ErrorCode::AuthRequired
    );
    assert_eq!(
        client.caller_role().await.unwrap_err().code,
        ErrorCode::AuthRequired
    );
    assert_eq!(
        client
            .assign_role(&test_principal(), UserRole::Admin)
            .await
            .unwrap_err()
            .code,
        ErrorCode::AuthRequired
    );
    assert!(backend.calls().is_empty());
}

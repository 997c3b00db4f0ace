// ABOUTME: Shared helpers for integration tests
// ABOUTME: Builds QueryClients over the stubbed backend and identity seams
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::sync::Arc;

use fittrack_client::auth::AuthGate;
use fittrack_client::backend::FitnessBackend;
use fittrack_client::models::{Exercise, Principal, WorkoutEntry, WorkoutSet};
use fittrack_client::queries::QueryClient;
use fittrack_client::test_utils::{StaticIdentity, StubBackend};

/// Principal used by most tests as the logged-in caller
pub const TEST_PRINCIPAL: &str = "w3gef-eqllq-aaaaa";

/// Client over the given backend, already resolved and logged in
pub async fn logged_in_client(backend: &Arc<StubBackend>) -> QueryClient {
    let gate = Arc::new(AuthGate::new(Arc::new(StaticIdentity::new(TEST_PRINCIPAL))));
    let client = QueryClient::new(
        Arc::clone(backend) as Arc<dyn FitnessBackend>,
        gate,
    );
    client.resolve_auth().await;
    client.login().await.unwrap();
    client
}

/// Client whose identity provider holds no identity and cannot log in
pub async fn logged_out_client(backend: &Arc<StubBackend>) -> QueryClient {
    let gate = Arc::new(AuthGate::new(Arc::new(StaticIdentity::logged_out())));
    let client = QueryClient::new(
        Arc::clone(backend) as Arc<dyn FitnessBackend>,
        gate,
    );
    client.resolve_auth().await;
    client
}

/// The logged-in principal as a model value
pub fn test_principal() -> Principal {
    Principal::new(TEST_PRINCIPAL)
}

/// A bench-press entry: 10x135 and 8x145, volume 2510
pub fn bench_press_entry() -> WorkoutEntry {
    WorkoutEntry {
        exercise: Exercise::new("Bench Press", "Chest", "Gym"),
        sets: vec![
            WorkoutSet {
                reps: 10,
                weight: 135.0,
            },
            WorkoutSet {
                reps: 8,
                weight: 145.0,
            },
        ],
    }
}

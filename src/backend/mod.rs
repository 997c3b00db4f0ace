// ABOUTME: Typed backend access layer - one async operation per use case
// ABOUTME: Defines the FitnessBackend trait with explicit caller scoping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Backend Access Layer
//!
//! The remote fitness backend owns all persistence; this layer is the typed
//! call surface the rest of the client goes through. Each use case is one
//! asynchronous request/response operation with no client-side retry, batching,
//! or partial-failure handling: a failure surfaces as a single rejected
//! [`AppResult`].
//!
//! Caller scoping is explicit: every per-user operation takes the caller's
//! [`Principal`] as a parameter instead of reading ambient session state, which
//! keeps the ownership boundary visible and testable. Server-side enforcement
//! (a caller can only touch their own records, admin-only variants aside) is
//! outside this crate.
//!
//! Absence is not an error: history, stats, and profile lookups return
//! `Ok(None)` when the backend has no value for the caller.

/// HTTP transport implementation of the backend contract
pub mod http;

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::{
    Exercise, Principal, ProgressStats, UserProfile, UserRole, WorkoutEntry, WorkoutHistory,
    WorkoutPlan,
};

/// Lifecycle state of a backend connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendReadiness {
    /// Connection not established yet; calls fail with an uninitialized error
    Initializing,
    /// Ready to serve operations
    Ready,
}

impl BackendReadiness {
    /// Whether operations may be issued
    #[must_use]
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Remote-call surface of the fitness backend, one operation per use case.
///
/// Implementations provide transport only; they add no caching, dedup, or
/// idempotence beyond what the backend itself guarantees (calling
/// `add_exercise` twice creates two entries if the backend allows it).
#[async_trait]
pub trait FitnessBackend: Send + Sync {
    /// Current connection lifecycle state
    async fn readiness(&self) -> BackendReadiness;

    /// Create an exercise in the caller's library
    async fn add_exercise(
        &self,
        caller: &Principal,
        name: &str,
        muscle_group: &str,
        category: &str,
    ) -> AppResult<()>;

    /// Atomically record a workout with the given entries
    async fn log_workout(&self, caller: &Principal, entries: &[WorkoutEntry]) -> AppResult<()>;

    /// Create a named multi-day workout plan
    async fn create_workout_plan(
        &self,
        caller: &Principal,
        name: &str,
        days: u32,
        daily_workouts: &[Vec<WorkoutEntry>],
    ) -> AppResult<()>;

    /// Fetch the caller's exercise library
    async fn get_exercise_library(&self, caller: &Principal) -> AppResult<Vec<Exercise>>;

    /// Fetch the caller's workout history; `None` when nothing is recorded yet
    async fn get_workout_history(&self, caller: &Principal)
        -> AppResult<Option<WorkoutHistory>>;

    /// Fetch the caller's aggregated progress stats; `None` when absent
    async fn get_progress_stats(&self, caller: &Principal) -> AppResult<Option<ProgressStats>>;

    /// Fetch the caller's workout plans
    async fn get_workout_plans(&self, caller: &Principal) -> AppResult<Vec<WorkoutPlan>>;

    /// Fetch the caller's own profile; `None` until first saved
    async fn get_caller_user_profile(&self, caller: &Principal)
        -> AppResult<Option<UserProfile>>;

    /// Create or update the caller's profile
    async fn save_caller_user_profile(
        &self,
        caller: &Principal,
        profile: &UserProfile,
    ) -> AppResult<()>;

    /// Admin-only: fetch another identity's profile
    async fn get_user_profile(
        &self,
        caller: &Principal,
        target: &Principal,
    ) -> AppResult<Option<UserProfile>>;

    /// Fetch the caller's assigned role
    async fn get_caller_user_role(&self, caller: &Principal) -> AppResult<UserRole>;

    /// Admin-only: assign a role to an identity
    async fn assign_user_role(
        &self,
        caller: &Principal,
        target: &Principal,
        role: UserRole,
    ) -> AppResult<()>;

    /// Whether the caller holds the admin role
    async fn is_caller_admin(&self, caller: &Principal) -> AppResult<bool>;
}

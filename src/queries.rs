// ABOUTME: Cached query and mutation layer between the views and the backend
// ABOUTME: Gates reads on readiness+auth, substitutes defaults for absence, invalidates after mutations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Data-Fetch Layer
//!
//! [`QueryClient`] wraps every backend read in a cached query and every write
//! in a one-shot mutation with fixed invalidation rules:
//!
//! - `log_workout` invalidates history and stats
//! - `add_exercise` invalidates the exercise library
//! - `create_workout_plan` invalidates plans and stats
//!
//! A query is enabled only when the backend is ready AND the caller is
//! authenticated; disabled queries never execute and yield
//! [`QueryStatus::Disabled`] rather than an error. Absent history or stats is
//! substituted with the zero-valued default before caching. Invalidation marks
//! cached results stale so the next read re-fetches; nothing is optimistically
//! merged.
//!
//! The client owns the session's [`QueryCache`] and the [`AuthGate`]; logout
//! clears both so the next identity can never observe the previous identity's
//! cached data.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::auth::{AuthGate, AuthState};
use crate::backend::FitnessBackend;
use crate::cache::{QueryCache, QueryKey};
use crate::errors::{AppError, AppResult};
use crate::models::{
    Exercise, Principal, ProgressStats, UserProfile, UserRole, WorkoutEntry, WorkoutHistory,
    WorkoutPlan,
};

/// Result of a cached query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStatus<T> {
    /// Query did not run: backend initializing or caller unauthenticated.
    /// Render a "no data yet" state, not an error.
    Disabled,
    /// Query produced a value (from cache or a fresh fetch)
    Ready(T),
}

impl<T> QueryStatus<T> {
    /// Whether the query was gated off
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// The value, if the query ran
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Disabled => None,
            Self::Ready(value) => Some(value),
        }
    }
}

impl<T: Default> QueryStatus<T> {
    /// The value, or the zero-valued default when the query was gated off
    #[must_use]
    pub fn ready_or_default(self) -> T {
        self.into_option().unwrap_or_default()
    }
}

/// Session-scoped client composing the backend, the query cache, and the gate
pub struct QueryClient {
    backend: Arc<dyn FitnessBackend>,
    cache: QueryCache,
    gate: Arc<AuthGate>,
    session_id: Uuid,
}

impl QueryClient {
    /// Create a client for a new session with an empty cache
    pub fn new(backend: Arc<dyn FitnessBackend>, gate: Arc<AuthGate>) -> Self {
        let session_id = Uuid::new_v4();
        info!(%session_id, "client session created");
        Self {
            backend,
            cache: QueryCache::new(),
            gate,
            session_id,
        }
    }

    /// The auth gate driving this session
    #[must_use]
    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    /// The session cache (exposed for state inspection)
    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Session identifier used for log correlation
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Resolve the gate's initial state from the identity provider
    pub async fn resolve_auth(&self) -> AuthState {
        self.gate.resolve().await
    }

    /// Log in through the identity provider
    ///
    /// # Errors
    ///
    /// Returns the provider's failure unchanged
    pub async fn login(&self) -> AppResult<AuthState> {
        self.gate.login().await
    }

    /// Log out and flush every cached query result.
    ///
    /// The cache is scoped to the previous identity; flushing it here is what
    /// prevents cross-identity data leakage.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn logout(&self) -> AppResult<()> {
        self.gate.logout().await?;
        self.cache.clear_all().await;
        Ok(())
    }

    /// Caller principal when the query gate is open; `None` disables the query
    async fn query_caller(&self) -> Option<Principal> {
        if !self.backend.readiness().await.is_ready() {
            return None;
        }
        self.gate.principal().await
    }

    /// Caller principal for a direct user action.
    ///
    /// An unready backend fails with the uninitialized error, distinct from
    /// any remote rejection; a missing identity fails with auth-required.
    async fn action_caller(&self) -> AppResult<Principal> {
        if !self.backend.readiness().await.is_ready() {
            return Err(AppError::backend_uninitialized());
        }
        self.gate.principal().await.ok_or_else(AppError::auth_required)
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Cached workout history; absent server data becomes the empty default
    pub async fn workout_history(&self) -> AppResult<QueryStatus<WorkoutHistory>> {
        let Some(caller) = self.query_caller().await else {
            return Ok(QueryStatus::Disabled);
        };
        if let Some(cached) = self.cache.get(QueryKey::WorkoutHistory).await? {
            debug!(query = %QueryKey::WorkoutHistory, "served from cache");
            return Ok(QueryStatus::Ready(cached));
        }
        let fetched = self
            .backend
            .get_workout_history(&caller)
            .await?
            .unwrap_or_default();
        self.cache.set(QueryKey::WorkoutHistory, &fetched).await?;
        Ok(QueryStatus::Ready(fetched))
    }

    /// Cached exercise library
    pub async fn exercise_library(&self) -> AppResult<QueryStatus<Vec<Exercise>>> {
        let Some(caller) = self.query_caller().await else {
            return Ok(QueryStatus::Disabled);
        };
        if let Some(cached) = self.cache.get(QueryKey::ExerciseLibrary).await? {
            debug!(query = %QueryKey::ExerciseLibrary, "served from cache");
            return Ok(QueryStatus::Ready(cached));
        }
        let fetched = self.backend.get_exercise_library(&caller).await?;
        self.cache.set(QueryKey::ExerciseLibrary, &fetched).await?;
        Ok(QueryStatus::Ready(fetched))
    }

    /// Cached progress stats; absent server data becomes the zero default
    pub async fn progress_stats(&self) -> AppResult<QueryStatus<ProgressStats>> {
        let Some(caller) = self.query_caller().await else {
            return Ok(QueryStatus::Disabled);
        };
        if let Some(cached) = self.cache.get(QueryKey::ProgressStats).await? {
            debug!(query = %QueryKey::ProgressStats, "served from cache");
            return Ok(QueryStatus::Ready(cached));
        }
        let fetched = self
            .backend
            .get_progress_stats(&caller)
            .await?
            .unwrap_or_default();
        self.cache.set(QueryKey::ProgressStats, &fetched).await?;
        Ok(QueryStatus::Ready(fetched))
    }

    /// Cached workout plans
    pub async fn workout_plans(&self) -> AppResult<QueryStatus<Vec<WorkoutPlan>>> {
        let Some(caller) = self.query_caller().await else {
            return Ok(QueryStatus::Disabled);
        };
        if let Some(cached) = self.cache.get(QueryKey::WorkoutPlans).await? {
            debug!(query = %QueryKey::WorkoutPlans, "served from cache");
            return Ok(QueryStatus::Ready(cached));
        }
        let fetched = self.backend.get_workout_plans(&caller).await?;
        self.cache.set(QueryKey::WorkoutPlans, &fetched).await?;
        Ok(QueryStatus::Ready(fetched))
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Log a workout, then mark history and stats stale.
    ///
    /// An empty entry list is rejected locally before any remote call.
    #[instrument(skip(self, entries), fields(session_id = %self.session_id, entries = entries.len()))]
    pub async fn log_workout(&self, entries: Vec<WorkoutEntry>) -> AppResult<()> {
        if entries.is_empty() {
            return Err(AppError::local_validation(
                "Please add at least one exercise with sets",
            ));
        }
        let caller = self.action_caller().await?;
        self.backend.log_workout(&caller, &entries).await?;
        self.cache.invalidate(QueryKey::WorkoutHistory).await;
        self.cache.invalidate(QueryKey::ProgressStats).await;
        info!("workout logged");
        Ok(())
    }

    /// Add an exercise to the library, then mark the library stale.
    ///
    /// No duplicate check: whether the backend rejects or stores a duplicate
    /// name is its contract, not ours.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn add_exercise(
        &self,
        name: &str,
        muscle_group: &str,
        category: &str,
    ) -> AppResult<()> {
        let caller = self.action_caller().await?;
        self.backend
            .add_exercise(&caller, name, muscle_group, category)
            .await?;
        self.cache.invalidate(QueryKey::ExerciseLibrary).await;
        info!(exercise = name, "exercise added");
        Ok(())
    }

    /// Create a workout plan, then mark plans and stats stale.
    ///
    /// `daily_workouts.len() == days` is not validated here; backends may
    /// store inconsistent plans (see `WorkoutPlan::is_consistent`).
    #[instrument(skip(self, daily_workouts), fields(session_id = %self.session_id))]
    pub async fn create_workout_plan(
        &self,
        name: &str,
        days: u32,
        daily_workouts: Vec<Vec<WorkoutEntry>>,
    ) -> AppResult<()> {
        let caller = self.action_caller().await?;
        self.backend
            .create_workout_plan(&caller, name, days, &daily_workouts)
            .await?;
        self.cache.invalidate(QueryKey::WorkoutPlans).await;
        self.cache.invalidate(QueryKey::ProgressStats).await;
        info!(plan = name, days, "workout plan created");
        Ok(())
    }

    // ── Profile and role passthroughs (uncached) ────────────────────────

    /// Fetch the caller's profile; `None` until first saved
    pub async fn caller_profile(&self) -> AppResult<Option<UserProfile>> {
        let caller = self.action_caller().await?;
        self.backend.get_caller_user_profile(&caller).await
    }

    /// Create or update the caller's profile
    pub async fn save_profile(&self, profile: &UserProfile) -> AppResult<()> {
        let caller = self.action_caller().await?;
        self.backend.save_caller_user_profile(&caller, profile).await
    }

    /// Admin-only: fetch another identity's profile
    pub async fn user_profile(&self, target: &Principal) -> AppResult<Option<UserProfile>> {
        let caller = self.action_caller().await?;
        self.backend.get_user_profile(&caller, target).await
    }

    /// Fetch the caller's role
    pub async fn caller_role(&self) -> AppResult<UserRole> {
        let caller = self.action_caller().await?;
        self.backend.get_caller_user_role(&caller).await
    }

    /// Admin-only: assign a role to an identity
    pub async fn assign_role(&self, target: &Principal, role: UserRole) -> AppResult<()> {
        let caller = self.action_caller().await?;
        let result = self.backend.assign_user_role(&caller, target, role).await;
        if result.is_err() {
            warn!(target = %target, %role, "role assignment rejected");
        }
        result
    }

    /// Whether the caller holds the admin role
    pub async fn is_admin(&self) -> AppResult<bool> {
        let caller = self.action_caller().await?;
        self.backend.is_caller_admin(&caller).await
    }
}

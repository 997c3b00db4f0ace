// ABOUTME: Shared test doubles for the backend and identity provider seams
// ABOUTME: StubBackend records calls and scripts results; StaticIdentity scripts the gate states
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Test utilities for exercising the client without a live backend or identity
//! provider. Available to integration tests via the `testing` feature.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::auth::{Identity, IdentityProvider};
use crate::backend::{BackendReadiness, FitnessBackend};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{
    Exercise, Principal, ProgressStats, UserProfile, UserRole, Workout, WorkoutEntry,
    WorkoutHistory, WorkoutPlan,
};

/// In-memory [`FitnessBackend`] double.
///
/// Records every operation name so tests can assert exactly which remote calls
/// were issued (including that none were). Results are scripted through the
/// `with_*` builders; a single queued failure can be injected with
/// [`StubBackend::fail_next`].
pub struct StubBackend {
    ready: Mutex<bool>,
    calls: Mutex<Vec<String>>,
    fail_next: Mutex<Option<(ErrorCode, String)>>,
    exercises: Mutex<Vec<Exercise>>,
    history: Mutex<Option<WorkoutHistory>>,
    stats: Mutex<Option<ProgressStats>>,
    plans: Mutex<Vec<WorkoutPlan>>,
    profiles: Mutex<HashMap<Principal, UserProfile>>,
    roles: Mutex<HashMap<Principal, UserRole>>,
}

impl Default for StubBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StubBackend {
    /// A ready backend with no data
    #[must_use]
    pub fn new() -> Self {
        Self {
            ready: Mutex::new(true),
            calls: Mutex::new(Vec::new()),
            fail_next: Mutex::new(None),
            exercises: Mutex::new(Vec::new()),
            history: Mutex::new(None),
            stats: Mutex::new(None),
            plans: Mutex::new(Vec::new()),
            profiles: Mutex::new(HashMap::new()),
            roles: Mutex::new(HashMap::new()),
        }
    }

    /// A backend stuck in `Initializing`
    #[must_use]
    pub fn uninitialized() -> Self {
        let stub = Self::new();
        *stub.ready.lock().unwrap() = false;
        stub
    }

    /// Flip readiness at runtime
    pub fn set_ready(&self, ready: bool) {
        *self.ready.lock().unwrap() = ready;
    }

    /// Script the exercise library
    #[must_use]
    pub fn with_exercises(self, exercises: Vec<Exercise>) -> Self {
        *self.exercises.lock().unwrap() = exercises;
        self
    }

    /// Script the workout history
    #[must_use]
    pub fn with_history(self, history: WorkoutHistory) -> Self {
        *self.history.lock().unwrap() = Some(history);
        self
    }

    /// Script the progress stats
    #[must_use]
    pub fn with_stats(self, stats: ProgressStats) -> Self {
        *self.stats.lock().unwrap() = Some(stats);
        self
    }

    /// Script the workout plans
    #[must_use]
    pub fn with_plans(self, plans: Vec<WorkoutPlan>) -> Self {
        *self.plans.lock().unwrap() = plans;
        self
    }

    /// Script a stored role for a principal
    #[must_use]
    pub fn with_role(self, principal: Principal, role: UserRole) -> Self {
        self.roles.lock().unwrap().insert(principal, role);
        self
    }

    /// Queue a failure for the next operation
    pub fn fail_next(&self, code: ErrorCode, message: impl Into<String>) {
        *self.fail_next.lock().unwrap() = Some((code, message.into()));
    }

    /// Operation names recorded so far, in call order
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls recorded for one operation
    #[must_use]
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| *c == operation)
            .count()
    }

    fn record(&self, operation: &str) -> AppResult<()> {
        self.calls.lock().unwrap().push(operation.to_owned());
        if let Some((code, message)) = self.fail_next.lock().unwrap().take() {
            return Err(AppError::new(code, message));
        }
        Ok(())
    }
}

#[async_trait]
impl FitnessBackend for StubBackend {
    async fn readiness(&self) -> BackendReadiness {
        if *self.ready.lock().unwrap() {
            BackendReadiness::Ready
        } else {
            BackendReadiness::Initializing
        }
    }

    async fn add_exercise(
        &self,
        _caller: &Principal,
        name: &str,
        muscle_group: &str,
        category: &str,
    ) -> AppResult<()> {
        self.record("addExercise")?;
        // No dedup: a second call with the same name creates a second entry
        self.exercises
            .lock()
            .unwrap()
            .push(Exercise::new(name, muscle_group, category));
        Ok(())
    }

    async fn log_workout(&self, _caller: &Principal, entries: &[WorkoutEntry]) -> AppResult<()> {
        self.record("logWorkout")?;
        let workout = Workout {
            entries: entries.to_vec(),
            timestamp: Utc::now(),
        };
        let mut history = self.history.lock().unwrap();
        let history = history.get_or_insert_with(WorkoutHistory::default);
        history.total_volume += workout.volume();
        history.workouts.push(workout);
        Ok(())
    }

    async fn create_workout_plan(
        &self,
        _caller: &Principal,
        name: &str,
        days: u32,
        daily_workouts: &[Vec<WorkoutEntry>],
    ) -> AppResult<()> {
        self.record("createWorkoutPlan")?;
        self.plans.lock().unwrap().push(WorkoutPlan {
            name: name.to_owned(),
            days,
            daily_workouts: daily_workouts.to_vec(),
        });
        Ok(())
    }

    async fn get_exercise_library(&self, _caller: &Principal) -> AppResult<Vec<Exercise>> {
        self.record("getExerciseLibrary")?;
        Ok(self.exercises.lock().unwrap().clone())
    }

    async fn get_workout_history(
        &self,
        _caller: &Principal,
    ) -> AppResult<Option<WorkoutHistory>> {
        self.record("getWorkoutHistory")?;
        Ok(self.history.lock().unwrap().clone())
    }

    async fn get_progress_stats(&self, _caller: &Principal) -> AppResult<Option<ProgressStats>> {
        self.record("getProgressStats")?;
        Ok(*self.stats.lock().unwrap())
    }

    async fn get_workout_plans(&self, _caller: &Principal) -> AppResult<Vec<WorkoutPlan>> {
        self.record("getWorkoutPlans")?;
        Ok(self.plans.lock().unwrap().clone())
    }

    async fn get_caller_user_profile(
        &self,
        caller: &Principal,
    ) -> AppResult<Option<UserProfile>> {
        self.record("getCallerUserProfile")?;
        Ok(self.profiles.lock().unwrap().get(caller).cloned())
    }

    async fn save_caller_user_profile(
        &self,
        caller: &Principal,
        profile: &UserProfile,
    ) -> AppResult<()> {
        self.record("saveCallerUserProfile")?;
        self.profiles
            .lock()
            .unwrap()
            .insert(caller.clone(), profile.clone());
        Ok(())
    }

    async fn get_user_profile(
        &self,
        caller: &Principal,
        target: &Principal,
    ) -> AppResult<Option<UserProfile>> {
        self.record("getUserProfile")?;
        let is_admin = self
            .roles
            .lock()
            .unwrap()
            .get(caller)
            .is_some_and(|r| *r == UserRole::Admin);
        if !is_admin {
            return Err(AppError::permission_denied(
                "Profile lookup requires the admin role",
            ));
        }
        Ok(self.profiles.lock().unwrap().get(target).cloned())
    }

    async fn get_caller_user_role(&self, caller: &Principal) -> AppResult<UserRole> {
        self.record("getCallerUserRole")?;
        Ok(self
            .roles
            .lock()
            .unwrap()
            .get(caller)
            .copied()
            .unwrap_or(UserRole::User))
    }

    async fn assign_user_role(
        &self,
        caller: &Principal,
        target: &Principal,
        role: UserRole,
    ) -> AppResult<()> {
        self.record("assignUserRole")?;
        let is_admin = self
            .roles
            .lock()
            .unwrap()
            .get(caller)
            .is_some_and(|r| *r == UserRole::Admin);
        if !is_admin {
            return Err(AppError::permission_denied(
                "Role assignment requires the admin role",
            ));
        }
        self.roles.lock().unwrap().insert(target.clone(), role);
        Ok(())
    }

    async fn is_caller_admin(&self, caller: &Principal) -> AppResult<bool> {
        self.record("isCallerAdmin")?;
        Ok(self
            .roles
            .lock()
            .unwrap()
            .get(caller)
            .is_some_and(|r| *r == UserRole::Admin))
    }
}

/// Scriptable [`IdentityProvider`] double
pub struct StaticIdentity {
    held: Mutex<Option<Identity>>,
    login_result: Option<Principal>,
}

impl StaticIdentity {
    /// Provider that logs in as the given principal
    #[must_use]
    pub fn new(principal: &str) -> Self {
        Self {
            held: Mutex::new(None),
            login_result: Some(Principal::new(principal)),
        }
    }

    /// Provider already holding the given identity before `resolve`
    #[must_use]
    pub fn pre_authenticated(principal: &str) -> Self {
        let identity = Identity::new(Principal::new(principal));
        Self {
            held: Mutex::new(Some(identity)),
            login_result: Some(Principal::new(principal)),
        }
    }

    /// Provider with no identity and no way to log in
    #[must_use]
    pub fn logged_out() -> Self {
        Self {
            held: Mutex::new(None),
            login_result: None,
        }
    }

    /// Provider that only ever yields the anonymous identity
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            held: Mutex::new(Some(Identity::new(Principal::anonymous()))),
            login_result: Some(Principal::anonymous()),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn login(&self) -> AppResult<Identity> {
        match &self.login_result {
            Some(principal) => {
                let identity = Identity::new(principal.clone());
                *self.held.lock().unwrap() = Some(identity.clone());
                Ok(identity)
            }
            None => Err(AppError::auth_required()),
        }
    }

    async fn clear(&self) -> AppResult<()> {
        *self.held.lock().unwrap() = None;
        Ok(())
    }

    async fn current(&self) -> Option<Identity> {
        self.held.lock().unwrap().clone()
    }
}

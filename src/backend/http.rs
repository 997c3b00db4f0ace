// ABOUTME: HTTP/JSON transport implementation of the FitnessBackend trait
// ABOUTME: Maps 404/null responses to absence and non-2xx statuses to typed rejections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! HTTP/JSON backend client.
//!
//! One REST endpoint per backend operation. The caller principal travels in a
//! request header; the backend is responsible for verifying it and scoping
//! records server-side. Two response conventions matter here:
//!
//! - Absence is not an error: a `404` status or a JSON `null` body on history,
//!   stats, and profile lookups becomes `Ok(None)`.
//! - Rejections are typed: `401` maps to an auth-required error, `403` to
//!   permission-denied, any other non-2xx to a remote rejection carrying the
//!   response body.
//!
//! No request timeout is configured: a stalled call stays pending indefinitely
//! and no operation is cancellable once issued.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, instrument};
use url::Url;

use super::{BackendReadiness, FitnessBackend};
use crate::errors::{AppError, AppResult};
use crate::models::{
    Exercise, Principal, ProgressStats, UserProfile, UserRole, WorkoutEntry, WorkoutHistory,
    WorkoutPlan,
};

/// Header carrying the explicit caller principal
const CALLER_HEADER: &str = "x-fittrack-principal";

/// HTTP backend client configuration
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Base URL of the fitness backend (e.g., <http://localhost:8081>)
    pub base_url: Url,
}

/// HTTP implementation of [`FitnessBackend`].
///
/// Starts in the `Initializing` state; [`HttpBackend::connect`] probes the
/// backend health endpoint and flips the client to `Ready`. All operations
/// issued before that fail immediately with an uninitialized-backend error,
/// distinct from any remote rejection.
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    ready: AtomicBool,
}

impl HttpBackend {
    /// Create a client in the `Initializing` state
    ///
    /// # Errors
    ///
    /// Returns a config error if the underlying HTTP client cannot be built
    pub fn new(config: HttpBackendConfig) -> AppResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url,
            ready: AtomicBool::new(false),
        })
    }

    /// Probe the backend health endpoint and mark the client ready
    ///
    /// # Errors
    ///
    /// Returns a transport error if the probe cannot reach the backend, or a
    /// remote rejection if the backend answers unhealthy
    #[instrument(skip(self))]
    pub async fn connect(&self) -> AppResult<()> {
        let url = self.endpoint("health")?;
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::remote_rejected(format!(
                "Health probe failed with status {}",
                response.status()
            )));
        }
        self.ready.store(true, Ordering::SeqCst);
        info!(backend = %self.base_url, "backend connection established");
        Ok(())
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::internal(format!("Invalid endpoint path '{path}': {e}")))
    }

    fn ensure_ready(&self) -> AppResult<()> {
        if self.ready.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::backend_uninitialized())
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, caller: &Principal, path: &str) -> AppResult<T> {
        self.ensure_ready()?;
        let url = self.endpoint(path)?;
        debug!(%url, operation = path, "backend read");
        let response = self
            .client
            .get(url)
            .header(CALLER_HEADER, caller.as_str())
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Read where the backend may legitimately hold no value
    async fn get_json_or_absent<T: DeserializeOwned>(
        &self,
        caller: &Principal,
        path: &str,
    ) -> AppResult<Option<T>> {
        self.ensure_ready()?;
        let url = self.endpoint(path)?;
        debug!(%url, operation = path, "backend read (absence allowed)");
        let response = self
            .client
            .get(url)
            .header(CALLER_HEADER, caller.as_str())
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response).await?;
        // A null body is the other accepted absence encoding
        Ok(response.json::<Option<T>>().await?)
    }

    async fn send_json<B: Serialize + Sync>(
        &self,
        caller: &Principal,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> AppResult<()> {
        self.ensure_ready()?;
        let url = self.endpoint(path)?;
        debug!(%url, operation = path, "backend write");
        let response = self
            .client
            .request(method, url)
            .header(CALLER_HEADER, caller.as_str())
            .json(body)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Map a non-success response to the client error taxonomy
async fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(map_rejection(status, &body))
}

fn map_rejection(status: StatusCode, body: &str) -> AppError {
    let detail = if body.is_empty() {
        format!("status {status}")
    } else {
        format!("status {status}: {body}")
    };
    match status {
        StatusCode::UNAUTHORIZED => AppError::auth_required(),
        StatusCode::FORBIDDEN => AppError::permission_denied(detail),
        _ => AppError::remote_rejected(detail),
    }
}

#[derive(Debug, serde::Deserialize)]
struct RoleResponse {
    role: UserRole,
}

#[async_trait]
impl FitnessBackend for HttpBackend {
    async fn readiness(&self) -> BackendReadiness {
        if self.ready.load(Ordering::SeqCst) {
            BackendReadiness::Ready
        } else {
            BackendReadiness::Initializing
        }
    }

    async fn add_exercise(
        &self,
        caller: &Principal,
        name: &str,
        muscle_group: &str,
        category: &str,
    ) -> AppResult<()> {
        let body = json!({
            "name": name,
            "muscleGroup": muscle_group,
            "category": category,
        });
        self.send_json(caller, reqwest::Method::POST, "api/exercises", &body)
            .await
    }

    async fn log_workout(&self, caller: &Principal, entries: &[WorkoutEntry]) -> AppResult<()> {
        let body = json!({ "entries": entries });
        self.send_json(caller, reqwest::Method::POST, "api/workouts", &body)
            .await
    }

    async fn create_workout_plan(
        &self,
        caller: &Principal,
        name: &str,
        days: u32,
        daily_workouts: &[Vec<WorkoutEntry>],
    ) -> AppResult<()> {
        let body = json!({
            "name": name,
            "days": days,
            "dailyWorkouts": daily_workouts,
        });
        self.send_json(caller, reqwest::Method::POST, "api/plans", &body)
            .await
    }

    async fn get_exercise_library(&self, caller: &Principal) -> AppResult<Vec<Exercise>> {
        self.get_json(caller, "api/exercises").await
    }

    async fn get_workout_history(
        &self,
        caller: &Principal,
    ) -> AppResult<Option<WorkoutHistory>> {
        self.get_json_or_absent(caller, "api/workouts/history").await
    }

    async fn get_progress_stats(&self, caller: &Principal) -> AppResult<Option<ProgressStats>> {
        self.get_json_or_absent(caller, "api/stats").await
    }

    async fn get_workout_plans(&self, caller: &Principal) -> AppResult<Vec<WorkoutPlan>> {
        self.get_json(caller, "api/plans").await
    }

    async fn get_caller_user_profile(
        &self,
        caller: &Principal,
    ) -> AppResult<Option<UserProfile>> {
        self.get_json_or_absent(caller, "api/profile").await
    }

    async fn save_caller_user_profile(
        &self,
        caller: &Principal,
        profile: &UserProfile,
    ) -> AppResult<()> {
        self.send_json(caller, reqwest::Method::PUT, "api/profile", profile)
            .await
    }

    async fn get_user_profile(
        &self,
        caller: &Principal,
        target: &Principal,
    ) -> AppResult<Option<UserProfile>> {
        let path = format!("api/profiles/{}", target.as_str());
        self.get_json_or_absent(caller, &path).await
    }

    async fn get_caller_user_role(&self, caller: &Principal) -> AppResult<UserRole> {
        let response: RoleResponse = self.get_json(caller, "api/role").await?;
        Ok(response.role)
    }

    async fn assign_user_role(
        &self,
        caller: &Principal,
        target: &Principal,
        role: UserRole,
    ) -> AppResult<()> {
        let body = json!({
            "principal": target,
            "role": role,
        });
        self.send_json(caller, reqwest::Method::POST, "api/roles", &body)
            .await
    }

    async fn is_caller_admin(&self, caller: &Principal) -> AppResult<bool> {
        self.get_json(caller, "api/is-admin").await
    }
}

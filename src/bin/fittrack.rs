// ABOUTME: FitTrack CLI - command-line front end over the client core library
// ABOUTME: Logs workouts, browses the exercise library, and shows progress stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
//!
//! Usage:
//! ```bash
//! # Show aggregated progress stats
//! fittrack stats
//!
//! # Show workout history, newest first
//! fittrack history
//!
//! # Browse the exercise library, filtered
//! fittrack library --search press --group Chest
//!
//! # Log a workout: exercise then reps x weight per set
//! fittrack log --exercise "Bench Press" --set 10x135 --set 8x145
//!
//! # Add an exercise to the library
//! fittrack add-exercise --name "Zercher Squat" --group Legs --category Gym
//! ```
//!
//! The backend URL and the login principal come from `FITTRACK_BACKEND_URL`
//! and `FITTRACK_PRINCIPAL` (see `config`).

use std::sync::Arc;

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tracing::debug;

use fittrack_client::auth::{AuthGate, Identity, IdentityProvider};
use fittrack_client::backend::http::{HttpBackend, HttpBackendConfig};
use fittrack_client::config::ClientConfig;
use fittrack_client::errors::{AppError, AppResult};
use fittrack_client::library::{self, LibraryFilter};
use fittrack_client::logbook::{DraftEdit, WorkoutDraft};
use fittrack_client::logging::LoggingConfig;
use fittrack_client::models::Principal;
use fittrack_client::queries::QueryClient;

#[derive(Parser)]
#[command(
    name = "fittrack",
    about = "FitTrack fitness tracking CLI",
    long_about = "Command-line front end for logging workouts, browsing exercises, and tracking progress against a FitTrack backend."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Show aggregated progress stats
    Stats,
    /// Show workout history, newest first
    History,
    /// Browse the exercise library
    Library {
        /// Case-insensitive name substring filter
        #[arg(long, default_value = "")]
        search: String,
        /// Muscle group filter
        #[arg(long)]
        group: Option<String>,
    },
    /// List workout plans
    Plans,
    /// Log a workout for one exercise
    Log {
        /// Exercise name
        #[arg(long)]
        exercise: String,
        /// Sets as REPSxWEIGHT (repeatable), e.g. --set 10x135
        #[arg(long = "set", required = true)]
        sets: Vec<String>,
    },
    /// Add an exercise to the library
    AddExercise {
        /// Exercise name
        #[arg(long)]
        name: String,
        /// Muscle group
        #[arg(long)]
        group: String,
        /// Category
        #[arg(long, default_value = "Gym")]
        category: String,
    },
    /// Show the logged-in principal and role
    Whoami,
}

/// Identity provider backed by a pre-issued principal from the environment.
///
/// Identity issuance itself stays external; this provider only hands the
/// configured principal to the gate. Without one, login fails and every
/// protected view stays locked.
struct EnvIdentity {
    principal: Option<Principal>,
}

#[async_trait]
impl IdentityProvider for EnvIdentity {
    async fn login(&self) -> AppResult<Identity> {
        self.principal
            .clone()
            .map(Identity::new)
            .ok_or_else(AppError::auth_required)
    }

    async fn clear(&self) -> AppResult<()> {
        Ok(())
    }

    async fn current(&self) -> Option<Identity> {
        self.principal.clone().map(Identity::new)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    LoggingConfig::from_env().init()?;
    let cli = Cli::parse();

    let config = ClientConfig::from_env()?;
    let backend = Arc::new(HttpBackend::new(HttpBackendConfig {
        base_url: config.backend_url.clone(),
    })?);
    backend.connect().await?;

    let provider = Arc::new(EnvIdentity {
        principal: config.principal.clone().map(Principal::new),
    });
    let gate = Arc::new(AuthGate::new(provider));
    let client = QueryClient::new(backend, gate);

    let state = client.resolve_auth().await;
    if !state.is_authenticated() {
        let state = client.login().await.map_err(|e| {
            anyhow::anyhow!("Login failed (set FITTRACK_PRINCIPAL to a valid principal): {e}")
        })?;
        debug!(authenticated = state.is_authenticated(), "login attempted");
    }

    run(&cli.command, &client).await?;
    Ok(())
}

async fn run(command: &Command, client: &QueryClient) -> AppResult<()> {
    match command {
        Command::Stats => {
            let stats = client.progress_stats().await?.ready_or_default();
            println!("Total workouts: {}", stats.total_workouts);
            println!("Workout plans:  {}", stats.total_plans);
            println!("Total volume:   {:.0} lbs", stats.total_volume);
        }
        Command::History => {
            let history = client.workout_history().await?.ready_or_default();
            if history.workouts.is_empty() {
                println!("No workouts yet");
                return Ok(());
            }
            println!("Total volume lifted: {:.0} lbs", history.total_volume);
            for workout in history.sorted_newest_first() {
                // Per-workout volume is always recomputed client-side
                println!(
                    "\n{}  ({:.0} lbs)",
                    workout.timestamp.format("%A, %B %-d %-I:%M %p"),
                    workout.volume()
                );
                for entry in &workout.entries {
                    let sets: Vec<String> = entry
                        .sets
                        .iter()
                        .map(|s| format!("{} x {} lbs", s.reps, s.weight))
                        .collect();
                    println!(
                        "  {} [{}]: {}",
                        entry.exercise.name,
                        entry.exercise.muscle_group,
                        sets.join(", ")
                    );
                }
            }
        }
        Command::Library { search, group } => {
            let server_library = client.exercise_library().await?.ready_or_default();
            let fallback = library::default_catalog();
            let exercises = library::displayable(&server_library, &fallback);

            let mut filter = LibraryFilter::new();
            filter.set_search(search.clone());
            if let Some(group) = group {
                filter.toggle_group(group);
            }

            let filtered = filter.apply(exercises);
            if filtered.is_empty() {
                println!("No exercises found");
                return Ok(());
            }
            for (group, members) in library::group_by_muscle_group(&filtered) {
                println!("{group}:");
                for exercise in members {
                    println!("  {} ({})", exercise.name, exercise.category);
                }
            }
        }
        Command::Plans => {
            let plans = client.workout_plans().await?.ready_or_default();
            if plans.is_empty() {
                println!("No workout plans yet");
            }
            for plan in plans {
                let marker = if plan.is_consistent() { "" } else { " (!)" };
                println!("{} - {} days{}", plan.name, plan.days, marker);
            }
        }
        Command::Log { exercise, sets } => {
            let server_library = client.exercise_library().await?.ready_or_default();
            let mut draft = WorkoutDraft::new();
            draft.apply(
                DraftEdit::SetExerciseName {
                    exercise: 0,
                    name: exercise.clone(),
                },
                &server_library,
            );
            for (index, set) in sets.iter().enumerate() {
                let (reps, weight) = set.split_once('x').ok_or_else(|| {
                    AppError::local_validation(format!(
                        "Set '{set}' is not in REPSxWEIGHT form (e.g. 10x135)"
                    ))
                })?;
                if index > 0 {
                    draft.apply(DraftEdit::AddSet { exercise: 0 }, &[]);
                }
                draft.apply(
                    DraftEdit::SetReps {
                        exercise: 0,
                        set: index,
                        reps: reps.to_owned(),
                    },
                    &[],
                );
                draft.apply(
                    DraftEdit::SetWeight {
                        exercise: 0,
                        set: index,
                        weight: weight.to_owned(),
                    },
                    &[],
                );
            }
            let entries = draft.build_entries()?;
            let volume: f64 = entries.iter().map(|e| e.volume()).sum();
            client.log_workout(entries).await?;
            println!("Workout logged ({volume:.0} lbs)");
        }
        Command::AddExercise {
            name,
            group,
            category,
        } => {
            client.add_exercise(name, group, category).await?;
            println!("Exercise '{name}' added");
        }
        Command::Whoami => {
            let principal = client
                .gate()
                .principal()
                .await
                .ok_or_else(AppError::auth_required)?;
            let role = client.caller_role().await?;
            println!("{principal} ({role})");
        }
    }
    Ok(())
}

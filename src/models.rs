// ABOUTME: Core data models for the FitTrack client
// ABOUTME: Defines Exercise, Workout, WorkoutPlan, ProgressStats and related record shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Data Models
//!
//! Record shapes exchanged between the client and the fitness backend.
//!
//! ## Design Principles
//!
//! - **Serializable**: every model round-trips through JSON for the backend wire
//! - **Immutable records**: workouts and exercises are created once and never
//!   edited; derived views ([`ProgressStats`], [`WorkoutHistory`]) are recomputed
//!   server-side and substituted with zero-valued defaults when absent
//! - **Explicit ownership**: per-user records are scoped by a [`Principal`]
//!   passed explicitly through the access layer, never by ambient state
//!
//! Volume aggregation (reps × weight summed across sets and entries) lives here
//! with the records it derives from.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Stable textual identifier for a caller identity.
///
/// The identity provider issues these; the client only compares and forwards
/// them. The anonymous principal is a distinguished placeholder identity and is
/// treated as unauthenticated everywhere, same as having no identity at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

/// Textual form of the anonymous principal issued by the identity provider
const ANONYMOUS_PRINCIPAL: &str = "2vxsx-fae";

impl Principal {
    /// Wrap a principal identifier issued by the identity provider
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The anonymous placeholder principal
    #[must_use]
    pub fn anonymous() -> Self {
        Self(ANONYMOUS_PRINCIPAL.to_owned())
    }

    /// Whether this is the anonymous placeholder identity
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.0 == ANONYMOUS_PRINCIPAL
    }

    /// Principal text as issued by the identity provider
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Principal {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// A single exercise definition in the library.
///
/// Identity is the name: lookups and form autocompletion match on it exactly.
/// Created once via `add_exercise` and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name, the natural key (e.g., "Bench Press")
    pub name: String,
    /// Category (e.g., "Gym", "Bodyweight", "Home")
    pub category: String,
    /// Primary muscle group (e.g., "Chest", "Back")
    #[serde(rename = "muscleGroup")]
    pub muscle_group: String,
}

impl Exercise {
    /// Create an exercise record
    pub fn new(
        name: impl Into<String>,
        muscle_group: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            muscle_group: muscle_group.into(),
        }
    }
}

/// One performed set: repetitions at a given weight.
///
/// Owned exclusively by a [`WorkoutEntry`]; has no independent lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    /// Repetition count
    pub reps: u32,
    /// Weight lifted (pounds); zero for bodyweight movements
    pub weight: f64,
}

impl WorkoutSet {
    /// Volume contribution of this set: reps × weight
    #[must_use]
    pub fn volume(&self) -> f64 {
        f64::from(self.reps) * self.weight
    }
}

/// One exercise's performance within a single workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    /// Snapshot of the exercise at logging time
    pub exercise: Exercise,
    /// Performed sets, in display order
    pub sets: Vec<WorkoutSet>,
}

impl WorkoutEntry {
    /// Total volume across this entry's sets; zero for an empty set list
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.sets.iter().map(WorkoutSet::volume).sum()
    }
}

/// A logged workout session.
///
/// Created atomically by `log_workout` and immutable afterwards. The timestamp
/// carries nanosecond precision as assigned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Entries in display order
    pub entries: Vec<WorkoutEntry>,
    /// Logging instant, nanosecond precision
    pub timestamp: DateTime<Utc>,
}

impl Workout {
    /// Total volume of the workout: sum of entry volumes.
    ///
    /// Always recomputed client-side for per-workout display, regardless of any
    /// server-supplied aggregate.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.entries.iter().map(WorkoutEntry::volume).sum()
    }
}

/// A named multi-day workout plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    /// Plan name
    pub name: String,
    /// Number of days the plan covers
    pub days: u32,
    /// Planned entries per day
    #[serde(rename = "dailyWorkouts")]
    pub daily_workouts: Vec<Vec<WorkoutEntry>>,
}

impl WorkoutPlan {
    /// Whether `daily_workouts` length matches the declared day count.
    ///
    /// The client does not enforce this invariant anywhere; backends may store
    /// inconsistent plans. Display layers can use this to flag them.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.daily_workouts.len() == self.days as usize
    }
}

/// Aggregated progress counters, computed server-side.
///
/// Absent stats (unauthenticated, or no data yet) must be rendered as the
/// zero-valued default, never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProgressStats {
    /// Count of logged workouts
    #[serde(rename = "totalWorkouts")]
    pub total_workouts: u64,
    /// Count of created plans
    #[serde(rename = "totalPlans")]
    pub total_plans: u64,
    /// Total volume lifted across all workouts
    #[serde(rename = "totalVolume")]
    pub total_volume: f64,
}

/// Server-computed history view: all workouts plus a precomputed volume total.
///
/// The headline total is trusted as-is; per-workout volumes are recomputed
/// client-side via [`Workout::volume`]. Absent history defaults to empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkoutHistory {
    /// All workouts for the caller, unordered
    pub workouts: Vec<Workout>,
    /// Precomputed total volume across history
    #[serde(rename = "totalVolume")]
    pub total_volume: f64,
}

impl WorkoutHistory {
    /// Workouts sorted newest first, for display
    #[must_use]
    pub fn sorted_newest_first(&self) -> Vec<Workout> {
        let mut sorted = self.workouts.clone();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sorted
    }
}

/// Per-caller profile, created and updated through an explicit save operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name
    pub name: String,
    /// Contact email, if provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Free-text fitness goal, if provided
    #[serde(rename = "fitnessGoal", skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<String>,
}

/// Role assigned to a caller identity, set by a privileged caller only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full administrative access, including role assignment and profile lookup
    Admin,
    /// Standard authenticated user
    User,
    /// Restricted guest access
    Guest,
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
            Self::Guest => write!(f, "guest"),
        }
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "guest" => Ok(Self::Guest),
            other => Err(AppError::local_validation(format!(
                "Unknown user role: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, sets: Vec<WorkoutSet>) -> WorkoutEntry {
        WorkoutEntry {
            exercise: Exercise::new(name, "Chest", "Gym"),
            sets,
        }
    }

    #[test]
    fn test_set_volume() {
        let set = WorkoutSet {
            reps: 10,
            weight: 135.0,
        };
        assert!((set.volume() - 1350.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_workout_volume_sums_entries_and_sets() {
        let workout = Workout {
            entries: vec![entry(
                "Bench Press",
                vec![
                    WorkoutSet {
                        reps: 10,
                        weight: 135.0,
                    },
                    WorkoutSet {
                        reps: 8,
                        weight: 145.0,
                    },
                ],
            )],
            timestamp: Utc::now(),
        };
        assert!((workout.volume() - 2510.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_sequences_have_zero_volume() {
        let workout = Workout {
            entries: vec![],
            timestamp: Utc::now(),
        };
        assert!((workout.volume() - 0.0).abs() < f64::EPSILON);
        assert!((entry("Planks", vec![]).volume() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_reps_or_weight_contribute_nothing() {
        let workout = Workout {
            entries: vec![entry(
                "Push-ups",
                vec![
                    WorkoutSet {
                        reps: 0,
                        weight: 100.0,
                    },
                    WorkoutSet {
                        reps: 20,
                        weight: 0.0,
                    },
                ],
            )],
            timestamp: Utc::now(),
        };
        assert!((workout.volume() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_anonymous_principal_is_unauthenticated_placeholder() {
        assert!(Principal::anonymous().is_anonymous());
        assert!(!Principal::new("w3gef-eqllq-aaaaa").is_anonymous());
    }

    #[test]
    fn test_plan_consistency_not_enforced_only_reported() {
        let plan = WorkoutPlan {
            name: "Push Pull Legs".into(),
            days: 3,
            daily_workouts: vec![vec![], vec![]],
        };
        assert!(!plan.is_consistent());
    }

    #[test]
    fn test_history_sorted_newest_first() {
        let older = Workout {
            entries: vec![],
            timestamp: Utc::now() - chrono::Duration::hours(2),
        };
        let newer = Workout {
            entries: vec![],
            timestamp: Utc::now(),
        };
        let history = WorkoutHistory {
            workouts: vec![older.clone(), newer.clone()],
            total_volume: 0.0,
        };
        let sorted = history.sorted_newest_first();
        assert_eq!(sorted[0].timestamp, newer.timestamp);
        assert_eq!(sorted[1].timestamp, older.timestamp);
    }

    #[test]
    fn test_user_role_round_trip() {
        for role in [UserRole::Admin, UserRole::User, UserRole::Guest] {
            let parsed: UserRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_stats_default_is_zero_valued() {
        let stats = ProgressStats::default();
        assert_eq!(stats.total_workouts, 0);
        assert_eq!(stats.total_plans, 0);
        assert!((stats.total_volume - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_exercise_serde_uses_backend_field_names() {
        let json = serde_json::to_string(&Exercise::new("Squats", "Legs", "Gym")).unwrap();
        assert!(json.contains("muscleGroup"));
    }
}

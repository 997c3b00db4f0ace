// ABOUTME: In-memory workout logging form state with tagged edit actions
// ABOUTME: Filters and parses free-text rows into WorkoutEntry values at submit time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Workout Draft
//!
//! The logging form keeps an editable ordered list of exercise rows, each with
//! ordered set rows whose reps and weight are free-text input. All edits go
//! through the [`DraftEdit`] enum so every possible field update is a named,
//! exhaustively matched variant instead of an update-by-field-name string.
//!
//! Submission filters before it parses: exercise rows with no name or with no
//! complete set are dropped, incomplete sets inside kept rows are dropped, and
//! only then is the remaining text parsed (non-numeric reps or weight become
//! zero). An empty result is a local validation failure and never reaches the
//! backend.

use crate::errors::{AppError, AppResult};
use crate::models::{Exercise, WorkoutEntry, WorkoutSet};

/// Muscle group substituted when a kept row has none
const FALLBACK_MUSCLE_GROUP: &str = "Other";
/// Category substituted when a kept row has none
const FALLBACK_CATEGORY: &str = "Gym";

/// One editable set row (free-text input)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetDraft {
    /// Repetition count as typed
    pub reps: String,
    /// Weight as typed
    pub weight: String,
}

impl SetDraft {
    /// A set is complete when both fields hold something
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.reps.trim().is_empty() && !self.weight.trim().is_empty()
    }

    fn parse(&self) -> WorkoutSet {
        WorkoutSet {
            reps: self.reps.trim().parse().unwrap_or(0),
            weight: self.weight.trim().parse().unwrap_or(0.0),
        }
    }
}

/// One editable exercise row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDraft {
    /// Exercise name as typed
    pub name: String,
    /// Muscle group, autofilled on a library match or typed
    pub muscle_group: String,
    /// Category, defaults to "Gym"
    pub category: String,
    /// Set rows in display order
    pub sets: Vec<SetDraft>,
}

impl Default for ExerciseDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            muscle_group: String::new(),
            category: FALLBACK_CATEGORY.to_owned(),
            sets: vec![SetDraft::default()],
        }
    }
}

impl ExerciseDraft {
    fn has_complete_set(&self) -> bool {
        self.sets.iter().any(SetDraft::is_complete)
    }
}

/// Every edit the logging form can apply, as a discriminated action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    /// Append a blank exercise row
    AddExercise,
    /// Remove the exercise row at `index`
    RemoveExercise {
        index: usize,
    },
    /// Append a blank set row to the exercise at `exercise`
    AddSet {
        exercise: usize,
    },
    /// Remove one set row
    RemoveSet {
        exercise: usize,
        set: usize,
    },
    /// Update the exercise name; an exact library match autofills group and category
    SetExerciseName {
        exercise: usize,
        name: String,
    },
    SetMuscleGroup {
        exercise: usize,
        muscle_group: String,
    },
    SetCategory {
        exercise: usize,
        category: String,
    },
    SetReps {
        exercise: usize,
        set: usize,
        reps: String,
    },
    SetWeight {
        exercise: usize,
        set: usize,
        weight: String,
    },
}

/// Editable state behind the workout logging form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutDraft {
    exercises: Vec<ExerciseDraft>,
}

impl Default for WorkoutDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutDraft {
    /// A fresh draft: one blank exercise row with one blank set row
    #[must_use]
    pub fn new() -> Self {
        Self {
            exercises: vec![ExerciseDraft::default()],
        }
    }

    /// Current exercise rows, in display order
    #[must_use]
    pub fn exercises(&self) -> &[ExerciseDraft] {
        &self.exercises
    }

    /// Whether the UI should offer row removal (only while more than one
    /// row remains; the underlying list itself may still be emptied)
    #[must_use]
    pub fn can_remove_exercise(&self) -> bool {
        self.exercises.len() > 1
    }

    /// Apply one edit. Out-of-range indices are ignored.
    ///
    /// `library` feeds name autofill: the first exact name match supplies the
    /// muscle group and category. No fuzzy matching.
    pub fn apply(&mut self, edit: DraftEdit, library: &[Exercise]) {
        match edit {
            DraftEdit::AddExercise => {
                self.exercises.push(ExerciseDraft::default());
            }
            DraftEdit::RemoveExercise { index } => {
                if index < self.exercises.len() {
                    self.exercises.remove(index);
                }
            }
            DraftEdit::AddSet { exercise } => {
                if let Some(row) = self.exercises.get_mut(exercise) {
                    row.sets.push(SetDraft::default());
                }
            }
            DraftEdit::RemoveSet { exercise, set } => {
                if let Some(row) = self.exercises.get_mut(exercise) {
                    if set < row.sets.len() {
                        row.sets.remove(set);
                    }
                }
            }
            DraftEdit::SetExerciseName { exercise, name } => {
                if let Some(row) = self.exercises.get_mut(exercise) {
                    if let Some(known) = library.iter().find(|e| e.name == name) {
                        row.muscle_group = known.muscle_group.clone();
                        row.category = known.category.clone();
                    }
                    row.name = name;
                }
            }
            DraftEdit::SetMuscleGroup {
                exercise,
                muscle_group,
            } => {
                if let Some(row) = self.exercises.get_mut(exercise) {
                    row.muscle_group = muscle_group;
                }
            }
            DraftEdit::SetCategory { exercise, category } => {
                if let Some(row) = self.exercises.get_mut(exercise) {
                    row.category = category;
                }
            }
            DraftEdit::SetReps {
                exercise,
                set,
                reps,
            } => {
                if let Some(row) = self.exercises.get_mut(exercise) {
                    if let Some(set_row) = row.sets.get_mut(set) {
                        set_row.reps = reps;
                    }
                }
            }
            DraftEdit::SetWeight {
                exercise,
                set,
                weight,
            } => {
                if let Some(row) = self.exercises.get_mut(exercise) {
                    if let Some(set_row) = row.sets.get_mut(set) {
                        set_row.weight = weight;
                    }
                }
            }
        }
    }

    /// Filter and parse the draft into submittable entries.
    ///
    /// # Errors
    ///
    /// Returns a local validation error when nothing survives filtering; the
    /// caller must not issue a backend call in that case.
    pub fn build_entries(&self) -> AppResult<Vec<WorkoutEntry>> {
        let entries: Vec<WorkoutEntry> = self
            .exercises
            .iter()
            .filter(|row| !row.name.trim().is_empty() && row.has_complete_set())
            .map(|row| WorkoutEntry {
                exercise: Exercise::new(
                    row.name.clone(),
                    non_empty_or(&row.muscle_group, FALLBACK_MUSCLE_GROUP),
                    non_empty_or(&row.category, FALLBACK_CATEGORY),
                ),
                sets: row
                    .sets
                    .iter()
                    .filter(|set| set.is_complete())
                    .map(SetDraft::parse)
                    .collect(),
            })
            .collect();

        if entries.is_empty() {
            return Err(AppError::local_validation(
                "Please add at least one exercise with sets",
            ));
        }
        Ok(entries)
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_owned()
    } else {
        value.to_owned()
    }
}

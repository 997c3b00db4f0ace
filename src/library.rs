// ABOUTME: Exercise library browsing - default catalog, conjunctive filtering, grouping
// ABOUTME: The built-in catalog is a display fallback only and is never persisted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Exercise Library
//!
//! Browsing logic for the exercise library view. When the server library is
//! empty the view falls back to a fixed built-in catalog; the fallback is never
//! written back to the server or merged with server data.
//!
//! Filtering is conjunctive: a case-insensitive name substring match AND an
//! optional muscle-group equality filter. Selecting the already-selected group
//! toggles the group filter off.

use crate::models::Exercise;

/// Canonical muscle groups, in display order
pub const MUSCLE_GROUPS: [&str; 7] = [
    "Chest",
    "Back",
    "Legs",
    "Shoulders",
    "Arms",
    "Core",
    "Home Workout",
];

/// Built-in display fallback catalog
#[must_use]
pub fn default_catalog() -> Vec<Exercise> {
    [
        // Chest
        ("Bench Press", "Chest", "Gym"),
        ("Incline Dumbbell Press", "Chest", "Gym"),
        ("Cable Flyes", "Chest", "Gym"),
        ("Push-ups", "Chest", "Bodyweight"),
        // Back
        ("Deadlift", "Back", "Gym"),
        ("Pull-ups", "Back", "Bodyweight"),
        ("Barbell Rows", "Back", "Gym"),
        ("Lat Pulldown", "Back", "Gym"),
        // Legs
        ("Squats", "Legs", "Gym"),
        ("Leg Press", "Legs", "Gym"),
        ("Romanian Deadlift", "Legs", "Gym"),
        ("Leg Curls", "Legs", "Gym"),
        ("Calf Raises", "Legs", "Gym"),
        // Shoulders
        ("Overhead Press", "Shoulders", "Gym"),
        ("Lateral Raises", "Shoulders", "Gym"),
        ("Front Raises", "Shoulders", "Gym"),
        ("Face Pulls", "Shoulders", "Gym"),
        // Arms
        ("Bicep Curls", "Arms", "Gym"),
        ("Tricep Dips", "Arms", "Bodyweight"),
        ("Hammer Curls", "Arms", "Gym"),
        ("Skull Crushers", "Arms", "Gym"),
        // Core
        ("Planks", "Core", "Bodyweight"),
        ("Russian Twists", "Core", "Bodyweight"),
        ("Hanging Leg Raises", "Core", "Bodyweight"),
        ("Cable Crunches", "Core", "Gym"),
        // Home Workout
        ("Bodyweight Squats", "Home Workout", "Bodyweight"),
        ("Lunges", "Home Workout", "Bodyweight"),
        ("Burpees", "Home Workout", "Bodyweight"),
        ("Mountain Climbers", "Home Workout", "Bodyweight"),
        ("Jumping Jacks", "Home Workout", "Bodyweight"),
        ("Sit-ups", "Home Workout", "Bodyweight"),
        ("Leg Raises", "Home Workout", "Bodyweight"),
        ("Superman Hold", "Home Workout", "Bodyweight"),
        ("Wall Sits", "Home Workout", "Bodyweight"),
        ("High Knees", "Home Workout", "Bodyweight"),
    ]
    .into_iter()
    .map(|(name, group, category)| Exercise::new(name, group, category))
    .collect()
}

/// The exercises to display: the server library, or the fallback catalog when
/// the server library is empty
#[must_use]
pub fn displayable<'a>(server_library: &'a [Exercise], fallback: &'a [Exercise]) -> &'a [Exercise] {
    if server_library.is_empty() {
        fallback
    } else {
        server_library
    }
}

/// Conjunctive library filter: name substring AND optional group equality
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryFilter {
    /// Case-insensitive name substring
    pub search: String,
    /// Selected muscle group, if any
    pub group: Option<String>,
}

impl LibraryFilter {
    /// Filter with no constraints
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the search term
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Select a group, or clear the selection when `group` is already selected
    pub fn toggle_group(&mut self, group: &str) {
        if self.group.as_deref() == Some(group) {
            self.group = None;
        } else {
            self.group = Some(group.to_owned());
        }
    }

    /// Clear the group selection ("All")
    pub fn clear_group(&mut self) {
        self.group = None;
    }

    /// Whether one exercise passes both predicates
    #[must_use]
    pub fn matches(&self, exercise: &Exercise) -> bool {
        let matches_search = exercise
            .name
            .to_lowercase()
            .contains(&self.search.to_lowercase());
        let matches_group = self
            .group
            .as_deref()
            .is_none_or(|group| exercise.muscle_group == group);
        matches_search && matches_group
    }

    /// All exercises passing the filter, in input order
    #[must_use]
    pub fn apply<'a>(&self, exercises: &'a [Exercise]) -> Vec<&'a Exercise> {
        exercises.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Group filtered exercises by canonical muscle group, in display order.
/// Groups with no matching exercises are omitted.
#[must_use]
pub fn group_by_muscle_group<'a>(exercises: &[&'a Exercise]) -> Vec<(&'static str, Vec<&'a Exercise>)> {
    MUSCLE_GROUPS
        .iter()
        .filter_map(|group| {
            let members: Vec<&Exercise> = exercises
                .iter()
                .filter(|e| e.muscle_group == *group)
                .copied()
                .collect();
            if members.is_empty() {
                None
            } else {
                Some((*group, members))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_covers_every_group() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 35);
        let count = |group: &str| catalog.iter().filter(|e| e.muscle_group == group).count();
        assert_eq!(count("Chest"), 4);
        assert_eq!(count("Back"), 4);
        assert_eq!(count("Legs"), 5);
        assert_eq!(count("Shoulders"), 4);
        assert_eq!(count("Arms"), 4);
        assert_eq!(count("Core"), 4);
        assert_eq!(count("Home Workout"), 10);
    }

    #[test]
    fn test_fallback_only_when_server_library_empty() {
        let fallback = default_catalog();
        let server = vec![Exercise::new("Zercher Squat", "Legs", "Gym")];

        assert_eq!(displayable(&server, &fallback).len(), 1);
        assert_eq!(displayable(&[], &fallback).len(), fallback.len());
    }

    #[test]
    fn test_conjunctive_filter_press_and_chest() {
        let catalog = default_catalog();
        let mut filter = LibraryFilter::new();
        filter.set_search("press");
        filter.toggle_group("Chest");

        let hits = filter.apply(&catalog);
        let names: Vec<&str> = hits.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bench Press", "Incline Dumbbell Press"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = default_catalog();
        let mut filter = LibraryFilter::new();
        filter.set_search("DEADLIFT");

        let names: Vec<&str> = filter
            .apply(&catalog)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Deadlift", "Romanian Deadlift"]);
    }

    #[test]
    fn test_toggling_same_group_twice_clears_it() {
        let mut filter = LibraryFilter::new();
        filter.toggle_group("Chest");
        assert_eq!(filter.group.as_deref(), Some("Chest"));

        filter.toggle_group("Chest");
        assert_eq!(filter.group, None);

        // Toggling a different group replaces the selection
        filter.toggle_group("Back");
        filter.toggle_group("Legs");
        assert_eq!(filter.group.as_deref(), Some("Legs"));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let catalog = default_catalog();
        let filter = LibraryFilter::new();
        assert_eq!(filter.apply(&catalog).len(), catalog.len());
    }

    #[test]
    fn test_grouping_follows_display_order_and_omits_empty() {
        let catalog = default_catalog();
        let mut filter = LibraryFilter::new();
        filter.set_search("curl");

        let filtered = filter.apply(&catalog);
        let grouped = group_by_muscle_group(&filtered);
        let groups: Vec<&str> = grouped.iter().map(|(g, _)| *g).collect();
        // Leg Curls, Bicep Curls, Hammer Curls: Legs before Arms, nothing else
        assert_eq!(groups, vec!["Legs", "Arms"]);
    }
}

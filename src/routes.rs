// ABOUTME: Client-visible navigable routes and their paths
// ABOUTME: Every route sits behind the auth gate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Navigable views of the client. Wiring these into an actual router is the
//! display layer's concern; this module only fixes the route set and paths.

use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Navigable client views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Root dashboard with progress stats
    Dashboard,
    /// Workout logging form
    LogWorkout,
    /// Workout history list
    History,
    /// Exercise library browser
    Exercises,
}

impl Route {
    /// All routes, in navigation order
    pub const ALL: [Self; 4] = [
        Self::Dashboard,
        Self::LogWorkout,
        Self::History,
        Self::Exercises,
    ];

    /// URL path for this route
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::LogWorkout => "/log-workout",
            Self::History => "/history",
            Self::Exercises => "/exercises",
        }
    }

    /// Every route requires an authenticated caller
    #[must_use]
    pub fn requires_auth(self) -> bool {
        true
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl FromStr for Route {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|route| route.path() == s)
            .ok_or_else(|| AppError::local_validation(format!("Unknown route: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_round_trip() {
        for route in Route::ALL {
            let parsed: Route = route.path().parse().unwrap();
            assert_eq!(parsed, route);
        }
    }

    #[test]
    fn test_unknown_path_rejected() {
        assert!("/settings".parse::<Route>().is_err());
    }

    #[test]
    fn test_every_route_is_protected() {
        assert!(Route::ALL.into_iter().all(Route::requires_auth));
    }
}

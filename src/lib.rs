// ABOUTME: Library entry point for the FitTrack client core
// ABOUTME: Domain model, backend access, query cache, auth gate, and form logic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # FitTrack Client Core
//!
//! Client-side core of a personal fitness-tracking application: users log
//! workouts (exercises, sets, reps, weight), browse an exercise library, view
//! aggregated progress statistics, and manage workout plans, all gated behind
//! an external identity provider.
//!
//! ## Architecture
//!
//! - **Models**: record shapes exchanged with the backend, plus volume math
//! - **Backend**: typed remote-call surface, one async operation per use case,
//!   with explicit caller scoping
//! - **Cache/Queries**: cached reads keyed by operation name, mutations with
//!   fixed invalidation rules, auth-gated execution
//! - **Auth**: three-state gate over an external identity provider
//! - **Logbook/Library**: the workout logging form and exercise browsing logic
//!
//! The backend itself (persistence, per-user enforcement, identity issuance)
//! is an external collaborator; this crate only consumes its contract.

/// Authentication gate and identity provider seam
pub mod auth;

/// Typed backend access layer with HTTP transport
pub mod backend;

/// Session-scoped query cache with stale marking
pub mod cache;

/// Environment-based client configuration
pub mod config;

/// Unified error handling with standard error codes
pub mod errors;

/// Exercise library browsing: default catalog, filtering, grouping
pub mod library;

/// Workout logging form state and submit-time filtering
pub mod logbook;

/// Structured logging setup
pub mod logging;

/// Core data models for fitness records
pub mod models;

/// Cached query and mutation layer
pub mod queries;

/// Client-visible navigable routes
pub mod routes;

/// Test doubles for the backend and identity seams
#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

// ABOUTME: Session-scoped query cache keyed by backend operation name
// ABOUTME: Supports stale marking for invalidation and a full flush at logout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Query Cache
//!
//! An explicit cache object with a defined lifecycle: one instance is created
//! per client session and flushed entirely at logout, so no cached result can
//! outlive the identity it was fetched for.
//!
//! Invalidation marks an entry *stale* rather than removing it: a stale entry
//! must be re-fetched on next access and is never proactively refreshed or
//! optimistically merged. Values are stored as serialized JSON bytes so a
//! single cache holds the result shapes of all four read operations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::AppResult;

/// Stable operation names keying the four cached read operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// `get_workout_history`
    WorkoutHistory,
    /// `get_exercise_library`
    ExerciseLibrary,
    /// `get_progress_stats`
    ProgressStats,
    /// `get_workout_plans`
    WorkoutPlans,
}

impl QueryKey {
    /// All cacheable operations
    pub const ALL: [Self; 4] = [
        Self::WorkoutHistory,
        Self::ExerciseLibrary,
        Self::ProgressStats,
        Self::WorkoutPlans,
    ];
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkoutHistory => write!(f, "workoutHistory"),
            Self::ExerciseLibrary => write!(f, "exerciseLibrary"),
            Self::ProgressStats => write!(f, "progressStats"),
            Self::WorkoutPlans => write!(f, "workoutPlans"),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Vec<u8>,
    stale: bool,
}

/// In-memory cache of query results for one client session
#[derive(Default)]
pub struct QueryCache {
    store: RwLock<HashMap<QueryKey, CacheEntry>>,
}

impl QueryCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fresh result for `key`, replacing any previous entry
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub async fn set<T: Serialize + Send + Sync>(&self, key: QueryKey, value: &T) -> AppResult<()> {
        let data = serde_json::to_vec(value)?;
        self.store
            .write()
            .await
            .insert(key, CacheEntry { data, stale: false });
        Ok(())
    }

    /// Retrieve the cached result for `key`, or `None` if missing or stale.
    ///
    /// A stale entry is deliberately not returned: staleness means the next
    /// read must go back to the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails
    pub async fn get<T: for<'de> Deserialize<'de>>(&self, key: QueryKey) -> AppResult<Option<T>> {
        let store = self.store.read().await;
        match store.get(&key) {
            Some(entry) if !entry.stale => {
                let value: T = serde_json::from_slice(&entry.data)?;
                Ok(Some(value))
            }
            _ => Ok(None),
        }
    }

    /// Mark the entry for `key` stale. No-op when nothing is cached.
    pub async fn invalidate(&self, key: QueryKey) {
        let mut store = self.store.write().await;
        if let Some(entry) = store.get_mut(&key) {
            entry.stale = true;
            debug!(query = %key, "cache entry marked stale");
        }
    }

    /// Whether `key` currently holds a stale entry
    pub async fn is_stale(&self, key: QueryKey) -> bool {
        self.store
            .read()
            .await
            .get(&key)
            .is_some_and(|entry| entry.stale)
    }

    /// Whether `key` currently holds a fresh entry
    pub async fn is_fresh(&self, key: QueryKey) -> bool {
        self.store
            .read()
            .await
            .get(&key)
            .is_some_and(|entry| !entry.stale)
    }

    /// Remove every entry. Called at logout so no result from the previous
    /// identity can be served to the next one.
    pub async fn clear_all(&self) {
        let mut store = self.store.write().await;
        let removed = store.len();
        store.clear();
        debug!(removed, "query cache flushed");
    }

    /// Number of entries currently held (fresh or stale)
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether the cache holds no entries at all
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get_round_trip() {
        let cache = QueryCache::new();
        cache
            .set(QueryKey::ExerciseLibrary, &vec!["Bench Press".to_owned()])
            .await
            .unwrap();

        let cached: Option<Vec<String>> = cache.get(QueryKey::ExerciseLibrary).await.unwrap();
        assert_eq!(cached, Some(vec!["Bench Press".to_owned()]));
    }

    #[tokio::test]
    async fn test_stale_entry_not_served() {
        let cache = QueryCache::new();
        cache.set(QueryKey::ProgressStats, &42u64).await.unwrap();
        cache.invalidate(QueryKey::ProgressStats).await;

        assert!(cache.is_stale(QueryKey::ProgressStats).await);
        let cached: Option<u64> = cache.get(QueryKey::ProgressStats).await.unwrap();
        assert_eq!(cached, None);
    }

    #[tokio::test]
    async fn test_invalidate_missing_entry_is_noop() {
        let cache = QueryCache::new();
        cache.invalidate(QueryKey::WorkoutPlans).await;
        assert!(!cache.is_stale(QueryKey::WorkoutPlans).await);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_refresh_clears_staleness() {
        let cache = QueryCache::new();
        cache.set(QueryKey::WorkoutHistory, &1u64).await.unwrap();
        cache.invalidate(QueryKey::WorkoutHistory).await;
        cache.set(QueryKey::WorkoutHistory, &2u64).await.unwrap();

        assert!(cache.is_fresh(QueryKey::WorkoutHistory).await);
        let cached: Option<u64> = cache.get(QueryKey::WorkoutHistory).await.unwrap();
        assert_eq!(cached, Some(2));
    }

    #[tokio::test]
    async fn test_clear_all_removes_everything() {
        let cache = QueryCache::new();
        for key in QueryKey::ALL {
            cache.set(key, &"data").await.unwrap();
        }
        assert_eq!(cache.len().await, 4);

        cache.clear_all().await;
        assert!(cache.is_empty().await);
        for key in QueryKey::ALL {
            let cached: Option<String> = cache.get(key).await.unwrap();
            assert_eq!(cached, None);
        }
    }

    #[test]
    fn test_query_key_names_are_stable() {
        assert_eq!(QueryKey::WorkoutHistory.to_string(), "workoutHistory");
        assert_eq!(QueryKey::ExerciseLibrary.to_string(), "exerciseLibrary");
        assert_eq!(QueryKey::ProgressStats.to_string(), "progressStats");
        assert_eq!(QueryKey::WorkoutPlans.to_string(), "workoutPlans");
    }
}

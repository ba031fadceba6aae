// ABOUTME: In-memory result store backed by a shared vector
// ABOUTME: Used by tests and by callers that persist results themselves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ResultStore;
use crate::errors::AppResult;
use crate::models::SessionResult;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Result history held in process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryResultStore {
    results: Arc<RwLock<Vec<SessionResult>>>,
}

impl MemoryResultStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored results
    pub async fn len(&self) -> usize {
        self.results.read().await.len()
    }

    /// Whether nothing has been stored yet
    pub async fn is_empty(&self) -> bool {
        self.results.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl ResultStore for MemoryResultStore {
    async fn append(&self, result: &SessionResult) -> AppResult<()> {
        self.results.write().await.insert(0, result.clone());
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<SessionResult>> {
        Ok(self.results.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SessionStatus, TestType};
    use chrono::Utc;

    fn result(reps: u32) -> SessionResult {
        let now = Utc::now();
        SessionResult::new(TestType::Situp, reps, SessionStatus::Valid, 10_000, now, now)
    }

    #[tokio::test]
    async fn test_list_is_most_recent_first() {
        let store = MemoryResultStore::new();
        assert!(store.is_empty().await);

        let first = result(3);
        let second = result(8);
        store.append(&first).await.unwrap();
        store.append(&second).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(store.len().await, 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn test_leaderboard_default_limit() {
        let store = MemoryResultStore::new();
        for reps in [1, 22, 5, 14, 9, 30, 2] {
            store.append(&result(reps)).await.unwrap();
        }
        let board: Vec<u32> = store
            .leaderboard(5)
            .await
            .unwrap()
            .iter()
            .map(|r| r.rep_count)
            .collect();
        assert_eq!(board, vec![30, 22, 14, 9, 5]);
    }
}

// ABOUTME: Result store abstraction for finished assessment sessions
// ABOUTME: Pluggable backends (in-memory, JSON file) behind one async trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// JSON file store used by the CLI
pub mod json_file;
/// In-memory store for tests and embedding
pub mod memory;

use crate::errors::AppResult;
use crate::models::SessionResult;

pub use json_file::JsonFileResultStore;
pub use memory::MemoryResultStore;

/// Append-only history of session results
///
/// # Examples
///
/// ```rust,no_run
/// use fitness_assessment::store::{MemoryResultStore, ResultStore};
/// # async fn example(result: fitness_assessment::models::SessionResult)
/// #     -> fitness_assessment::errors::AppResult<()> {
/// let store = MemoryResultStore::new();
/// store.append(&result).await?;
///
/// let best = store.leaderboard(5).await?;
/// for (rank, entry) in best.iter().enumerate() {
///     println!("{}. {} reps", rank + 1, entry.rep_count);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait ResultStore: Send + Sync {
    /// Record a finished session
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot persist the result
    async fn append(&self, result: &SessionResult) -> AppResult<()>;

    /// All results, most recent first
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn list(&self) -> AppResult<Vec<SessionResult>>;

    /// Highest scores first, at most `limit` entries
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn leaderboard(&self, limit: usize) -> AppResult<Vec<SessionResult>> {
        Ok(top_scores(self.list().await?, limit))
    }
}

/// Rank results by score, keeping list order between equal scores
#[must_use]
pub fn top_scores(mut results: Vec<SessionResult>, limit: usize) -> Vec<SessionResult> {
    results.sort_by(|a, b| b.rep_count.cmp(&a.rep_count));
    results.truncate(limit);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SessionStatus, TestType};
    use chrono::Utc;

    fn result(reps: u32) -> SessionResult {
        let now = Utc::now();
        SessionResult::new(TestType::Situp, reps, SessionStatus::Valid, 30_000, now, now)
    }

    #[test]
    fn test_top_scores_orders_and_limits() {
        let results = vec![result(4), result(12), result(7), result(25)];
        let top: Vec<u32> = top_scores(results, 3).iter().map(|r| r.rep_count).collect();
        assert_eq!(top, vec![25, 12, 7]);
    }

    #[test]
    fn test_top_scores_ties_keep_recency() {
        let newer = result(10);
        let older = result(10);
        let top = top_scores(vec![newer.clone(), older.clone()], 5);
        assert_eq!(top[0].id, newer.id);
        assert_eq!(top[1].id, older.id);
    }
}

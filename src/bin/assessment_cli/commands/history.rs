// ABOUTME: Result browsing commands for assessment-cli
// ABOUTME: Lists stored sessions and ranks the best scores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitness_assessment::errors::AppResult;
use fitness_assessment::store::{top_scores, ResultStore};
use tracing::info;

use crate::helpers::display::{display_leaderboard, display_results};
use crate::TestArg;

/// Show stored results, most recent first
pub async fn list(store: &dyn ResultStore, limit: Option<usize>) -> AppResult<()> {
    let mut results = store.list().await?;
    info!(total = results.len(), "loaded session history");
    if let Some(limit) = limit {
        results.truncate(limit);
    }
    display_results(&results);
    Ok(())
}

/// Show the best `limit` scores, optionally for one test only
pub async fn leaderboard(
    store: &dyn ResultStore,
    limit: usize,
    test: Option<TestArg>,
) -> AppResult<()> {
    let ranked = match test {
        None => store.leaderboard(limit).await?,
        Some(test) => {
            let test_type = test.test_type();
            let results = store
                .list()
                .await?
                .into_iter()
                .filter(|r| r.test_type == test_type)
                .collect();
            top_scores(results, limit)
        }
    };
    display_leaderboard(&ranked);
    Ok(())
}

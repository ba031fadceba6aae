// ABOUTME: Integration tests for the JSON file result store
// ABOUTME: Validates ordering, leaderboard ranking, reload, and concurrent appends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{Duration, Utc};
use common::init_test_logging;
use fitness_assessment::constants::badges::LEADERBOARD_SIZE;
use fitness_assessment::models::{Badge, SessionResult, SessionStatus, TestType};
use fitness_assessment::store::{JsonFileResultStore, ResultStore};
use std::sync::Arc;
use tempfile::TempDir;

fn result(test_type: TestType, score: u32, minutes_ago: i64) -> SessionResult {
    let finished = Utc::now() - Duration::minutes(minutes_ago);
    SessionResult::new(
        test_type,
        score,
        SessionStatus::Valid,
        45_000,
        finished - Duration::seconds(45),
        finished,
    )
}

#[tokio::test]
async fn test_history_survives_reopen() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.json");

    let store = JsonFileResultStore::new(&path);
    let older = result(TestType::Situp, 12, 10).with_form_score(Some(84.5));
    let newer = result(TestType::VerticalJump, 24, 1);
    store.append(&older).await.unwrap();
    store.append(&newer).await.unwrap();
    drop(store);

    let reopened = JsonFileResultStore::new(&path);
    let listed = reopened.list().await.unwrap();
    assert_eq!(listed, vec![newer, older]);
}

#[tokio::test]
async fn test_leaderboard_ranks_top_five() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let store = JsonFileResultStore::new(dir.path().join("results.json"));
    for (age, score) in [3, 25, 11, 8, 21, 17, 6].into_iter().enumerate() {
        store
            .append(&result(TestType::Situp, score, age as i64))
            .await
            .unwrap();
    }

    let board = store.leaderboard(LEADERBOARD_SIZE).await.unwrap();
    let scores: Vec<u32> = board.iter().map(|r| r.rep_count).collect();
    assert_eq!(scores, vec![25, 21, 17, 11, 8]);
    assert_eq!(board[0].badge(), Badge::Gold);
    assert_eq!(board[4].badge(), Badge::Bronze);
}

#[tokio::test]
async fn test_concurrent_appends_are_not_lost() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileResultStore::new(dir.path().join("results.json")));

    let writers: Vec<_> = (0..8_u32)
        .map(|score| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.append(&result(TestType::Situp, score, 0)).await })
        })
        .collect();
    for writer in writers {
        writer.await.unwrap().unwrap();
    }

    assert_eq!(store.list().await.unwrap().len(), 8);
}

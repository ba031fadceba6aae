// ABOUTME: Output formatting helpers for assessment-cli
// ABOUTME: Provides consistent display functions for sessions, results, and leaderboards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitness_assessment::models::{SessionResult, TestType};
use fitness_assessment::session::SessionOutcome;

use crate::SourceArg;

/// Announce a session before the first tick
pub fn display_session_start(test: TestType, source: Option<SourceArg>, ticks: Option<u64>) {
    println!("\nStarting {test} assessment");
    println!("{}", "=".repeat(50));
    if let Some(source) = source {
        println!("   Source: {source:?}");
    }
    match ticks {
        Some(ticks) => println!("   Tick limit: {ticks}"),
        None => println!("   Runs until the session ends (Ctrl-C to stop)"),
    }
    println!();
}

/// One line per completed repetition
pub fn display_rep(count: u32) {
    println!("   Rep {count}");
}

/// Summary of a finished sit-up session
pub fn display_situp_outcome(outcome: &SessionOutcome) {
    let result = &outcome.result;
    let badge = result.badge();
    println!("\nSession Complete");
    println!("{}", "=".repeat(50));
    println!("   Reps: {}", result.rep_count);
    println!("   Status: {}", result.status);
    if let Some(message) = &outcome.snapshot.message {
        println!("   Ended: {message}");
    }
    println!("   Duration: {:.1}s", result.duration_ms as f64 / 1000.0);
    println!("   Badge: {} {}", badge.emoji(), badge.label());
    if let Some(score) = result.form_score {
        println!(
            "   Form: {score:.0}/100 (confidence {:.0}%)",
            outcome.snapshot.confidence_score
        );
    }
    if outcome.dropped_ticks > 0 {
        println!("   Dropped ticks: {}", outcome.dropped_ticks);
    }
    if !result.status.is_valid() {
        println!("\nWARNING The subject left the frame; this result is not trusted.");
    }

    if !outcome.feedback.is_empty() {
        println!("\nFeedback:");
        for line in &outcome.feedback {
            println!("   {line}");
        }
    }
}

/// Summary of a finished jump session
pub fn display_jump_outcome(result: &SessionResult, peak_g: f64) {
    let badge = result.badge();
    println!("\nJump Complete");
    println!("{}", "=".repeat(50));
    println!("   Peak: {peak_g:.2} g");
    println!("   Score: {}", result.rep_count);
    println!("   Badge: {} {}", badge.emoji(), badge.label());
}

/// Stored results, one row each
pub fn display_results(results: &[SessionResult]) {
    if results.is_empty() {
        println!("No results yet. Run `assessment-cli run` to record one.");
        return;
    }

    println!(
        "{:<20} {:<14} {:>6} {:>9} {:<8} Badge",
        "Finished", "Test", "Score", "Duration", "Status"
    );
    println!("{}", "-".repeat(72));
    for result in results {
        let badge = result.badge();
        println!(
            "{:<20} {:<14} {:>6} {:>8.1}s {:<8} {} {}",
            result.finished_at.format("%Y-%m-%d %H:%M"),
            result.test_type.to_string(),
            result.rep_count,
            result.duration_ms as f64 / 1000.0,
            result.status.to_string(),
            badge.emoji(),
            badge.label()
        );
    }
}

/// Ranked top scores
pub fn display_leaderboard(results: &[SessionResult]) {
    if results.is_empty() {
        println!("Leaderboard is empty.");
        return;
    }

    println!("\nLeaderboard");
    println!("{}", "=".repeat(50));
    for (rank, result) in results.iter().enumerate() {
        let badge = result.badge();
        println!(
            "{:>2}. {:>4}  {:<14} {} {}  ({})",
            rank + 1,
            result.rep_count,
            result.test_type.to_string(),
            badge.emoji(),
            badge.label(),
            result.finished_at.format("%Y-%m-%d")
        );
    }
}

// ABOUTME: Integration tests for the rep counter state machine and liveness policy
// ABOUTME: Exercises counting, termination precedence, frame drops, badges, and feedback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{init_test_logging, intensity, orientation, pose, pose_without_hips};
use fitness_assessment::constants::messages::{INACTIVE_TOO_LONG, STOPPED, SUBJECT_NOT_VISIBLE};
use fitness_assessment::intelligence::{assessment_feedback, CounterConfig, Phase, RepCounter};
use fitness_assessment::models::{Badge, SessionStatus, SignalKind};
use fitness_assessment::providers::{SignalSource, SyntheticIntensitySource};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn orientation_counter() -> RepCounter {
    init_test_logging();
    RepCounter::new(SignalKind::Orientation, CounterConfig::default(), 0).unwrap()
}

#[test]
fn test_end_to_end_orientation_session() {
    let mut counter = orientation_counter();

    counter.update(&orientation(20.0), 0);
    counter.update(&orientation(80.0), 500);
    let snapshot = counter.update(&orientation(20.0), 1_000);
    assert_eq!(snapshot.count, 1);
    assert!(snapshot.active);

    let snapshot = counter.poll(7_000);
    assert!(!snapshot.active);
    assert_eq!(snapshot.count, 1);
    assert_eq!(snapshot.status, SessionStatus::Valid);
    assert_eq!(snapshot.message.as_deref(), Some(INACTIVE_TOO_LONG));
    assert_eq!(snapshot.stopped_at, Some(7_000));
}

#[test]
fn test_hysteresis_counts_two_reps() {
    let mut counter = orientation_counter();
    for (tick, angle) in [80.0, 80.0, 30.0, 30.0, 80.0, 80.0, 30.0, 30.0]
        .into_iter()
        .enumerate()
    {
        counter.update(&orientation(angle), tick as u64 * 200);
    }
    assert_eq!(counter.count(), 2);
    assert_eq!(counter.phase(), Phase::Up);
}

#[test]
fn test_band_between_thresholds_never_counts() {
    let mut counter = orientation_counter();
    counter.update(&orientation(80.0), 0);
    for tick in 1..30_u64 {
        let angle = if tick % 2 == 0 { 40.0 } else { 65.0 };
        counter.update(&orientation(angle), tick * 100);
    }
    assert_eq!(counter.count(), 0);
    assert_eq!(counter.phase(), Phase::Down);
}

#[test]
fn test_attention_loss_takes_precedence_over_inactivity() {
    init_test_logging();
    let mut counter = RepCounter::new(SignalKind::Pose, CounterConfig::default(), 0).unwrap();
    counter.update(&pose(80.0, 0.9), 0);

    // Face gone and no movement: both limits are exceeded by t = 6000
    let snapshot = counter.update(&pose(80.0, 0.1), 6_000);
    assert!(!snapshot.active);
    assert_eq!(snapshot.status, SessionStatus::Invalid);
    assert_eq!(snapshot.message.as_deref(), Some(SUBJECT_NOT_VISIBLE));
}

#[test]
fn test_frame_drop_keeps_count_and_phase() {
    init_test_logging();
    let mut counter = RepCounter::new(SignalKind::Pose, CounterConfig::default(), 0).unwrap();
    counter.update(&pose(80.0, 0.9), 0);
    counter.update(&pose(20.0, 0.9), 300);
    assert_eq!(counter.count(), 1);

    let before = counter.snapshot(600);
    let after = counter.update(&pose_without_hips(0.9), 600);
    assert_eq!(after.count, before.count);
    assert_eq!(after.phase, before.phase);
    assert_eq!(after.debug.last_subject_visible_ago_ms, 0);
    assert_eq!(after.debug.last_motion_ago_ms, 300);
}

#[test]
fn test_stop_is_terminal_and_idempotent() {
    let mut counter = orientation_counter();
    counter.update(&orientation(80.0), 0);
    counter.update(&orientation(20.0), 400);

    let first = counter.stop(1_000);
    let second = counter.stop(2_000);
    assert_eq!(first.message.as_deref(), Some(STOPPED));
    assert_eq!(first.stopped_at, second.stopped_at);
    assert_eq!(second.duration_ms, 1_000);

    let after = counter.update(&orientation(80.0), 2_500);
    assert_eq!(after.count, 1);
    assert!(!after.active);
}

#[test]
fn test_intensity_session_builds_form_score() {
    init_test_logging();
    let mut counter = RepCounter::new(SignalKind::Intensity, CounterConfig::default(), 0).unwrap();
    let mut snapshot = counter.snapshot(0);
    for tick in 0..20_u64 {
        snapshot = counter.update(&intensity(0.8), tick * 250);
    }
    // Reps at 250 and 3000; the 2500 ms spacing holds back every other tick
    assert_eq!(snapshot.count, 2);
    let form = snapshot.form_score.expect("quality observed");
    assert!((0.0..=100.0).contains(&form));
    assert!(!assessment_feedback(form, snapshot.count, snapshot.confidence_score).is_empty());
}

#[tokio::test]
async fn test_synthetic_intensity_reps_are_spaced() {
    init_test_logging();
    let source = SyntheticIntensitySource::new(7);
    let mut counter = RepCounter::new(SignalKind::Intensity, CounterConfig::default(), 0).unwrap();

    let mut rep_times = Vec::new();
    let mut count = 0;
    for tick in 1..=40_u64 {
        let now = tick * 250;
        let sample = source
            .capture(now)
            .await
            .unwrap()
            .expect("synthetic source yields a sample every tick");
        let snapshot = counter.update(&sample, now);
        if snapshot.count > count {
            count = snapshot.count;
            rep_times.push(now);
        }
    }

    assert!((1..=4).contains(&count), "count {count} over 10 s");
    assert!(rep_times.windows(2).all(|pair| pair[1] - pair[0] > 2_500));
}

#[test]
fn test_random_streams_never_decrease_count() {
    init_test_logging();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for _ in 0..20 {
        let mut counter = orientation_counter();
        let mut previous = 0;
        for tick in 0..200_u64 {
            let snapshot = counter.update(&orientation(rng.gen_range(0.0..=90.0)), tick * 100);
            assert!(snapshot.count >= previous);
            assert!(snapshot.count <= previous + 1);
            previous = snapshot.count;
            if !snapshot.active {
                break;
            }
        }
    }
}

#[test]
fn test_badge_boundaries() {
    assert_eq!(Badge::for_score(9), Badge::Bronze);
    assert_eq!(Badge::for_score(10), Badge::Silver);
    assert_eq!(Badge::for_score(11), Badge::Silver);
    assert_eq!(Badge::for_score(19), Badge::Silver);
    assert_eq!(Badge::for_score(20), Badge::Silver);
    assert_eq!(Badge::for_score(21), Badge::Gold);
}

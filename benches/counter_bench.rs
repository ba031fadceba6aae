// ABOUTME: Criterion benchmarks for the rep counter and signal geometry
// ABOUTME: Measures per-sample update cost for orientation, pose, and intensity streams
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the rep counter.
//!
//! A session ticks at most a few times per second, so these mostly guard
//! against regressions in the pose geometry path.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fitness_assessment::intelligence::{CounterConfig, RepCounter};
use fitness_assessment::models::{
    IntensitySample, Landmark, LandmarkName, OrientationSample, PoseSample, Sample, SignalKind,
};
use fitness_assessment::providers::MotionProfile;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Tick spacing used for generated streams
const TICK_MS: u64 = 100;

fn orientation_stream(count: usize, seed: u64) -> Vec<Sample> {
    let profile = MotionProfile::default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count as u64)
        .map(|tick| {
            let angle = profile.sample_angle(tick * TICK_MS, &mut rng);
            Sample::Orientation(OrientationSample::new(angle))
        })
        .collect()
}

fn pose_stream(count: usize, seed: u64) -> Vec<Sample> {
    let profile = MotionProfile::default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count as u64)
        .map(|tick| {
            let angle = profile.sample_angle(tick * TICK_MS, &mut rng).to_radians();
            let shoulder_x = 0.35f64.mul_add(angle.sin(), 0.5);
            let shoulder_y = 0.35f64.mul_add(-angle.cos(), 0.75);
            Sample::Pose(
                PoseSample::new()
                    .with_landmark(
                        LandmarkName::LeftShoulder,
                        Landmark::new(shoulder_x - 0.05, shoulder_y, 0.9),
                    )
                    .with_landmark(
                        LandmarkName::RightShoulder,
                        Landmark::new(shoulder_x + 0.05, shoulder_y, 0.9),
                    )
                    .with_landmark(LandmarkName::LeftHip, Landmark::new(0.45, 0.75, 0.85))
                    .with_landmark(LandmarkName::RightHip, Landmark::new(0.55, 0.75, 0.85))
                    .with_landmark(
                        LandmarkName::Nose,
                        Landmark::new(shoulder_x, shoulder_y - 0.08, rng.gen_range(0.5..0.95)),
                    ),
            )
        })
        .collect()
}

fn intensity_stream(count: usize, seed: u64) -> Vec<Sample> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Sample::Intensity(IntensitySample {
                intensity: rng.gen_range(0.2..1.0),
                quality: rng.gen_range(0.6..1.0),
            })
        })
        .collect()
}

fn run_stream(kind: SignalKind, config: &CounterConfig, samples: &[Sample]) -> u32 {
    let Ok(mut counter) = RepCounter::new(kind, config.clone(), 0) else {
        return 0;
    };
    for (tick, sample) in samples.iter().enumerate() {
        counter.update(black_box(sample), tick as u64 * TICK_MS);
    }
    counter.count()
}

/// Benchmark whole-session replays for each adapter
fn bench_counter_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("rep_counter");

    for count in [100, 1_000] {
        let streams = [
            (
                "orientation",
                SignalKind::Orientation,
                CounterConfig::default(),
                orientation_stream(count, 1),
            ),
            ("pose", SignalKind::Pose, CounterConfig::pose(), pose_stream(count, 2)),
            (
                "intensity",
                SignalKind::Intensity,
                CounterConfig::default(),
                intensity_stream(count, 3),
            ),
        ];

        group.throughput(Throughput::Elements(count as u64));
        for (name, kind, config, samples) in &streams {
            group.bench_with_input(BenchmarkId::new(*name, count), samples, |b, samples| {
                b.iter(|| run_stream(*kind, config, samples));
            });
        }
    }

    group.finish();
}

/// Benchmark snapshot construction on its own
fn bench_snapshot(c: &mut Criterion) {
    let samples = orientation_stream(200, 4);
    let Ok(mut counter) = RepCounter::new(SignalKind::Orientation, CounterConfig::default(), 0)
    else {
        return;
    };
    for (tick, sample) in samples.iter().enumerate() {
        counter.update(sample, tick as u64 * TICK_MS);
    }

    c.bench_function("counter_snapshot", |b| {
        b.iter(|| counter.snapshot(black_box(20_000)));
    });
}

criterion_group!(benches, bench_counter_update, bench_snapshot);
criterion_main!(benches);

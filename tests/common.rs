// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, sample builders, and scripted sources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `fitness_assessment`

use fitness_assessment::config::AssessmentConfig;
use fitness_assessment::models::{
    IntensitySample, Landmark, LandmarkName, OrientationSample, PoseSample, Sample, SignalKind,
};
use fitness_assessment::providers::ScriptedSource;
use std::env;
use std::iter;
use std::path::PathBuf;
use std::sync::{Arc, Once};
use std::time::Duration;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            Ok("WARN" | "ERROR") | _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Session configuration with a fixed tick and a throwaway results path
pub fn test_config(tick_ms: u64) -> AssessmentConfig {
    AssessmentConfig {
        tick_interval: Duration::from_millis(tick_ms),
        results_path: PathBuf::from("unused-results.json"),
        ..AssessmentConfig::default()
    }
}

pub fn orientation(angle_deg: f64) -> Sample {
    Sample::Orientation(OrientationSample::new(angle_deg))
}

pub fn intensity(value: f64) -> Sample {
    Sample::Intensity(IntensitySample {
        intensity: value,
        quality: 0.8,
    })
}

/// Side-on pose with the torso at `angle_deg` from vertical and the given face confidence
pub fn pose(angle_deg: f64, face_confidence: f64) -> Sample {
    let radians = angle_deg.to_radians();
    let (hip_x, hip_y) = (0.5, 0.75);
    let shoulder_x = 0.35f64.mul_add(radians.sin(), hip_x);
    let shoulder_y = 0.35f64.mul_add(-radians.cos(), hip_y);
    Sample::Pose(
        PoseSample::new()
            .with_landmark(
                LandmarkName::LeftShoulder,
                Landmark::new(shoulder_x, shoulder_y, 0.9),
            )
            .with_landmark(
                LandmarkName::RightShoulder,
                Landmark::new(shoulder_x, shoulder_y, 0.9),
            )
            .with_landmark(LandmarkName::LeftHip, Landmark::new(hip_x, hip_y, 0.9))
            .with_landmark(LandmarkName::RightHip, Landmark::new(hip_x, hip_y, 0.9))
            .with_landmark(
                LandmarkName::Nose,
                Landmark::new(shoulder_x, shoulder_y - 0.08, face_confidence),
            ),
    )
}

/// Pose frame with shoulders and face but no hips
pub fn pose_without_hips(face_confidence: f64) -> Sample {
    Sample::Pose(
        PoseSample::new()
            .with_landmark(LandmarkName::LeftShoulder, Landmark::new(0.45, 0.4, 0.9))
            .with_landmark(LandmarkName::RightShoulder, Landmark::new(0.55, 0.4, 0.9))
            .with_landmark(LandmarkName::Nose, Landmark::new(0.5, 0.32, face_confidence)),
    )
}

/// Orientation script: the given angles, then `idle_ticks` empty ticks
pub fn scripted_orientation(angles: &[f64], idle_ticks: usize) -> Arc<ScriptedSource> {
    let script = angles
        .iter()
        .map(|&angle| Some(orientation(angle)))
        .chain(iter::repeat_with(|| None).take(idle_ticks));
    Arc::new(ScriptedSource::new(SignalKind::Orientation, script))
}

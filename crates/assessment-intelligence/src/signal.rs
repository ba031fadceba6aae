// ABOUTME: Signal adapter geometry turning raw samples into angle, visibility, and quality
// ABOUTME: Computes torso inclination from pose landmarks and face presence from confidences
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Per-sample feature extraction shared by every adapter.
//!
//! Each [`Sample`] variant reduces to a [`Reading`]: an optional torso angle,
//! a visibility verdict, an optional movement quality, and (for intensity
//! samples) the raw intensity. The rep counter only ever sees readings.

use crate::constants::counter::MAX_ANGLE_DEG;
use crate::models::{Landmark, LandmarkName, PoseSample, Sample};

/// Features extracted from one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Torso inclination from vertical, when the adapter can measure it
    pub angle_deg: Option<f64>,
    /// Whether this observation counts as the subject being visible
    pub visible: bool,
    /// Movement quality in [0, 1], when observed
    pub quality: Option<f64>,
    /// Raw movement intensity (intensity adapter only)
    pub intensity: Option<f64>,
}

impl Reading {
    /// Reading with no angle and no quality
    #[must_use]
    pub const fn empty(visible: bool) -> Self {
        Self {
            angle_deg: None,
            visible,
            quality: None,
            intensity: None,
        }
    }
}

/// Reduce a sample to its features
#[must_use]
pub fn read(sample: &Sample, face_score_threshold: f64) -> Reading {
    match sample {
        Sample::Intensity(s) => Reading {
            angle_deg: None,
            visible: true,
            quality: Some(s.quality.clamp(0.0, 1.0)),
            intensity: Some(s.intensity),
        },
        Sample::Orientation(s) => Reading {
            angle_deg: s
                .inclination_deg
                .is_finite()
                .then(|| s.inclination_deg.clamp(0.0, MAX_ANGLE_DEG)),
            visible: s.subject_visible.unwrap_or(true),
            quality: None,
            intensity: None,
        },
        Sample::Pose(pose) => Reading {
            angle_deg: torso_angle(pose),
            visible: face_confidence(pose) >= face_score_threshold,
            quality: torso_quality(pose),
            intensity: None,
        },
    }
}

fn midpoint(a: &Landmark, b: &Landmark) -> (f64, f64) {
    ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Torso inclination from vertical in degrees, clamped to [0, 90]
///
/// Uses the hip-centre to shoulder-centre vector in image coordinates
/// (`y` grows downward). Returns `None` unless both shoulders and both hips
/// were detected.
#[must_use]
pub fn torso_angle(pose: &PoseSample) -> Option<f64> {
    let left_shoulder = pose.get(LandmarkName::LeftShoulder)?;
    let right_shoulder = pose.get(LandmarkName::RightShoulder)?;
    let left_hip = pose.get(LandmarkName::LeftHip)?;
    let right_hip = pose.get(LandmarkName::RightHip)?;

    let (shoulder_x, shoulder_y) = midpoint(left_shoulder, right_shoulder);
    let (hip_x, hip_y) = midpoint(left_hip, right_hip);
    let dx = shoulder_x - hip_x;
    // Flip so that "shoulders above hips" is positive.
    let dy = hip_y - shoulder_y;
    if dx == 0.0 && dy == 0.0 {
        return None;
    }

    let angle = dx.abs().atan2(dy).to_degrees();
    angle.is_finite().then(|| angle.clamp(0.0, MAX_ANGLE_DEG))
}

/// Highest confidence among nose and eyes, 0 when none were detected
#[must_use]
pub fn face_confidence(pose: &PoseSample) -> f64 {
    LandmarkName::FACE
        .iter()
        .filter_map(|name| pose.get(*name))
        .map(|landmark| landmark.confidence)
        .fold(0.0, f64::max)
}

/// Mean confidence of the four torso landmarks, `None` if any is missing
#[must_use]
pub fn torso_quality(pose: &PoseSample) -> Option<f64> {
    let mut total = 0.0;
    for name in LandmarkName::TORSO {
        total += pose.get(name)?.confidence;
    }
    let count = LandmarkName::TORSO.len() as f64;
    Some((total / count).clamp(0.0, 1.0))
}

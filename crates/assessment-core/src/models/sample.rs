// ABOUTME: Signal sample types produced by the intensity, orientation, and pose adapters
// ABOUTME: Tagged union with one case per adapter plus named body landmarks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Signal adapter a session is configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Simulated intensity/quality pairs (demo mode)
    Intensity,
    /// Single-axis device inclination
    Orientation,
    /// Body landmarks from a pose estimator
    Pose,
}

impl SignalKind {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intensity => "intensity",
            Self::Orientation => "orientation",
            Self::Pose => "pose",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "intensity" | "synthetic" => Ok(Self::Intensity),
            "orientation" | "accelerometer" => Ok(Self::Orientation),
            "pose" | "camera" => Ok(Self::Pose),
            other => Err(format!("unknown signal kind '{other}'")),
        }
    }
}

/// Named body landmarks emitted by the pose estimator
///
/// Names follow the snake-case keypoint names used by common pose models
/// (`left_shoulder`, `right_hip`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkName {
    /// Nose tip
    Nose,
    /// Left eye centre
    LeftEye,
    /// Right eye centre
    RightEye,
    /// Left ear
    LeftEar,
    /// Right ear
    RightEar,
    /// Left shoulder
    LeftShoulder,
    /// Right shoulder
    RightShoulder,
    /// Left elbow
    LeftElbow,
    /// Right elbow
    RightElbow,
    /// Left wrist
    LeftWrist,
    /// Right wrist
    RightWrist,
    /// Left hip
    LeftHip,
    /// Right hip
    RightHip,
    /// Left knee
    LeftKnee,
    /// Right knee
    RightKnee,
    /// Left ankle
    LeftAnkle,
    /// Right ankle
    RightAnkle,
}

impl LandmarkName {
    /// Landmarks whose confidence decides whether the face is visible
    pub const FACE: [Self; 3] = [Self::Nose, Self::LeftEye, Self::RightEye];

    /// Landmarks that define the torso line
    pub const TORSO: [Self; 4] = [
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftHip,
        Self::RightHip,
    ];

    /// Snake-case keypoint name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "left_eye",
            Self::RightEye => "right_eye",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }
}

impl FromStr for LandmarkName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = match s {
            "nose" => Self::Nose,
            "left_eye" => Self::LeftEye,
            "right_eye" => Self::RightEye,
            "left_ear" => Self::LeftEar,
            "right_ear" => Self::RightEar,
            "left_shoulder" => Self::LeftShoulder,
            "right_shoulder" => Self::RightShoulder,
            "left_elbow" => Self::LeftElbow,
            "right_elbow" => Self::RightElbow,
            "left_wrist" => Self::LeftWrist,
            "right_wrist" => Self::RightWrist,
            "left_hip" => Self::LeftHip,
            "right_hip" => Self::RightHip,
            "left_knee" => Self::LeftKnee,
            "right_knee" => Self::RightKnee,
            "left_ankle" => Self::LeftAnkle,
            "right_ankle" => Self::RightAnkle,
            other => return Err(format!("unknown landmark '{other}'")),
        };
        Ok(name)
    }
}

/// A single landmark position in image coordinates (x right, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position
    pub x: f64,
    /// Vertical position (grows downwards)
    pub y: f64,
    /// Estimator confidence in [0, 1]
    pub confidence: f64,
}

impl Landmark {
    /// Create a landmark
    #[must_use]
    pub const fn new(x: f64, y: f64, confidence: f64) -> Self {
        Self { x, y, confidence }
    }
}

/// Simulated movement observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensitySample {
    /// Movement intensity in [0, 1]
    pub intensity: f64,
    /// Movement quality in [0, 1], feeds the form score
    pub quality: f64,
}

/// Device inclination observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationSample {
    /// Torso inclination from vertical in [0, 90] degrees
    pub inclination_deg: f64,
    /// Caller-supplied visibility signal, `None` means visible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_visible: Option<bool>,
}

impl OrientationSample {
    /// Orientation sample with no visibility signal
    #[must_use]
    pub const fn new(inclination_deg: f64) -> Self {
        Self {
            inclination_deg,
            subject_visible: None,
        }
    }

    /// Derive inclination from a gravity vector in device axes (any unit)
    ///
    /// The device is held landscape against the chest: `x` runs along the
    /// spine, `y` across the body, and `z` is the screen normal. A flat torso
    /// puts gravity on `z` (90 degrees), an upright torso puts it on `x`
    /// (0 degrees). Gravity mostly on `y` means the subject rolled sideways
    /// and is flagged as not visible.
    ///
    /// Returns `None` for a zero or non-finite vector.
    #[must_use]
    pub fn from_acceleration(x: f64, y: f64, z: f64) -> Option<Self> {
        let magnitude = z.mul_add(z, x.mul_add(x, y * y)).sqrt();
        if !magnitude.is_finite() || magnitude <= f64::EPSILON {
            return None;
        }
        let inclination_deg = (z.abs() / magnitude).clamp(0.0, 1.0).asin().to_degrees();
        Some(Self {
            inclination_deg,
            subject_visible: Some(y.abs() / magnitude <= SIDEWAYS_TILT_RATIO),
        })
    }
}

/// Fraction of gravity on the device `y` axis beyond which it counts as turned sideways
const SIDEWAYS_TILT_RATIO: f64 = 0.8;

/// Pose estimator observation: named landmarks for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseSample {
    /// Detected landmarks keyed by name; missing names were not detected
    pub landmarks: HashMap<LandmarkName, Landmark>,
}

impl PoseSample {
    /// Empty frame (nothing detected)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a landmark, builder style
    #[must_use]
    pub fn with_landmark(mut self, name: LandmarkName, landmark: Landmark) -> Self {
        self.landmarks.insert(name, landmark);
        self
    }

    /// Look up a landmark by name
    #[must_use]
    pub fn get(&self, name: LandmarkName) -> Option<&Landmark> {
        self.landmarks.get(&name)
    }

    /// Whether the estimator detected nothing in this frame
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

/// One observation at a timestamp, tagged by adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Sample {
    /// Synthetic intensity/quality pair
    Intensity(IntensitySample),
    /// Device orientation angle
    Orientation(OrientationSample),
    /// Pose estimator landmarks
    Pose(PoseSample),
}

impl Sample {
    /// Adapter this sample belongs to
    #[must_use]
    pub const fn kind(&self) -> SignalKind {
        match self {
            Self::Intensity(_) => SignalKind::Intensity,
            Self::Orientation(_) => SignalKind::Orientation,
            Self::Pose(_) => SignalKind::Pose,
        }
    }
}

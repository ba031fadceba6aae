// ABOUTME: Signal sources for fitness assessments: synthetic intensity, orientation, pose, replay
// ABOUTME: Core source trait, pose estimator abstraction, and circuit breaker for failing estimators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Signal source implementations and core abstractions.
//!
//! Every source produces at most one [`Sample`](crate::models::Sample) per
//! tick. Sources are explicit objects handed to the session controller; none
//! of them hold global state.

// Re-export assessment-core modules so source files can `use crate::errors::*` etc.
pub use assessment_core::constants;
pub use assessment_core::errors;
pub use assessment_core::models;

/// Circuit breaker guarding flaky estimators
pub mod circuit_breaker;
/// Core signal source trait
pub mod core;
/// Pose estimator abstraction and pose-backed source
pub mod pose;
/// Replay of recorded samples
pub mod scripted;
/// Seeded synthetic sources
pub mod synthetic;

pub use assessment_core::errors::provider::{ProviderError, ProviderResult};
pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use core::SignalSource;
pub use pose::{PoseEstimator, PoseSource, SyntheticPoseEstimator};
pub use scripted::ScriptedSource;
pub use synthetic::{
    MotionProfile, SyntheticAccelerometer, SyntheticIntensitySource, SyntheticOrientationSource,
    SyntheticTiltSource,
};

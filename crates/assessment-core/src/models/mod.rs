// ABOUTME: Core data models for the fitness assessment workspace
// ABOUTME: Re-exports samples, landmarks, session results, and badge tiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! This module contains the data structures shared by the counter, the signal
//! sources, and the result store.
//!
//! ## Core Models
//!
//! - `Sample`: One observation from a signal adapter (intensity, orientation, or pose)
//! - `SignalKind`: Which adapter a session was created for
//! - `SessionResult`: Immutable outcome of a finished session
//! - `Badge`: Tier label derived from a final score

mod badge;
mod result;
mod sample;

pub use badge::Badge;
pub use result::{SessionResult, SessionStatus, TestType};
pub use sample::{
    IntensitySample, Landmark, LandmarkName, OrientationSample, PoseSample, Sample, SignalKind,
};

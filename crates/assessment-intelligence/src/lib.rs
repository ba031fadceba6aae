// ABOUTME: Rep counting state machine, liveness monitor, and signal geometry
// ABOUTME: Turns noisy per-tick samples into monotone rep counts with attention checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Assessment Intelligence
//!
//! The algorithmic core of the fitness assessment:
//!
//! - **`rep_counter`**: hysteresis state machine producing monotone rep counts
//! - **liveness**: inactivity and attention-loss termination policy
//! - **signal**: torso angle and face presence from landmarks, inclination from gravity
//! - **form**: smoothed form/confidence scores and coaching feedback
//! - **jump**: peak-acceleration vertical jump scoring
//!
//! Everything here is synchronous and clock-free: callers pass monotonic
//! millisecond timestamps.

// Re-export core modules so algorithm files can `use crate::models::*` etc.
pub use assessment_core::constants;
pub use assessment_core::errors;
pub use assessment_core::models;

/// Counter configuration and validation
pub mod config;
/// Form scoring and coaching feedback
pub mod form;
/// Vertical jump peak tracker
pub mod jump;
/// Inactivity and attention-loss policy
pub mod liveness;
/// Repetition counting state machine
pub mod rep_counter;
/// Signal adapter geometry
pub mod signal;

pub use config::{ConfigError, CounterConfig};
pub use form::{assessment_feedback, FormTracker};
pub use jump::{JumpSnapshot, JumpTracker};
pub use liveness::{LivenessMonitor, Termination};
pub use rep_counter::{CounterSnapshot, Phase, RepCounter, SnapshotDebug};

// ABOUTME: Configuration module for assessment sessions
// ABOUTME: Re-exports environment-driven session configuration and counter presets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration for assessment sessions
//!
//! - **Environment**: tick interval, results path, and fallback policy from `ASSESSMENT_*`
//! - **Counter**: thresholds and liveness limits, re-exported from the intelligence crate

/// Environment and session configuration
pub mod environment;

pub use assessment_intelligence::config::{ConfigError, CounterConfig};
pub use environment::{default_results_path, AssessmentConfig};

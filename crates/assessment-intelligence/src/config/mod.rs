// ABOUTME: Configuration module for assessment-intelligence crate
// ABOUTME: Re-exports counter configuration and validation error types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Rep counter thresholds and liveness windows
pub mod counter;
/// Validation error types
pub mod error;

pub use counter::CounterConfig;
pub use error::ConfigError;

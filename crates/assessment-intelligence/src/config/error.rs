// ABOUTME: Configuration error types for counter configuration validation
// ABOUTME: Defines error variants for invalid ranges, threshold ordering, and parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types for counter configuration validation.

use assessment_core::errors::{AppError, ErrorCode};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value outside acceptable range (e.g., angle not between 0-90)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Up threshold must sit strictly below the down threshold
    #[error("Invalid thresholds: up ({up}) must be below down ({down})")]
    ThresholdOrder {
        /// Configured up threshold
        up: f64,
        /// Configured down threshold
        down: f64,
    },

    /// Required configuration field is missing
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Failed to parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::new(ErrorCode::ConfigInvalid, error.to_string()).with_source(error)
    }
}

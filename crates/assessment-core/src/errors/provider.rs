// ABOUTME: Structured error types for signal source operations
// ABOUTME: Distinguishes session-fatal initialization failures from droppable per-tick failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Errors raised by signal sources (sensors, pose estimators, synthetic generators)
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Source could not be brought up at session start
    #[error("Signal source '{source_name}' failed to initialize: {reason}")]
    InitializationFailed {
        /// Name of the failing source
        source_name: String,
        /// Why initialization failed
        reason: String,
    },

    /// Source is not usable (not initialized, torn down, poisoned state)
    #[error("Signal source '{source_name}' is unavailable: {reason}")]
    Unavailable {
        /// Name of the unavailable source
        source_name: String,
        /// Why the source is unavailable
        reason: String,
    },

    /// A single capture failed; the tick is lost but the session continues
    #[error("Capture failed on '{source_name}': {reason}")]
    CaptureFailed {
        /// Name of the source
        source_name: String,
        /// Failure details
        reason: String,
    },

    /// Pose inference failed for a single frame
    #[error("Pose inference failed on '{source_name}': {reason}")]
    InferenceFailed {
        /// Name of the estimator
        source_name: String,
        /// Failure details
        reason: String,
    },

    /// Circuit breaker is open after repeated failures; captures are skipped
    #[error("Signal source '{source_name}' circuit open, retry in {retry_after_ms} ms")]
    CircuitOpen {
        /// Name of the source
        source_name: String,
        /// Milliseconds until a recovery attempt is allowed
        retry_after_ms: u64,
    },

    /// A scripted source has no more samples to replay
    #[error("Signal source '{source_name}' has no more samples")]
    Exhausted {
        /// Name of the source
        source_name: String,
    },
}

impl ProviderError {
    /// Whether this error only costs the current tick (the session keeps running)
    #[must_use]
    pub const fn is_per_tick(&self) -> bool {
        matches!(
            self,
            Self::CaptureFailed { .. } | Self::InferenceFailed { .. } | Self::CircuitOpen { .. }
        )
    }
}

/// Result alias for signal source operations
pub type ProviderResult<T> = Result<T, ProviderError>;

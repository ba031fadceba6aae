// ABOUTME: Main library entry point for the fitness assessment engine
// ABOUTME: Wires signal sources, the rep counter, and result storage into timed sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fitness Assessment
//!
//! Counts sit-up repetitions from a per-tick signal (synthetic intensity,
//! device orientation, or camera pose landmarks), stops the session when the
//! subject goes idle or leaves the frame, and records the outcome.
//!
//! ## Architecture
//!
//! - **Signal sources** (`assessment-providers`): produce one sample per tick
//! - **Rep counter** (`assessment-intelligence`): hysteresis state machine and liveness policy
//! - **Session controller**: fixed-rate polling loop with droppable ticks
//! - **Result store**: append-only history, leaderboard, badges
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fitness_assessment::config::AssessmentConfig;
//! use fitness_assessment::providers::{MotionProfile, SyntheticOrientationSource};
//! use fitness_assessment::session::SessionController;
//! use fitness_assessment::store::MemoryResultStore;
//! use fitness_assessment::models::TestType;
//!
//! # async fn demo() -> fitness_assessment::errors::AppResult<()> {
//! let config = AssessmentConfig::default();
//! let source = Arc::new(SyntheticOrientationSource::new(MotionProfile::default().with_reps(5), 42));
//! let store = Arc::new(MemoryResultStore::new());
//! let handle = SessionController::new(config, source, store).start(TestType::Situp).await?;
//! let outcome = handle.finished().await?;
//! println!("{} reps", outcome.result.rep_count);
//! # Ok(())
//! # }
//! ```

pub use assessment_core::constants;
pub use assessment_core::errors;
pub use assessment_core::models;
pub use assessment_intelligence as intelligence;
pub use assessment_providers as providers;

/// Environment-driven configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// Session controller and tick gate
pub mod session;

/// Result persistence
pub mod store;

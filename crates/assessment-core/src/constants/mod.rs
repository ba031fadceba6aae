// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Counter defaults, session messages, badge cutoffs, and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat namespace.

/// Default rep counter thresholds and liveness windows
pub mod counter {
    /// Torso angle (from vertical) at or below which the subject is "up"
    pub const DEFAULT_UP_THRESHOLD_DEG: f64 = 35.0;
    /// Torso angle (from vertical) at or above which the subject is "down"
    pub const DEFAULT_DOWN_THRESHOLD_DEG: f64 = 70.0;
    /// Minimum angle change between ticks that counts as movement
    pub const DEFAULT_MIN_DELTA_TO_MOVE_DEG: f64 = 5.0;
    /// Session ends as inactive after this long without movement
    pub const DEFAULT_MAX_NO_MOVE_MS: u64 = 5_000;
    /// Session ends as invalid after this long without a visible subject
    pub const DEFAULT_MAX_NO_FACE_MS: u64 = 3_000;
    /// Minimum facial landmark confidence for the subject to count as visible
    pub const DEFAULT_FACE_SCORE_THRESHOLD: f64 = 0.4;
    /// Trailing visibility window used by the pose preset
    pub const POSE_FACE_WINDOW_MS: u64 = 2_000;
    /// Minimum visible fraction of the trailing window for the pose preset
    pub const POSE_FACE_MIN_VISIBLE_RATE: f64 = 0.3;
    /// Average intensity the synthetic adapter must exceed to record a rep
    pub const DEFAULT_MOVEMENT_THRESHOLD: f64 = 0.3;
    /// Number of trailing intensity samples averaged by the synthetic adapter
    pub const DEFAULT_INTENSITY_WINDOW: usize = 3;
    /// Time that must pass after an intensity rep before the next one counts
    pub const DEFAULT_MIN_REP_INTERVAL_MS: u64 = 2_500;
    /// Largest angle the counter works with
    pub const MAX_ANGLE_DEG: f64 = 90.0;
}

/// Human-readable session messages (UI-facing, not used for logic)
pub mod messages {
    /// Attention-loss termination
    pub const SUBJECT_NOT_VISIBLE: &str = "subject not visible";
    /// Inactivity termination
    pub const INACTIVE_TOO_LONG: &str = "inactive too long";
    /// Explicit stop by the controller or user
    pub const STOPPED: &str = "session stopped";
}

/// Form and confidence scoring constants
pub mod form {
    /// Form score every session starts from
    pub const INITIAL_FORM_SCORE: f64 = 85.0;
    /// Lowest target form score (quality 0)
    pub const FORM_TARGET_BASE: f64 = 70.0;
    /// Target range added on top of the base for quality 1
    pub const FORM_TARGET_SPAN: f64 = 25.0;
    /// Weight of the new target in the exponential smoothing step
    pub const FORM_SMOOTHING: f64 = 0.1;
    /// Trailing quality observations averaged per update
    pub const QUALITY_WINDOW: usize = 3;
    /// Confidence gained per quality observation
    pub const CONFIDENCE_STEP: f64 = 2.0;
    /// Confidence ceiling
    pub const MAX_CONFIDENCE: f64 = 95.0;
}

/// Badge tier cutoffs
pub mod badges {
    /// Scores strictly above this earn Gold
    pub const GOLD_ABOVE: u32 = 20;
    /// Scores at or above this (and not Gold) earn Silver
    pub const SILVER_FROM: u32 = 10;
    /// Default number of leaderboard entries
    pub const LEADERBOARD_SIZE: usize = 5;
}

/// Vertical jump scoring constants
pub mod jump {
    /// Centimetres of estimated height per g of peak acceleration above 1 g
    pub const CM_PER_G: f64 = 30.0;
    /// Tracking stops after this long without a new peak
    pub const DEFAULT_MAX_IDLE_MS: u64 = 5_000;
    /// Accelerometer sampling period
    pub const SAMPLE_INTERVAL_MS: u64 = 50;
}

/// Session controller timing
pub mod session {
    /// Default tick interval between samples
    pub const DEFAULT_TICK_INTERVAL_MS: u64 = 250;
    /// Smallest accepted tick interval
    pub const MIN_TICK_INTERVAL_MS: u64 = 50;
    /// Largest accepted tick interval
    pub const MAX_TICK_INTERVAL_MS: u64 = 1_000;
    /// File name of the JSON result store inside the data directory
    pub const RESULTS_FILE_NAME: &str = "results.json";
    /// Application directory name under the user data directory
    pub const APP_DIR_NAME: &str = "fitness-assessment";
    /// User ID recorded for results when no profile is signed in
    pub const LOCAL_USER_ID: &str = "local";
}

/// Environment variable names read by the configuration layer
pub mod env_config {
    /// Up threshold override (degrees)
    pub const UP_THRESHOLD_DEG: &str = "ASSESSMENT_UP_THRESHOLD_DEG";
    /// Down threshold override (degrees)
    pub const DOWN_THRESHOLD_DEG: &str = "ASSESSMENT_DOWN_THRESHOLD_DEG";
    /// Minimum movement delta override (degrees)
    pub const MIN_DELTA_TO_MOVE_DEG: &str = "ASSESSMENT_MIN_DELTA_TO_MOVE_DEG";
    /// Inactivity window override (ms)
    pub const MAX_NO_MOVE_MS: &str = "ASSESSMENT_MAX_NO_MOVE_MS";
    /// Visibility window override (ms)
    pub const MAX_NO_FACE_MS: &str = "ASSESSMENT_MAX_NO_FACE_MS";
    /// Facial confidence floor override
    pub const FACE_SCORE_THRESHOLD: &str = "ASSESSMENT_FACE_SCORE_THRESHOLD";
    /// Minimum spacing between intensity reps override (ms)
    pub const MIN_REP_INTERVAL_MS: &str = "ASSESSMENT_MIN_REP_INTERVAL_MS";
    /// Tick interval override (ms)
    pub const TICK_INTERVAL_MS: &str = "ASSESSMENT_TICK_INTERVAL_MS";
    /// Result store file path override
    pub const RESULTS_PATH: &str = "ASSESSMENT_RESULTS_PATH";
    /// Fall back to the orientation adapter when the pose adapter cannot start
    pub const ORIENTATION_FALLBACK: &str = "ASSESSMENT_ORIENTATION_FALLBACK";
}

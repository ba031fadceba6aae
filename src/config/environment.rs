// ABOUTME: Environment configuration for assessment sessions
// ABOUTME: Parses ASSESSMENT_* variables on top of defaults and validates the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based session configuration

use crate::constants::counter::{POSE_FACE_MIN_VISIBLE_RATE, POSE_FACE_WINDOW_MS};
use crate::constants::env_config;
use crate::constants::session::{
    APP_DIR_NAME, DEFAULT_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS,
    RESULTS_FILE_NAME,
};
use crate::models::SignalKind;
use anyhow::{anyhow, Context, Result};
use assessment_intelligence::config::CounterConfig;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Everything a session controller needs besides its source and store
#[derive(Debug, Clone)]
pub struct AssessmentConfig {
    /// Rep counter thresholds and liveness limits
    pub counter: CounterConfig,
    /// Time between ticks of the polling loop
    pub tick_interval: Duration,
    /// JSON file the CLI keeps its history in
    pub results_path: PathBuf,
    /// Fall back to device orientation when the pose estimator fails to start
    pub orientation_fallback: bool,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            counter: CounterConfig::default(),
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            results_path: default_results_path(),
            orientation_fallback: false,
        }
    }
}

impl AssessmentConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but unparseable, or the
    /// resulting configuration fails validation
    pub fn from_env() -> Result<Self> {
        let tick_interval_ms: u64 = env_var_or(
            env_config::TICK_INTERVAL_MS,
            &DEFAULT_TICK_INTERVAL_MS.to_string(),
        )
        .parse()
        .context("Invalid ASSESSMENT_TICK_INTERVAL_MS value")?;

        let orientation_fallback: bool = env_var_or(env_config::ORIENTATION_FALLBACK, "false")
            .parse()
            .context("Invalid ASSESSMENT_ORIENTATION_FALLBACK value")?;

        let results_path = env::var(env_config::RESULTS_PATH)
            .map_or_else(|_| default_results_path(), PathBuf::from);

        let config = Self {
            counter: CounterConfig::from_env().context("Invalid rep counter override")?,
            tick_interval: Duration::from_millis(tick_interval_ms),
            results_path,
            orientation_fallback,
        };

        config.validate()?;
        info!(
            tick_interval_ms,
            results_path = %config.results_path.display(),
            orientation_fallback,
            "assessment configuration loaded"
        );
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the tick interval is out of range or the counter
    /// configuration is invalid
    pub fn validate(&self) -> Result<()> {
        let tick_ms = self.tick_interval.as_millis();
        if !(u128::from(MIN_TICK_INTERVAL_MS)..=u128::from(MAX_TICK_INTERVAL_MS)).contains(&tick_ms)
        {
            return Err(anyhow!(
                "Tick interval must be between {MIN_TICK_INTERVAL_MS} and {MAX_TICK_INTERVAL_MS} ms, got {tick_ms}"
            ));
        }
        self.counter
            .validate()
            .context("Invalid rep counter configuration")?;
        Ok(())
    }

    /// Counter configuration for a session fed by `kind`
    ///
    /// Pose sessions get the windowed visibility check unless one is
    /// configured already.
    #[must_use]
    pub fn counter_for(&self, kind: SignalKind) -> CounterConfig {
        let counter = self.counter.clone();
        if kind == SignalKind::Pose && counter.face_window_ms.is_none() {
            return counter
                .with_visibility_window(POSE_FACE_WINDOW_MS, POSE_FACE_MIN_VISIBLE_RATE);
        }
        counter
    }
}

/// Default results file under the user's data directory
#[must_use]
pub fn default_results_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(RESULTS_FILE_NAME)
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

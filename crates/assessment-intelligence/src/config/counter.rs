// ABOUTME: Rep counter configuration with thresholds, liveness limits, and adapter tuning
// ABOUTME: Provides defaults, a pose preset, environment overrides, and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ConfigError;
use crate::constants::counter::{
    DEFAULT_DOWN_THRESHOLD_DEG, DEFAULT_FACE_SCORE_THRESHOLD, DEFAULT_INTENSITY_WINDOW,
    DEFAULT_MAX_NO_FACE_MS, DEFAULT_MAX_NO_MOVE_MS, DEFAULT_MIN_DELTA_TO_MOVE_DEG,
    DEFAULT_MIN_REP_INTERVAL_MS, DEFAULT_MOVEMENT_THRESHOLD, DEFAULT_UP_THRESHOLD_DEG, MAX_ANGLE_DEG, POSE_FACE_MIN_VISIBLE_RATE,
    POSE_FACE_WINDOW_MS,
};
use crate::constants::env_config;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::warn;

/// Rep counter configuration
///
/// Angles are measured from vertical: 0 is fully upright, 90 is lying flat.
/// A repetition is one excursion past `down_threshold_deg` followed by a
/// return past `up_threshold_deg`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterConfig {
    /// Angle at or below which the subject is in the up phase
    pub up_threshold_deg: f64,
    /// Angle at or above which the subject is in the down phase
    pub down_threshold_deg: f64,
    /// Minimum angle change between readings that counts as motion
    pub min_delta_to_move_deg: f64,
    /// Inactivity limit before the session ends as valid
    pub max_no_move_ms: u64,
    /// Attention-loss limit before the session ends as invalid
    pub max_no_face_ms: u64,
    /// Sliding window for the visible-rate check (disabled when `None`)
    pub face_window_ms: Option<u64>,
    /// Minimum fraction of visible observations inside the window
    pub face_min_visible_rate: Option<f64>,
    /// Landmark confidence above which the face counts as visible
    pub face_score_threshold: f64,
    /// Intensity above which a sample counts as motion
    pub movement_threshold: f64,
    /// Number of intensity samples averaged for rep detection
    pub intensity_window: usize,
    /// An intensity rep only counts once more than this has passed since the previous one
    pub min_rep_interval_ms: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            up_threshold_deg: DEFAULT_UP_THRESHOLD_DEG,
            down_threshold_deg: DEFAULT_DOWN_THRESHOLD_DEG,
            min_delta_to_move_deg: DEFAULT_MIN_DELTA_TO_MOVE_DEG,
            max_no_move_ms: DEFAULT_MAX_NO_MOVE_MS,
            max_no_face_ms: DEFAULT_MAX_NO_FACE_MS,
            face_window_ms: None,
            face_min_visible_rate: None,
            face_score_threshold: DEFAULT_FACE_SCORE_THRESHOLD,
            movement_threshold: DEFAULT_MOVEMENT_THRESHOLD,
            intensity_window: DEFAULT_INTENSITY_WINDOW,
            min_rep_interval_ms: DEFAULT_MIN_REP_INTERVAL_MS,
        }
    }
}

impl CounterConfig {
    /// Preset for camera pose sessions, with the windowed visibility check enabled
    #[must_use]
    pub fn pose() -> Self {
        Self::default().with_visibility_window(POSE_FACE_WINDOW_MS, POSE_FACE_MIN_VISIBLE_RATE)
    }

    /// Enable the windowed visible-rate check
    #[must_use]
    pub const fn with_visibility_window(mut self, window_ms: u64, min_rate: f64) -> Self {
        self.face_window_ms = Some(window_ms);
        self.face_min_visible_rate = Some(min_rate);
        self
    }

    /// Override the phase thresholds
    #[must_use]
    pub const fn with_thresholds(mut self, up_deg: f64, down_deg: f64) -> Self {
        self.up_threshold_deg = up_deg;
        self.down_threshold_deg = down_deg;
        self
    }

    /// Apply `ASSESSMENT_*` environment overrides on top of `self`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] naming the variable when a set value
    /// does not parse
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        Ok(Self {
            up_threshold_deg: env_or(env_config::UP_THRESHOLD_DEG, self.up_threshold_deg)?,
            down_threshold_deg: env_or(env_config::DOWN_THRESHOLD_DEG, self.down_threshold_deg)?,
            min_delta_to_move_deg: env_or(
                env_config::MIN_DELTA_TO_MOVE_DEG,
                self.min_delta_to_move_deg,
            )?,
            max_no_move_ms: env_or(env_config::MAX_NO_MOVE_MS, self.max_no_move_ms)?,
            max_no_face_ms: env_or(env_config::MAX_NO_FACE_MS, self.max_no_face_ms)?,
            face_score_threshold: env_or(
                env_config::FACE_SCORE_THRESHOLD,
                self.face_score_threshold,
            )?,
            min_rep_interval_ms: env_or(
                env_config::MIN_REP_INTERVAL_MS,
                self.min_rep_interval_ms,
            )?,
            ..self
        })
    }

    /// Load defaults with environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Validate thresholds and limits
    ///
    /// # Errors
    ///
    /// Returns an error if thresholds are out of range or misordered, or a
    /// limit is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let angle_ok = |v: f64| v.is_finite() && (0.0..=MAX_ANGLE_DEG).contains(&v);
        if !angle_ok(self.up_threshold_deg) {
            return Err(ConfigError::InvalidRange(
                "up_threshold_deg must be between 0 and 90",
            ));
        }
        if !angle_ok(self.down_threshold_deg) {
            return Err(ConfigError::InvalidRange(
                "down_threshold_deg must be between 0 and 90",
            ));
        }
        if self.up_threshold_deg >= self.down_threshold_deg {
            return Err(ConfigError::ThresholdOrder {
                up: self.up_threshold_deg,
                down: self.down_threshold_deg,
            });
        }
        if !self.min_delta_to_move_deg.is_finite() || self.min_delta_to_move_deg < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "min_delta_to_move_deg must be non-negative",
            ));
        }
        if self.max_no_move_ms == 0 {
            return Err(ConfigError::ValueOutOfRange("max_no_move_ms must be positive"));
        }
        if self.max_no_face_ms == 0 {
            return Err(ConfigError::ValueOutOfRange("max_no_face_ms must be positive"));
        }
        if !(0.0..=1.0).contains(&self.face_score_threshold) {
            return Err(ConfigError::InvalidRange(
                "face_score_threshold must be between 0 and 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.movement_threshold) {
            return Err(ConfigError::InvalidRange(
                "movement_threshold must be between 0 and 1",
            ));
        }
        if self.intensity_window == 0 {
            return Err(ConfigError::ValueOutOfRange("intensity_window must be positive"));
        }
        match (self.face_window_ms, self.face_min_visible_rate) {
            (None, None) => Ok(()),
            (Some(0), _) => Err(ConfigError::ValueOutOfRange("face_window_ms must be positive")),
            (Some(_), Some(rate)) if (0.0..=1.0).contains(&rate) => Ok(()),
            (Some(_), Some(_)) => Err(ConfigError::InvalidRange(
                "face_min_visible_rate must be between 0 and 1",
            )),
            (Some(_), None) => Err(ConfigError::MissingField("face_min_visible_rate")),
            (None, Some(_)) => Err(ConfigError::MissingField("face_window_ms")),
        }
    }
}

/// Parse `key` when set, keeping `default` when it is not
fn env_or<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };
    raw.trim().parse().map_err(|_| {
        warn!(key, value = %raw, "unparseable rep counter override");
        ConfigError::Parse(format!("{key}={raw}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CounterConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.face_window_ms.is_none());
        assert!(config.up_threshold_deg < config.down_threshold_deg);
    }

    #[test]
    fn test_pose_preset_enables_window() {
        let config = CounterConfig::pose();
        assert_eq!(config.face_window_ms, Some(POSE_FACE_WINDOW_MS));
        assert_eq!(config.face_min_visible_rate, Some(POSE_FACE_MIN_VISIBLE_RATE));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_misordered_thresholds_rejected() {
        let config = CounterConfig::default().with_thresholds(70.0, 35.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOrder { .. })
        ));

        let equal = CounterConfig::default().with_thresholds(50.0, 50.0);
        assert!(equal.validate().is_err());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let config = CounterConfig::default().with_thresholds(-5.0, 70.0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));

        let config = CounterConfig {
            max_no_move_ms: 0,
            ..CounterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_half_configured_window_rejected() {
        let config = CounterConfig {
            face_window_ms: Some(2_000),
            ..CounterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField("face_min_visible_rate"))
        ));
    }
}

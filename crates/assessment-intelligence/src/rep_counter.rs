// ABOUTME: Repetition counting state machine with hysteresis and liveness termination
// ABOUTME: Consumes per-tick samples and produces monotone counts plus session status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Rep Counter
//!
//! One counter is owned by one session. The state machine has two phases,
//! separated by a hysteresis band so that jitter around a single threshold
//! can never produce a repetition:
//!
//! ```text
//!            angle >= down_threshold (re-arm)
//!      Up  ------------------------------------>  Down
//!          <------------------------------------
//!            angle <= up_threshold (count += 1)
//! ```
//!
//! The first angle of a session only aligns the phase with the starting
//! posture. Every later update changes the count by at most one.
//!
//! The intensity adapter has no angle. It counts a repetition when the
//! trailing average intensity exceeds the movement threshold and more than
//! `min_rep_interval_ms` has passed since the previous repetition.
//!
//! Termination is delegated to [`LivenessMonitor`]. Once a session is
//! inactive every call returns the same frozen snapshot.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, CounterConfig};
use crate::constants::messages::STOPPED;
use crate::form::FormTracker;
use crate::liveness::{LivenessMonitor, Termination};
use crate::models::{OrientationSample, Sample, SessionStatus, SignalKind};
use crate::signal::{self, Reading};

/// Torso phase of the movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Reclined past the down threshold (initial phase)
    Down,
    /// Upright past the up threshold
    Up,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Down => f.write_str("down"),
            Self::Up => f.write_str("up"),
        }
    }
}

/// Diagnostic values for tuning and display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDebug {
    /// Most recent torso angle
    pub last_angle: Option<f64>,
    /// Time since the subject was last visible
    pub last_subject_visible_ago_ms: u64,
    /// Time since the last motion event
    pub last_motion_ago_ms: u64,
    /// Visible fraction of the sliding window, when enabled
    pub visible_rate: Option<f64>,
}

/// Point-in-time view of a counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    /// Current phase
    pub phase: Phase,
    /// Completed repetitions
    pub count: u32,
    /// Whether the session is still trusted
    pub status: SessionStatus,
    /// Latest user-facing message
    pub message: Option<String>,
    /// Whether the counter still accepts samples
    pub active: bool,
    /// Monotonic start time
    pub started_at: u64,
    /// Monotonic stop time, set iff inactive
    pub stopped_at: Option<u64>,
    /// `(stopped_at or now) - started_at`
    pub duration_ms: u64,
    /// Smoothed form score, when quality was observed
    pub form_score: Option<f64>,
    /// Confidence in the form score
    pub confidence_score: f64,
    /// Diagnostic values
    pub debug: SnapshotDebug,
}

/// Repetition counter for one session
#[derive(Debug, Clone)]
pub struct RepCounter {
    kind: SignalKind,
    config: CounterConfig,
    phase: Phase,
    count: u32,
    status: SessionStatus,
    active: bool,
    message: Option<String>,
    last_angle: Option<f64>,
    started_at: u64,
    stopped_at: Option<u64>,
    liveness: LivenessMonitor,
    form: FormTracker,
    intensities: VecDeque<f64>,
    last_rep_at: Option<u64>,
    visibility_supplied: bool,
}

impl RepCounter {
    /// Start a counter for a session fed by `kind` samples
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation
    pub fn new(kind: SignalKind, config: CounterConfig, now: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            kind = %kind,
            up = config.up_threshold_deg,
            down = config.down_threshold_deg,
            "rep counter started"
        );
        Ok(Self {
            kind,
            liveness: LivenessMonitor::new(&config, now),
            intensities: VecDeque::with_capacity(config.intensity_window),
            config,
            phase: Phase::Down,
            count: 0,
            status: SessionStatus::Valid,
            active: true,
            message: None,
            last_angle: None,
            started_at: now,
            stopped_at: None,
            form: FormTracker::new(),
            last_rep_at: None,
            visibility_supplied: false,
        })
    }

    /// Ingest one sample observed at `now`
    ///
    /// Malformed or mismatched samples skip counting but still run the
    /// visibility and termination bookkeeping.
    pub fn update(&mut self, sample: &Sample, now: u64) -> CounterSnapshot {
        if !self.active {
            return self.snapshot(now);
        }
        if sample.kind() != self.kind {
            warn!(
                expected = %self.kind,
                received = %sample.kind(),
                "sample kind does not match session adapter, ignoring"
            );
            return self.poll(now);
        }

        if matches!(
            sample,
            Sample::Orientation(OrientationSample {
                subject_visible: Some(_),
                ..
            })
        ) {
            self.visibility_supplied = true;
        }

        let reading = signal::read(sample, self.config.face_score_threshold);
        self.apply(&reading, now);
        self.liveness.record_visibility(reading.visible, now);
        self.check_termination(now);
        self.snapshot(now)
    }

    /// Evaluate termination at `now` without a new sample
    ///
    /// Orientation and intensity adapters cannot observe visibility, so a
    /// tick counts as the subject being present. Once the caller has
    /// supplied visibility on a sample, or for pose sessions, a tick without
    /// a sample is no evidence either way.
    pub fn poll(&mut self, now: u64) -> CounterSnapshot {
        if !self.active {
            return self.snapshot(now);
        }
        if self.kind != SignalKind::Pose && !self.visibility_supplied {
            self.liveness.record_visibility(true, now);
        }
        self.check_termination(now);
        self.snapshot(now)
    }

    /// Stop the session; idempotent
    pub fn stop(&mut self, now: u64) -> CounterSnapshot {
        if self.active {
            self.finish(now);
            self.message = Some(STOPPED.to_owned());
            info!(count = self.count, status = %self.status, "session stopped");
        }
        self.snapshot(now)
    }

    /// Current view of the counter
    ///
    /// Once stopped, all ages are measured at the stop time, so repeated
    /// snapshots are identical.
    #[must_use]
    pub fn snapshot(&self, now: u64) -> CounterSnapshot {
        let reference = self.stopped_at.unwrap_or(now);
        CounterSnapshot {
            phase: self.phase,
            count: self.count,
            status: self.status,
            message: self.message.clone(),
            active: self.active,
            started_at: self.started_at,
            stopped_at: self.stopped_at,
            duration_ms: reference.saturating_sub(self.started_at),
            form_score: self.form.form_score(),
            confidence_score: self.form.confidence(),
            debug: SnapshotDebug {
                last_angle: self.last_angle,
                last_subject_visible_ago_ms: self.liveness.visibility_age_ms(reference),
                last_motion_ago_ms: self.liveness.motion_age_ms(reference),
                visible_rate: self.liveness.visible_rate(),
            },
        }
    }

    /// Completed repetitions
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Current status
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// Whether the counter still accepts samples
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Adapter this counter expects
    #[must_use]
    pub const fn kind(&self) -> SignalKind {
        self.kind
    }

    /// Validated configuration
    #[must_use]
    pub const fn config(&self) -> &CounterConfig {
        &self.config
    }

    fn apply(&mut self, reading: &Reading, now: u64) {
        if let Some(quality) = reading.quality {
            self.form.observe(quality);
        }
        if let Some(intensity) = reading.intensity {
            self.apply_intensity(intensity, now);
        } else if let Some(angle) = reading.angle_deg {
            self.apply_angle(angle, now);
        }
    }

    fn apply_angle(&mut self, angle: f64, now: u64) {
        let Some(previous) = self.last_angle.replace(angle) else {
            if angle <= self.config.up_threshold_deg {
                self.phase = Phase::Up;
            } else if angle >= self.config.down_threshold_deg {
                self.phase = Phase::Down;
            }
            return;
        };

        if (angle - previous).abs() >= self.config.min_delta_to_move_deg {
            self.liveness.record_motion(now);
        }

        match self.phase {
            Phase::Down if angle <= self.config.up_threshold_deg => {
                self.phase = Phase::Up;
                self.complete_rep();
            }
            Phase::Up if angle >= self.config.down_threshold_deg => {
                self.phase = Phase::Down;
            }
            _ => {}
        }
    }

    fn apply_intensity(&mut self, intensity: f64, now: u64) {
        if !intensity.is_finite() {
            return;
        }
        if self.intensities.len() == self.config.intensity_window {
            self.intensities.pop_front();
        }
        self.intensities.push_back(intensity);

        if intensity > self.config.movement_threshold {
            self.liveness.record_motion(now);
        }
        if self.intensities.len() >= 2 {
            let average = self.intensities.iter().sum::<f64>() / self.intensities.len() as f64;
            let too_soon = self
                .last_rep_at
                .is_some_and(|last| now.saturating_sub(last) <= self.config.min_rep_interval_ms);
            if average > self.config.movement_threshold && !too_soon {
                self.last_rep_at = Some(now);
                self.complete_rep();
            }
        }
    }

    fn complete_rep(&mut self) {
        self.count = self.count.saturating_add(1);
        self.message = Some(format!("rep {} completed", self.count));
        debug!(count = self.count, "rep completed");
    }

    fn check_termination(&mut self, now: u64) {
        let Some(termination) = self.liveness.evaluate(now) else {
            return;
        };
        self.finish(now);
        self.status = termination.status();
        self.message = Some(termination.message().to_owned());
        match termination {
            Termination::AttentionLost => warn!(
                count = self.count,
                visible_ago_ms = self.liveness.visibility_age_ms(now),
                "session invalidated: subject not visible"
            ),
            Termination::Inactive => info!(
                count = self.count,
                motion_ago_ms = self.liveness.motion_age_ms(now),
                "session ended: inactive too long"
            ),
        }
    }

    fn finish(&mut self, now: u64) {
        self.active = false;
        self.stopped_at = Some(now);
    }
}

// ABOUTME: Vertical jump tracker scoring the peak vertical acceleration of a session
// ABOUTME: Converts peak g-force into an estimated height and stops after an idle period
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::jump::{CM_PER_G, DEFAULT_MAX_IDLE_MS};

/// Point-in-time view of a jump session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpSnapshot {
    /// Highest |z| seen so far, in g
    pub peak_g: f64,
    /// Estimated jump height score
    pub score: u32,
    /// Whether the tracker still accepts readings
    pub active: bool,
    /// Session length so far
    pub duration_ms: u64,
}

/// Tracks the peak vertical acceleration of one jump session
#[derive(Debug, Clone)]
pub struct JumpTracker {
    started_at: u64,
    last_peak_at: u64,
    stopped_at: Option<u64>,
    peak_g: f64,
    max_idle_ms: u64,
}

impl JumpTracker {
    /// Start a jump session at `now` with the default idle limit
    #[must_use]
    pub const fn new(now: u64) -> Self {
        Self::with_idle_limit(now, DEFAULT_MAX_IDLE_MS)
    }

    /// Start a jump session with a custom idle limit
    #[must_use]
    pub const fn with_idle_limit(now: u64, max_idle_ms: u64) -> Self {
        Self {
            started_at: now,
            last_peak_at: now,
            stopped_at: None,
            peak_g: 0.0,
            max_idle_ms,
        }
    }

    /// Feed a vertical acceleration reading in g
    pub fn update(&mut self, z_g: f64, now: u64) -> JumpSnapshot {
        if self.stopped_at.is_some() {
            return self.snapshot(now);
        }
        let magnitude = z_g.abs();
        if magnitude.is_finite() && magnitude > self.peak_g {
            self.peak_g = magnitude;
            self.last_peak_at = now;
            debug!(peak_g = magnitude, "new jump peak");
        }
        self.poll(now)
    }

    /// Deactivate once no new peak arrived within the idle limit
    pub fn poll(&mut self, now: u64) -> JumpSnapshot {
        if self.stopped_at.is_none() && now.saturating_sub(self.last_peak_at) > self.max_idle_ms {
            self.stopped_at = Some(now);
            info!(score = self.score(), "jump session finished");
        }
        self.snapshot(now)
    }

    /// Stop the session; later calls keep the first stop time
    pub fn stop(&mut self, now: u64) -> JumpSnapshot {
        if self.stopped_at.is_none() {
            self.stopped_at = Some(now);
        }
        self.snapshot(now)
    }

    /// Estimated height: 30 per g above resting gravity, never negative
    #[must_use]
    pub fn score(&self) -> u32 {
        ((self.peak_g - 1.0) * CM_PER_G).round().max(0.0) as u32
    }

    /// Current view of the session
    #[must_use]
    pub fn snapshot(&self, now: u64) -> JumpSnapshot {
        JumpSnapshot {
            peak_g: self.peak_g,
            score: self.score(),
            active: self.stopped_at.is_none(),
            duration_ms: self.stopped_at.unwrap_or(now).saturating_sub(self.started_at),
        }
    }
}

// ABOUTME: Liveness and attention monitor deciding when a session must terminate
// ABOUTME: Tracks motion and visibility timestamps plus a sliding visibility window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Termination policy for a running session.
//!
//! Two failure modes end a session. Inactivity is benign and leaves the
//! result valid. Attention loss is suspicious and marks the result invalid.
//! When both apply at the same instant, attention loss wins.

use std::collections::VecDeque;

use crate::config::CounterConfig;
use crate::constants::messages::{INACTIVE_TOO_LONG, SUBJECT_NOT_VISIBLE};
use crate::models::SessionStatus;

/// Why the monitor ended a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Subject not visible for too long, or too rarely within the window
    AttentionLost,
    /// No motion for too long
    Inactive,
}

impl Termination {
    /// Status the session ends with
    #[must_use]
    pub const fn status(self) -> SessionStatus {
        match self {
            Self::AttentionLost => SessionStatus::Invalid,
            Self::Inactive => SessionStatus::Valid,
        }
    }

    /// Terminal message shown to the user
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::AttentionLost => SUBJECT_NOT_VISIBLE,
            Self::Inactive => INACTIVE_TOO_LONG,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Observation {
    at_ms: u64,
    visible: bool,
}

#[derive(Debug, Clone, Copy)]
struct VisibilityWindow {
    window_ms: u64,
    min_visible_rate: f64,
}

/// Motion and visibility bookkeeping for one session
#[derive(Debug, Clone)]
pub struct LivenessMonitor {
    started_at: u64,
    last_motion_at: u64,
    last_visible_at: u64,
    max_no_move_ms: u64,
    max_no_face_ms: u64,
    window: Option<VisibilityWindow>,
    observations: VecDeque<Observation>,
}

impl LivenessMonitor {
    /// Start monitoring at `now`; both clocks begin fresh
    #[must_use]
    pub fn new(config: &CounterConfig, now: u64) -> Self {
        let window = match (config.face_window_ms, config.face_min_visible_rate) {
            (Some(window_ms), Some(min_visible_rate)) => Some(VisibilityWindow {
                window_ms,
                min_visible_rate,
            }),
            _ => None,
        };
        Self {
            started_at: now,
            last_motion_at: now,
            last_visible_at: now,
            max_no_move_ms: config.max_no_move_ms,
            max_no_face_ms: config.max_no_face_ms,
            window,
            observations: VecDeque::new(),
        }
    }

    /// Note that the subject moved at `now`
    pub fn record_motion(&mut self, now: u64) {
        self.last_motion_at = self.last_motion_at.max(now);
    }

    /// Note a visibility observation at `now`
    pub fn record_visibility(&mut self, visible: bool, now: u64) {
        if visible {
            self.last_visible_at = self.last_visible_at.max(now);
        }
        if let Some(window) = self.window {
            self.observations.push_back(Observation {
                at_ms: now,
                visible,
            });
            self.prune(window.window_ms, now);
        }
    }

    fn prune(&mut self, window_ms: u64, now: u64) {
        let cutoff = now.saturating_sub(window_ms);
        while self
            .observations
            .front()
            .is_some_and(|observation| observation.at_ms < cutoff)
        {
            self.observations.pop_front();
        }
    }

    /// Fraction of visible observations currently in the window
    ///
    /// `None` when the window is disabled or empty.
    #[must_use]
    pub fn visible_rate(&self) -> Option<f64> {
        if self.window.is_none() || self.observations.is_empty() {
            return None;
        }
        let visible = self.observations.iter().filter(|o| o.visible).count();
        Some(visible as f64 / self.observations.len() as f64)
    }

    /// Which termination applies at `now`, attention loss first
    #[must_use]
    pub fn evaluate(&mut self, now: u64) -> Option<Termination> {
        if self.attention_lost(now) {
            return Some(Termination::AttentionLost);
        }
        if now.saturating_sub(self.last_motion_at) > self.max_no_move_ms {
            return Some(Termination::Inactive);
        }
        None
    }

    fn attention_lost(&mut self, now: u64) -> bool {
        if now.saturating_sub(self.last_visible_at) > self.max_no_face_ms {
            return true;
        }
        let Some(window) = self.window else {
            return false;
        };
        // Only judge the rate once a full window of history could exist.
        if now.saturating_sub(self.started_at) < window.window_ms {
            return false;
        }
        self.prune(window.window_ms, now);
        self.visible_rate()
            .is_some_and(|rate| rate < window.min_visible_rate)
    }

    /// Milliseconds since the last motion event, relative to `now`
    #[must_use]
    pub const fn motion_age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.last_motion_at)
    }

    /// Milliseconds since the subject was last visible, relative to `now`
    #[must_use]
    pub const fn visibility_age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.last_visible_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(config: &CounterConfig) -> LivenessMonitor {
        LivenessMonitor::new(config, 0)
    }

    #[test]
    fn test_fresh_monitor_does_not_terminate() {
        let mut monitor = monitor(&CounterConfig::default());
        assert_eq!(monitor.evaluate(0), None);
        assert_eq!(monitor.evaluate(3_000), None);
    }

    #[test]
    fn test_inactivity_is_strictly_greater_than_limit() {
        let config = CounterConfig::default();
        let mut monitor = monitor(&config);
        monitor.record_visibility(true, config.max_no_move_ms);
        assert_eq!(monitor.evaluate(config.max_no_move_ms), None);
        monitor.record_visibility(true, config.max_no_move_ms + 1);
        assert_eq!(
            monitor.evaluate(config.max_no_move_ms + 1),
            Some(Termination::Inactive)
        );
    }

    #[test]
    fn test_attention_loss_wins_over_inactivity() {
        let mut monitor = monitor(&CounterConfig::default());
        let verdict = monitor.evaluate(10_000);
        assert_eq!(verdict, Some(Termination::AttentionLost));
        assert_eq!(verdict.map(Termination::status), Some(SessionStatus::Invalid));
    }

    #[test]
    fn test_window_rate_waits_for_full_window() {
        let config = CounterConfig::pose();
        let mut monitor = monitor(&config);
        monitor.record_motion(500);
        monitor.record_visibility(false, 500);
        assert_eq!(monitor.evaluate(500), None);
        assert_eq!(monitor.visible_rate(), Some(0.0));
    }

    #[test]
    fn test_window_rate_below_minimum_terminates() {
        let config = CounterConfig::pose();
        let mut monitor = monitor(&config);
        // One visible observation in ten keeps the last-seen clock fresh but the rate low.
        for step in 0..10_u64 {
            let now = 2_000 + step * 100;
            monitor.record_motion(now);
            monitor.record_visibility(step == 9, now);
        }
        let rate = monitor.visible_rate().unwrap();
        assert!(rate < 0.3);
        assert_eq!(monitor.evaluate(2_900), Some(Termination::AttentionLost));
    }

    #[test]
    fn test_window_drops_stale_observations() {
        let config = CounterConfig::pose();
        let mut monitor = monitor(&config);
        monitor.record_visibility(false, 100);
        monitor.record_visibility(true, 2_500);
        assert_eq!(monitor.visible_rate(), Some(1.0));
    }

    #[test]
    fn test_window_disabled_reports_no_rate() {
        let mut monitor = monitor(&CounterConfig::default());
        monitor.record_visibility(false, 100);
        assert_eq!(monitor.visible_rate(), None);
    }
}

// ABOUTME: Form scoring from movement quality and coaching feedback generation
// ABOUTME: Smooths quality observations into a form score with a growing confidence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::VecDeque;

use crate::constants::form::{
    CONFIDENCE_STEP, FORM_SMOOTHING, FORM_TARGET_BASE, FORM_TARGET_SPAN, INITIAL_FORM_SCORE,
    MAX_CONFIDENCE, QUALITY_WINDOW,
};

/// Smoothed form score and analysis confidence
///
/// Each quality observation moves the score a fixed fraction toward a target
/// derived from the recent average quality, so a single bad frame cannot
/// swing the result.
#[derive(Debug, Clone, Default)]
pub struct FormTracker {
    form_score: Option<f64>,
    confidence: f64,
    recent_quality: VecDeque<f64>,
}

impl FormTracker {
    /// Tracker with no observations
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one movement-quality observation in [0, 1]
    pub fn observe(&mut self, quality: f64) {
        if !quality.is_finite() {
            return;
        }
        if self.recent_quality.len() == QUALITY_WINDOW {
            self.recent_quality.pop_front();
        }
        self.recent_quality.push_back(quality.clamp(0.0, 1.0));

        let average = self.recent_quality.iter().sum::<f64>() / self.recent_quality.len() as f64;
        let target = average.mul_add(FORM_TARGET_SPAN, FORM_TARGET_BASE);
        let current = self.form_score.unwrap_or(INITIAL_FORM_SCORE);
        self.form_score = Some(current.mul_add(1.0 - FORM_SMOOTHING, target * FORM_SMOOTHING));
        self.confidence = (self.confidence + CONFIDENCE_STEP).min(MAX_CONFIDENCE);
    }

    /// Current form score, `None` until the first observation
    #[must_use]
    pub const fn form_score(&self) -> Option<f64> {
        self.form_score
    }

    /// Confidence in the form score, 0 to 95
    #[must_use]
    pub const fn confidence(&self) -> f64 {
        self.confidence
    }
}

/// Coaching lines for a finished assessment, most important first
#[must_use]
pub fn assessment_feedback(form_score: f64, reps: u32, confidence: f64) -> Vec<&'static str> {
    let mut feedback = Vec::with_capacity(3);

    feedback.push(if form_score > 90.0 {
        "🌟 Excellent form! Your technique is outstanding."
    } else if form_score > 80.0 {
        "✅ Good form! Small improvements can boost your score."
    } else if form_score > 70.0 {
        "⚠️ Focus on form - slow down for better technique."
    } else {
        "🎯 Form needs work - consider practicing basic movements."
    });

    match reps {
        16.. => feedback.push("💪 Impressive endurance! Great core strength."),
        11..=15 => feedback.push("👍 Good repetitions - you're building strength!"),
        6..=10 => feedback.push("🚀 Nice start! Keep practicing to build endurance."),
        _ => {}
    }

    if confidence > 90.0 {
        feedback.push("📊 High confidence in analysis - reliable results.");
    }

    feedback
}

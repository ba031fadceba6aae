// ABOUTME: Immutable session outcome handed to the result store
// ABOUTME: Defines SessionResult, SessionStatus, and the assessment test types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::Badge;
use crate::constants::session::LOCAL_USER_ID;

/// Whether a session is still trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No attention-loss detected
    Valid,
    /// Subject disappeared from view; result is not trusted
    Invalid,
}

impl SessionStatus {
    /// Whether the session is still trusted
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("valid"),
            Self::Invalid => f.write_str("invalid"),
        }
    }
}

/// Assessment test performed in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    /// Sit-up repetition test
    Situp,
    /// Vertical jump test (score is an estimated height)
    #[serde(rename = "jump")]
    VerticalJump,
}

impl TestType {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Situp => "situp",
            Self::VerticalJump => "jump",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "situp" | "situps" | "sit-up" => Ok(Self::Situp),
            "jump" | "verticaljump" | "vertical-jump" => Ok(Self::VerticalJump),
            other => Err(format!("unknown test type '{other}'")),
        }
    }
}

/// Outcome of one finished session
///
/// Built once from the final counter snapshot and never mutated afterwards.
/// For the vertical jump test `rep_count` carries the jump score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    /// Unique result identifier
    pub id: Uuid,
    /// Profile the result belongs to
    pub user_id: String,
    /// Test performed
    pub test_type: TestType,
    /// Completed repetitions (or jump score)
    pub rep_count: u32,
    /// Whether the session was trusted at the end
    pub status: SessionStatus,
    /// Session length in milliseconds
    pub duration_ms: u64,
    /// Wall-clock start
    pub started_at: DateTime<Utc>,
    /// Wall-clock end
    pub finished_at: DateTime<Utc>,
    /// Smoothed form score, when the adapter observed movement quality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_score: Option<f64>,
}

impl SessionResult {
    /// Create a result for the local (signed-out) user
    #[must_use]
    pub fn new(
        test_type: TestType,
        rep_count: u32,
        status: SessionStatus,
        duration_ms: u64,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: LOCAL_USER_ID.to_owned(),
            test_type,
            rep_count,
            status,
            duration_ms,
            started_at,
            finished_at,
            form_score: None,
        }
    }

    /// Attach a form score
    #[must_use]
    pub fn with_form_score(mut self, form_score: Option<f64>) -> Self {
        self.form_score = form_score;
        self
    }

    /// Attach a profile ID
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Badge tier earned by this result
    #[must_use]
    pub const fn badge(&self) -> Badge {
        Badge::for_score(self.rep_count)
    }
}

// ABOUTME: Badge tier derivation from a final assessment score
// ABOUTME: Fixed cutoffs: above 20 is Gold, 10 through 20 is Silver, below 10 is Bronze
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::badges::{GOLD_ABOVE, SILVER_FROM};

/// Tier label shown next to a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    /// Below the Silver cutoff
    Bronze,
    /// From the Silver cutoff up to and including the Gold cutoff
    Silver,
    /// Strictly above the Gold cutoff
    Gold,
}

impl Badge {
    /// Map a final score to its tier
    #[must_use]
    pub const fn for_score(score: u32) -> Self {
        if score > GOLD_ABOVE {
            Self::Gold
        } else if score >= SILVER_FROM {
            Self::Silver
        } else {
            Self::Bronze
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
        }
    }

    /// Medal emoji
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Bronze => "🥉",
            Self::Silver => "🥈",
            Self::Gold => "🥇",
        }
    }

    /// Hex display colour
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Bronze => "#CD7F32",
            Self::Silver => "#9CA3AF",
            Self::Gold => "#F59E0B",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

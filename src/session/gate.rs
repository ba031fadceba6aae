// ABOUTME: Single-flight gate for sample capture on the session tick loop
// ABOUTME: A tick that finds a capture still in flight is dropped rather than queued
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Allows at most one capture in flight
#[derive(Debug, Clone, Default)]
pub struct TickGate {
    in_flight: Arc<AtomicBool>,
}

impl TickGate {
    /// Open gate
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate; `None` while the previous permit is alive
    #[must_use]
    pub fn try_acquire(&self) -> Option<TickPermit> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| TickPermit {
                in_flight: Arc::clone(&self.in_flight),
            })
    }

    /// Whether a capture currently holds the gate
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Proof of holding the gate; releases it on drop
#[derive(Debug)]
pub struct TickPermit {
    in_flight: Arc<AtomicBool>,
}

impl Drop for TickPermit {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

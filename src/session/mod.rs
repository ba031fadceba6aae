// ABOUTME: Session orchestration for timed assessments
// ABOUTME: Fixed-rate polling loop, droppable capture ticks, and result handoff
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Session controller and handle
pub mod controller;
/// Single-flight capture gate
pub mod gate;

pub use controller::{SessionController, SessionHandle, SessionOutcome};
pub use gate::{TickGate, TickPermit};

// ABOUTME: Core types and constants for the fitness assessment workspace
// ABOUTME: Foundation crate with error handling, sample and result models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Assessment Core
//!
//! Foundation crate providing shared types and constants for the fitness
//! assessment workspace. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and signal source errors
//! - **constants**: Counter defaults, session messages, and environment variable names
//! - **models**: Samples, session results, and badges

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (samples, landmarks, session results, badges)
pub mod models;

// ABOUTME: Re-exports command modules for assessment-cli
// ABOUTME: Provides access to session runs and result browsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod history;
pub mod run;

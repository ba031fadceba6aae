// ABOUTME: Assessment CLI - runs simulated fitness assessments and browses stored results
// ABOUTME: Drives sit-up and vertical jump sessions from seeded synthetic signal sources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Sit-up session from a simulated chest-mounted phone
//! assessment-cli run --test situp --source orientation --reps 12
//!
//! # Sit-up session from simulated camera landmarks, stopping after 80 ticks
//! assessment-cli run --source pose --seed 7 --ticks 80
//!
//! # Vertical jump
//! assessment-cli run --test jump
//!
//! # Past results, most recent first
//! assessment-cli history
//!
//! # Top scores
//! assessment-cli leaderboard --limit 5
//! ```

mod commands;
mod helpers;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fitness_assessment::config::AssessmentConfig;
use fitness_assessment::constants::badges::LEADERBOARD_SIZE;
use fitness_assessment::logging::LoggingConfig;
use fitness_assessment::models::TestType;
use fitness_assessment::store::JsonFileResultStore;
use std::path::PathBuf;
use tracing::debug;

use commands::run::RunOptions;

#[derive(Parser)]
#[command(
    name = "assessment-cli",
    about = "Fitness assessment CLI",
    long_about = "Runs simulated sit-up and vertical jump assessments and shows stored results."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Results file override
    #[arg(long, global = true)]
    results_path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Run a simulated assessment session
    Run {
        /// Test to perform
        #[arg(long, value_enum, default_value_t = TestArg::Situp)]
        test: TestArg,

        /// Signal source for sit-up sessions
        #[arg(long, value_enum, default_value_t = SourceArg::Orientation)]
        source: SourceArg,

        /// Seed for the synthetic signal
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Stop after this many ticks (runs until the session ends otherwise)
        #[arg(long)]
        ticks: Option<u64>,

        /// Sit-ups the simulated subject performs before resting
        #[arg(long, default_value = "10")]
        reps: u32,

        /// Share of pose frames in which the face is visible
        #[arg(long, default_value = "1.0")]
        face_visible_rate: f64,

        /// Simulate a device without a pose backend
        #[arg(long)]
        no_pose_backend: bool,

        /// Roll the chest-mounted device sideways after this many milliseconds
        #[arg(long)]
        sideways_after_ms: Option<u64>,

        /// Do not save the result
        #[arg(long)]
        no_save: bool,
    },

    /// List stored results, most recent first
    History {
        /// Maximum number of results to show
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the best scores
    Leaderboard {
        /// Number of entries
        #[arg(long, default_value_t = LEADERBOARD_SIZE)]
        limit: usize,

        /// Only rank results of this test
        #[arg(long, value_enum)]
        test: Option<TestArg>,
    },
}

/// Assessment type selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestArg {
    /// Sit-up repetitions
    Situp,
    /// Vertical jump
    Jump,
}

/// Signal adapter selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// Random intensity readings
    Intensity,
    /// Device inclination
    Orientation,
    /// Camera pose landmarks
    Pose,
    /// Chest-mounted accelerometer tilt
    Tilt,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    let mut config = AssessmentConfig::from_env().context("Failed to load configuration")?;
    if let Some(path) = cli.results_path {
        config.results_path = path;
    }
    debug!(results_path = %config.results_path.display(), "using results file");
    let store = JsonFileResultStore::new(&config.results_path);

    match cli.command {
        Command::Run {
            test,
            source,
            seed,
            ticks,
            reps,
            face_visible_rate,
            no_pose_backend,
            sideways_after_ms,
            no_save,
        } => {
            let options = RunOptions {
                source,
                seed,
                ticks,
                reps,
                face_visible_rate,
                pose_backend: !no_pose_backend,
                sideways_after_ms,
                save: !no_save,
            };
            match test {
                TestArg::Situp => commands::run::situp(config, store, options).await?,
                TestArg::Jump => commands::run::jump(&config, &store, &options).await?,
            }
        }
        Command::History { limit } => commands::history::list(&store, limit).await?,
        Command::Leaderboard { limit, test } => {
            commands::history::leaderboard(&store, limit, test).await?;
        }
    }

    Ok(())
}

impl TestArg {
    /// Stored test type for this argument
    pub const fn test_type(self) -> TestType {
        match self {
            Self::Situp => TestType::Situp,
            Self::Jump => TestType::VerticalJump,
        }
    }
}

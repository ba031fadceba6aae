// ABOUTME: Session commands for assessment-cli
// ABOUTME: Runs simulated sit-up sessions through the controller and vertical jumps through the jump tracker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use chrono::Utc;
use fitness_assessment::config::AssessmentConfig;
use fitness_assessment::constants::jump::SAMPLE_INTERVAL_MS;
use fitness_assessment::intelligence::JumpTracker;
use fitness_assessment::models::{SessionResult, SessionStatus, TestType};
use fitness_assessment::providers::{
    MotionProfile, PoseSource, SignalSource, SyntheticAccelerometer, SyntheticIntensitySource,
    SyntheticOrientationSource, SyntheticPoseEstimator, SyntheticTiltSource,
};
use fitness_assessment::session::SessionController;
use fitness_assessment::store::{JsonFileResultStore, MemoryResultStore, ResultStore};
use std::future;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::helpers::display::{
    display_jump_outcome, display_rep, display_session_start, display_situp_outcome,
};
use crate::SourceArg;

/// Flags shared by both tests
pub struct RunOptions {
    /// Adapter for sit-up sessions
    pub source: SourceArg,
    /// Synthetic signal seed
    pub seed: u64,
    /// Tick limit
    pub ticks: Option<u64>,
    /// Simulated sit-ups before resting
    pub reps: u32,
    /// Share of pose frames with a visible face
    pub face_visible_rate: f64,
    /// Whether the simulated device has a pose backend
    pub pose_backend: bool,
    /// When the tilt device rolls sideways
    pub sideways_after_ms: Option<u64>,
    /// Persist the result
    pub save: bool,
}

/// Run a sit-up session until it ends, the tick limit passes, or Ctrl-C
pub async fn situp(
    config: AssessmentConfig,
    store: JsonFileResultStore,
    options: RunOptions,
) -> Result<()> {
    let profile = MotionProfile::default().with_reps(options.reps);
    let source = build_source(&options, profile.clone());
    let store: Arc<dyn ResultStore> = if options.save {
        Arc::new(store)
    } else {
        Arc::new(MemoryResultStore::new())
    };

    let tick_interval = config.tick_interval;
    let use_fallback = config.orientation_fallback && options.source == SourceArg::Pose;
    let mut controller = SessionController::new(config, source, store);
    if use_fallback {
        controller = controller.with_fallback(Arc::new(SyntheticOrientationSource::new(
            profile,
            options.seed,
        )));
    }

    let handle = controller.start(TestType::Situp).await?;
    display_session_start(TestType::Situp, Some(options.source), options.ticks);

    let limit = options.ticks.map(|ticks| {
        tick_interval.saturating_mul(u32::try_from(ticks).unwrap_or(u32::MAX))
    });
    let tick_limit = sleep_or_pending(limit);
    tokio::pin!(tick_limit);
    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut snapshots = handle.snapshots();
    let mut shown = 0;
    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                if snapshot.count > shown {
                    shown = snapshot.count;
                    display_rep(shown);
                }
                if !snapshot.active {
                    break;
                }
            }
            () = &mut tick_limit => {
                info!("tick limit reached, stopping session");
                handle.stop();
                break;
            }
            _ = &mut ctrl_c => {
                info!("interrupted, stopping session");
                handle.stop();
                break;
            }
        }
    }

    let outcome = handle.finished().await?;
    display_situp_outcome(&outcome);

    if options.save {
        match outcome.persisted.await {
            Ok(Ok(())) => println!("\nResult saved."),
            Ok(Err(e)) => warn!(error = %e, "result was not saved"),
            Err(e) => warn!(error = %e, "result write did not complete"),
        }
    }
    Ok(())
}

/// Run a vertical jump session from a simulated accelerometer
pub async fn jump(
    config: &AssessmentConfig,
    store: &JsonFileResultStore,
    options: &RunOptions,
) -> Result<()> {
    let accelerometer = SyntheticAccelerometer::new(options.seed);
    let mut tracker = JumpTracker::new(0);
    display_session_start(TestType::VerticalJump, None, options.ticks);
    info!(
        results_path = %config.results_path.display(),
        "jump session started"
    );

    let started_wall = Utc::now();
    let started = Instant::now();
    let elapsed_ms = || started.elapsed().as_millis() as u64;

    let mut interval = time::interval(Duration::from_millis(SAMPLE_INTERVAL_MS));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut ticks_seen: u64 = 0;
    let snapshot = loop {
        tokio::select! {
            _ = interval.tick() => {
                let now = elapsed_ms();
                let snapshot = tracker.update(accelerometer.read_z(now)?, now);
                ticks_seen += 1;
                if !snapshot.active {
                    break snapshot;
                }
                if options.ticks.is_some_and(|limit| ticks_seen >= limit) {
                    break tracker.stop(now);
                }
            }
            _ = &mut ctrl_c => {
                break tracker.stop(elapsed_ms());
            }
        }
    };

    let result = SessionResult::new(
        TestType::VerticalJump,
        snapshot.score,
        SessionStatus::Valid,
        snapshot.duration_ms,
        started_wall,
        Utc::now(),
    );
    display_jump_outcome(&result, snapshot.peak_g);

    if options.save {
        store.append(&result).await?;
        println!("\nResult saved.");
    }
    Ok(())
}

fn build_source(options: &RunOptions, profile: MotionProfile) -> Arc<dyn SignalSource> {
    match options.source {
        SourceArg::Intensity => Arc::new(SyntheticIntensitySource::new(options.seed)),
        SourceArg::Orientation => Arc::new(SyntheticOrientationSource::new(profile, options.seed)),
        SourceArg::Tilt => {
            let source = SyntheticTiltSource::new(profile, options.seed);
            Arc::new(match options.sideways_after_ms {
                Some(at_ms) => source.with_sideways_after(at_ms),
                None => source,
            })
        }
        SourceArg::Pose => {
            let estimator = SyntheticPoseEstimator::new(profile, options.seed)
                .with_face_visible_rate(options.face_visible_rate);
            let estimator = if options.pose_backend {
                estimator
            } else {
                estimator.without_backend()
            };
            Arc::new(PoseSource::new(estimator))
        }
    }
}

async fn sleep_or_pending(limit: Option<Duration>) {
    match limit {
        Some(duration) => time::sleep(duration).await,
        None => future::pending().await,
    }
}

// ABOUTME: Pose estimator abstraction and the pose-backed signal source
// ABOUTME: Includes a seeded synthetic estimator emitting landmarks from a motion profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Camera pose adapter.
//!
//! A [`PoseEstimator`] turns a frame into named landmarks. It is owned by
//! the [`PoseSource`] that wraps it, and initialized once at session start.
//! Repeated inference failures open a [`CircuitBreaker`] so a broken backend
//! stops burning tick time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
use crate::core::SignalSource;
use crate::errors::{ProviderError, ProviderResult};
use crate::models::{Landmark, LandmarkName, PoseSample, Sample, SignalKind};
use crate::synthetic::{lock_rng, MotionProfile};

/// Pose inference backend
#[async_trait]
pub trait PoseEstimator: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Load the model and warm up the backend
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InitializationFailed` if the backend cannot start
    async fn initialize(&self) -> ProviderResult<()>;

    /// Detect landmarks in the frame for `now_ms`; `None` when nobody is in view
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InferenceFailed` when this frame could not be processed
    async fn detect(&self, now_ms: u64) -> ProviderResult<Option<PoseSample>>;
}

/// Signal source backed by a pose estimator
pub struct PoseSource<E: PoseEstimator> {
    name: String,
    estimator: E,
    breaker: CircuitBreaker,
    ready: AtomicBool,
}

impl<E: PoseEstimator> PoseSource<E> {
    /// Wrap an estimator with the default circuit breaker
    #[must_use]
    pub fn new(estimator: E) -> Self {
        Self::with_breaker_config(estimator, CircuitBreakerConfig::default())
    }

    /// Wrap an estimator with custom circuit breaker thresholds
    #[must_use]
    pub fn with_breaker_config(estimator: E, config: CircuitBreakerConfig) -> Self {
        let name = format!("pose:{}", estimator.name());
        Self {
            breaker: CircuitBreaker::with_config(&name, config),
            name,
            estimator,
            ready: AtomicBool::new(false),
        }
    }

    /// Circuit breaker guarding the estimator
    #[must_use]
    pub const fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }
}

#[async_trait]
impl<E: PoseEstimator> SignalSource for PoseSource<E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SignalKind {
        SignalKind::Pose
    }

    async fn initialize(&self) -> ProviderResult<()> {
        self.estimator.initialize().await?;
        self.ready.store(true, Ordering::SeqCst);
        info!(source = %self.name, "pose estimator ready");
        Ok(())
    }

    async fn capture(&self, now_ms: u64) -> ProviderResult<Option<Sample>> {
        if !self.ready.load(Ordering::SeqCst) {
            return Err(ProviderError::Unavailable {
                source_name: self.name.clone(),
                reason: "estimator not initialized".to_owned(),
            });
        }
        let detected = self
            .breaker
            .call(now_ms, self.estimator.detect(now_ms))
            .await?;
        // An empty frame is evidence that nobody is in view.
        Ok(Some(Sample::Pose(detected.unwrap_or_default())))
    }
}

/// Deterministic stand-in for a camera pose model
///
/// Renders a side-on torso following a [`MotionProfile`], with seeded
/// landmark jitter, dropped hips, missing faces, and inference failures at
/// configurable rates.
#[derive(Debug)]
pub struct SyntheticPoseEstimator {
    profile: MotionProfile,
    rng: Mutex<ChaCha8Rng>,
    face_visible_rate: f64,
    hip_drop_rate: f64,
    failure_rate: f64,
    latency: Duration,
    backend_available: bool,
}

impl SyntheticPoseEstimator {
    /// Estimator with a fully visible subject and no failures
    #[must_use]
    pub fn new(profile: MotionProfile, seed: u64) -> Self {
        Self {
            profile,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            face_visible_rate: 1.0,
            hip_drop_rate: 0.0,
            failure_rate: 0.0,
            latency: Duration::ZERO,
            backend_available: true,
        }
    }

    /// Probability that the face is visible in a frame
    #[must_use]
    pub const fn with_face_visible_rate(mut self, rate: f64) -> Self {
        self.face_visible_rate = rate;
        self
    }

    /// Probability that the hips are missing from a frame
    #[must_use]
    pub const fn with_hip_drop_rate(mut self, rate: f64) -> Self {
        self.hip_drop_rate = rate;
        self
    }

    /// Probability that inference fails for a frame
    #[must_use]
    pub const fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = rate;
        self
    }

    /// Simulated inference time per frame
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make `initialize` fail, as with a missing model backend
    #[must_use]
    pub const fn without_backend(mut self) -> Self {
        self.backend_available = false;
        self
    }

    fn render(&self, now_ms: u64, rng: &mut ChaCha8Rng) -> PoseSample {
        const TORSO_LENGTH: f64 = 0.35;
        const HALF_WIDTH: f64 = 0.05;
        const HIP: (f64, f64) = (0.5, 0.75);

        let angle = self.profile.sample_angle(now_ms, rng).to_radians();
        let shoulder_x = TORSO_LENGTH.mul_add(angle.sin(), HIP.0);
        let shoulder_y = TORSO_LENGTH.mul_add(-angle.cos(), HIP.1);
        let mut jitter = |value: f64| value + rng.gen_range(-0.002..=0.002);

        let mut pose = PoseSample::new()
            .with_landmark(
                LandmarkName::LeftShoulder,
                Landmark::new(jitter(shoulder_x - HALF_WIDTH), jitter(shoulder_y), 0.9),
            )
            .with_landmark(
                LandmarkName::RightShoulder,
                Landmark::new(jitter(shoulder_x + HALF_WIDTH), jitter(shoulder_y), 0.9),
            );

        if !rng.gen_bool(self.hip_drop_rate.clamp(0.0, 1.0)) {
            pose = pose
                .with_landmark(
                    LandmarkName::LeftHip,
                    Landmark::new(HIP.0 - HALF_WIDTH, HIP.1, 0.85),
                )
                .with_landmark(
                    LandmarkName::RightHip,
                    Landmark::new(HIP.0 + HALF_WIDTH, HIP.1, 0.85),
                );
        }

        let face_confidence = if rng.gen_bool(self.face_visible_rate.clamp(0.0, 1.0)) {
            rng.gen_range(0.6..0.95)
        } else {
            rng.gen_range(0.0..0.2)
        };
        pose.with_landmark(
            LandmarkName::Nose,
            Landmark::new(shoulder_x, shoulder_y - 0.08, face_confidence),
        )
    }
}

#[async_trait]
impl PoseEstimator for SyntheticPoseEstimator {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    async fn initialize(&self) -> ProviderResult<()> {
        if !self.backend_available {
            return Err(ProviderError::InitializationFailed {
                source_name: self.name().to_owned(),
                reason: "no inference backend available".to_owned(),
            });
        }
        Ok(())
    }

    async fn detect(&self, now_ms: u64) -> ProviderResult<Option<PoseSample>> {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
        let mut rng = lock_rng(&self.rng, self.name())?;
        if rng.gen_bool(self.failure_rate.clamp(0.0, 1.0)) {
            drop(rng);
            debug!(now_ms, "synthetic inference failure");
            return Err(ProviderError::InferenceFailed {
                source_name: self.name().to_owned(),
                reason: "simulated inference failure".to_owned(),
            });
        }
        let pose = self.render(now_ms, &mut rng);
        drop(rng);
        Ok(Some(pose))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit_breaker::CircuitState;

    #[tokio::test]
    async fn test_capture_requires_initialize() {
        let source = PoseSource::new(SyntheticPoseEstimator::new(MotionProfile::default(), 1));
        assert!(matches!(
            source.capture(0).await,
            Err(ProviderError::Unavailable { .. })
        ));
        source.initialize().await.unwrap();
        let sample = source.capture(0).await.unwrap().unwrap();
        let Sample::Pose(pose) = sample else {
            panic!("expected pose sample");
        };
        assert!(pose.get(LandmarkName::LeftHip).is_some());
        assert!(pose.get(LandmarkName::Nose).unwrap().confidence >= 0.6);
    }

    #[tokio::test]
    async fn test_missing_backend_fails_initialize() {
        let source = PoseSource::new(
            SyntheticPoseEstimator::new(MotionProfile::default(), 1).without_backend(),
        );
        assert!(matches!(
            source.initialize().await,
            Err(ProviderError::InitializationFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_hip_drops_remove_hips() {
        let estimator =
            SyntheticPoseEstimator::new(MotionProfile::default(), 9).with_hip_drop_rate(1.0);
        let pose = estimator.detect(500).await.unwrap().unwrap();
        assert!(pose.get(LandmarkName::LeftHip).is_none());
        assert!(pose.get(LandmarkName::LeftShoulder).is_some());
    }

    #[tokio::test]
    async fn test_failing_estimator_opens_circuit() {
        let source = PoseSource::with_breaker_config(
            SyntheticPoseEstimator::new(MotionProfile::default(), 5).with_failure_rate(1.0),
            CircuitBreakerConfig::new(2, 1_000, 1),
        );
        source.initialize().await.unwrap();
        assert!(source.capture(0).await.is_err());
        assert!(source.capture(100).await.is_err());
        assert_eq!(source.breaker().state(), CircuitState::Open);
        assert!(matches!(
            source.capture(200).await,
            Err(ProviderError::CircuitOpen { .. })
        ));
    }
}

// ABOUTME: Seeded synthetic signal sources for demos, tests, and benchmarks
// ABOUTME: Generates intensity pairs, sit-up inclination and chest tilt waveforms, and jump spikes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Synthetic sources driven by an injectable `ChaCha8Rng`.
//!
//! The same seed always yields the same sample stream, which keeps CLI demo
//! runs and integration tests reproducible.

use std::f64::consts::TAU;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::SignalSource;
use crate::errors::{ProviderError, ProviderResult};
use crate::models::{IntensitySample, OrientationSample, Sample, SignalKind};

/// Lock the generator, mapping poisoning to an unavailable source
pub(crate) fn lock_rng<'a>(
    rng: &'a Mutex<ChaCha8Rng>,
    source_name: &str,
) -> ProviderResult<MutexGuard<'a, ChaCha8Rng>> {
    rng.lock().map_err(|_| ProviderError::Unavailable {
        source_name: source_name.to_owned(),
        reason: "Mutex poisoned: random generator".to_owned(),
    })
}

/// Periodic torso motion of a subject doing sit-ups
///
/// Starts lying down, rises to `up_deg` once per `period_ms`, and after
/// `reps` cycles (if set) lies still at `down_deg`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionProfile {
    /// Most upright angle reached each cycle
    pub up_deg: f64,
    /// Most reclined angle reached each cycle
    pub down_deg: f64,
    /// Length of one repetition
    pub period_ms: u64,
    /// Uniform noise amplitude added to every reading
    pub noise_deg: f64,
    /// Number of repetitions before resting, `None` for endless
    pub reps: Option<u32>,
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self {
            up_deg: 10.0,
            down_deg: 85.0,
            period_ms: 2_000,
            noise_deg: 2.0,
            reps: None,
        }
    }
}

impl MotionProfile {
    /// Stop moving after `reps` repetitions
    #[must_use]
    pub const fn with_reps(mut self, reps: u32) -> Self {
        self.reps = Some(reps);
        self
    }

    /// Noise-free angle at `t_ms` after session start
    #[must_use]
    pub fn angle_at(&self, t_ms: u64) -> f64 {
        let period = self.period_ms.max(1);
        if let Some(reps) = self.reps {
            if t_ms >= u64::from(reps) * period {
                return self.down_deg;
            }
        }
        let phase = (t_ms % period) as f64 / period as f64;
        let mid = (self.up_deg + self.down_deg) / 2.0;
        let amplitude = (self.down_deg - self.up_deg) / 2.0;
        amplitude.mul_add((TAU * phase).cos(), mid)
    }

    /// Angle at `t_ms` with uniform noise from `rng`
    pub fn sample_angle(&self, t_ms: u64, rng: &mut ChaCha8Rng) -> f64 {
        let noise = if self.noise_deg > 0.0 {
            rng.gen_range(-self.noise_deg..=self.noise_deg)
        } else {
            0.0
        };
        (self.angle_at(t_ms) + noise).clamp(0.0, 90.0)
    }
}

/// Random intensity/quality pairs, the simplest adapter
#[derive(Debug)]
pub struct SyntheticIntensitySource {
    name: String,
    rng: Mutex<ChaCha8Rng>,
}

impl SyntheticIntensitySource {
    /// Source seeded for reproducible output
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Source using an injected generator
    #[must_use]
    pub fn with_rng(rng: ChaCha8Rng) -> Self {
        Self {
            name: "synthetic-intensity".to_owned(),
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl SignalSource for SyntheticIntensitySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SignalKind {
        SignalKind::Intensity
    }

    async fn capture(&self, _now_ms: u64) -> ProviderResult<Option<Sample>> {
        let mut rng = lock_rng(&self.rng, &self.name)?;
        // Intensity in [0.2, 1.0), quality in [0.6, 1.0)
        let intensity = rng.gen::<f64>().mul_add(0.8, 0.2);
        let quality = rng.gen::<f64>().mul_add(0.4, 0.6);
        drop(rng);
        Ok(Some(Sample::Intensity(IntensitySample { intensity, quality })))
    }
}

/// Device-orientation source following a [`MotionProfile`]
#[derive(Debug)]
pub struct SyntheticOrientationSource {
    name: String,
    profile: MotionProfile,
    rng: Mutex<ChaCha8Rng>,
}

impl SyntheticOrientationSource {
    /// Source seeded for reproducible output
    #[must_use]
    pub fn new(profile: MotionProfile, seed: u64) -> Self {
        Self {
            name: "synthetic-orientation".to_owned(),
            profile,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Motion this source simulates
    #[must_use]
    pub const fn profile(&self) -> &MotionProfile {
        &self.profile
    }
}

#[async_trait]
impl SignalSource for SyntheticOrientationSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SignalKind {
        SignalKind::Orientation
    }

    async fn capture(&self, now_ms: u64) -> ProviderResult<Option<Sample>> {
        let mut rng = lock_rng(&self.rng, &self.name)?;
        let angle = self.profile.sample_angle(now_ms, &mut rng);
        drop(rng);
        Ok(Some(Sample::Orientation(OrientationSample::new(angle))))
    }
}

/// Chest-mounted accelerometer following a [`MotionProfile`]
///
/// Emits the gravity vector a device strapped flat against the chest would
/// read, and turns it into an orientation sample through
/// [`OrientationSample::from_acceleration`]. After `sideways_after_ms` the
/// device reads as rolled onto its side, which marks the subject hidden.
#[derive(Debug)]
pub struct SyntheticTiltSource {
    name: String,
    profile: MotionProfile,
    sideways_after_ms: Option<u64>,
    noise_g: f64,
    rng: Mutex<ChaCha8Rng>,
}

impl SyntheticTiltSource {
    /// Source seeded for reproducible output
    #[must_use]
    pub fn new(profile: MotionProfile, seed: u64) -> Self {
        Self {
            name: "synthetic-tilt".to_owned(),
            profile,
            sideways_after_ms: None,
            noise_g: 0.03,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Roll the device sideways from `at_ms` on
    #[must_use]
    pub const fn with_sideways_after(mut self, at_ms: u64) -> Self {
        self.sideways_after_ms = Some(at_ms);
        self
    }

    /// Gravity vector `(x, y, z)` in g at `t_ms`
    fn gravity_at(&self, t_ms: u64, rng: &mut ChaCha8Rng) -> (f64, f64, f64) {
        let wobble = rng.gen_range(-self.noise_g..=self.noise_g);
        if self.sideways_after_ms.is_some_and(|at| t_ms >= at) {
            return (0.1, 0.97 + wobble, 0.2);
        }
        let radians = self.profile.sample_angle(t_ms, rng).to_radians();
        (radians.cos(), wobble, radians.sin())
    }
}

#[async_trait]
impl SignalSource for SyntheticTiltSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SignalKind {
        SignalKind::Orientation
    }

    async fn capture(&self, now_ms: u64) -> ProviderResult<Option<Sample>> {
        let mut rng = lock_rng(&self.rng, &self.name)?;
        let (x, y, z) = self.gravity_at(now_ms, &mut rng);
        drop(rng);
        Ok(OrientationSample::from_acceleration(x, y, z).map(Sample::Orientation))
    }
}

/// Vertical accelerometer readings for a single simulated jump
///
/// Reads resting gravity with a little noise, then a triangular takeoff spike
/// peaking at `peak_g` centred on `jump_at_ms`.
#[derive(Debug)]
pub struct SyntheticAccelerometer {
    name: String,
    jump_at_ms: u64,
    spike_ms: u64,
    peak_g: f64,
    noise_g: f64,
    rng: Mutex<ChaCha8Rng>,
}

impl SyntheticAccelerometer {
    /// Accelerometer with a 1.8 g jump one second in
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            name: "synthetic-accelerometer".to_owned(),
            jump_at_ms: 1_000,
            spike_ms: 300,
            peak_g: 1.8,
            noise_g: 0.05,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Move the jump to `at_ms` with the given peak
    #[must_use]
    pub const fn with_jump(mut self, at_ms: u64, peak_g: f64) -> Self {
        self.jump_at_ms = at_ms;
        self.peak_g = peak_g;
        self
    }

    /// Noise-free vertical acceleration at `t_ms`, in g
    #[must_use]
    pub fn z_at(&self, t_ms: u64) -> f64 {
        let half = (self.spike_ms / 2).max(1);
        let distance = t_ms.abs_diff(self.jump_at_ms);
        if distance >= half {
            return 1.0;
        }
        let weight = 1.0 - distance as f64 / half as f64;
        (self.peak_g - 1.0).mul_add(weight, 1.0)
    }

    /// Noisy reading at `t_ms`
    ///
    /// # Errors
    ///
    /// Returns an error if the random generator lock is poisoned
    pub fn read_z(&self, t_ms: u64) -> ProviderResult<f64> {
        let mut rng = lock_rng(&self.rng, &self.name)?;
        let noise = rng.gen_range(-self.noise_g..=self.noise_g);
        drop(rng);
        Ok(self.z_at(t_ms) + noise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_waveform_extremes() {
        let profile = MotionProfile::default();
        assert!((profile.angle_at(0) - profile.down_deg).abs() < 1e-9);
        assert!((profile.angle_at(1_000) - profile.up_deg).abs() < 1e-9);
        assert!((profile.angle_at(2_000) - profile.down_deg).abs() < 1e-9);
    }

    #[test]
    fn test_profile_rests_after_reps() {
        let profile = MotionProfile::default().with_reps(2);
        assert!((profile.angle_at(5_000) - profile.down_deg).abs() < f64::EPSILON);
        assert!((profile.angle_at(60_000) - profile.down_deg).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_intensity_source_is_seeded_and_in_range() {
        let a = SyntheticIntensitySource::new(7);
        let b = SyntheticIntensitySource::new(7);
        for tick in 0..50 {
            let sa = a.capture(tick).await.unwrap();
            let sb = b.capture(tick).await.unwrap();
            assert_eq!(sa, sb);
            let Some(Sample::Intensity(s)) = sa else {
                panic!("expected intensity sample");
            };
            assert!((0.2..1.0).contains(&s.intensity));
            assert!((0.6..1.0).contains(&s.quality));
        }
    }

    #[tokio::test]
    async fn test_orientation_source_stays_in_range() {
        let source = SyntheticOrientationSource::new(MotionProfile::default(), 3);
        assert_eq!(source.kind(), SignalKind::Orientation);
        for tick in 0..40 {
            let sample = source.capture(tick * 250).await.unwrap();
            let Some(Sample::Orientation(s)) = sample else {
                panic!("expected orientation sample");
            };
            assert!((0.0..=90.0).contains(&s.inclination_deg));
        }
    }

    #[tokio::test]
    async fn test_tilt_source_flags_sideways_device() {
        let source =
            SyntheticTiltSource::new(MotionProfile::default(), 5).with_sideways_after(1_000);
        assert_eq!(source.kind(), SignalKind::Orientation);

        let Some(Sample::Orientation(flat)) = source.capture(0).await.unwrap() else {
            panic!("expected orientation sample");
        };
        assert_eq!(flat.subject_visible, Some(true));
        assert!((flat.inclination_deg - 85.0).abs() < 4.0);

        let Some(Sample::Orientation(rolled)) = source.capture(1_250).await.unwrap() else {
            panic!("expected orientation sample");
        };
        assert_eq!(rolled.subject_visible, Some(false));
    }

    #[test]
    fn test_accelerometer_spike_peaks_at_jump() {
        let accel = SyntheticAccelerometer::new(1).with_jump(2_000, 2.0);
        assert!((accel.z_at(0) - 1.0).abs() < f64::EPSILON);
        assert!((accel.z_at(2_000) - 2.0).abs() < 1e-9);
        assert!(accel.z_at(2_100) > 1.0 && accel.z_at(2_100) < 2.0);
        let noisy = accel.read_z(2_000).unwrap();
        assert!((noisy - 2.0).abs() <= 0.05 + 1e-9);
    }
}

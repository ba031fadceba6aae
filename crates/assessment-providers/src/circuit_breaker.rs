// ABOUTME: Circuit breaker for per-frame estimator calls on the session clock
// ABOUTME: Skips inference after repeated failures and probes again after a cooldown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::future::Future;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use tracing::{info, warn};

use crate::errors::ProviderError;

/// Circuit breaker states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Normal operation, frames go to the estimator
    Closed,
    /// Estimator keeps failing, frames are skipped
    Open,
    /// Cooldown elapsed, probing the estimator again
    HalfOpen,
}

impl CircuitState {
    const fn from_u32(value: u32) -> Self {
        match value {
            0 => Self::Closed,
            1 => Self::Open,
            _ => Self::HalfOpen,
        }
    }

    const fn to_u32(self) -> u32 {
        match self {
            Self::Closed => 0,
            Self::Open => 1,
            Self::HalfOpen => 2,
        }
    }
}

/// Thresholds for tripping and recovering
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures before the circuit opens
    pub failure_threshold: u32,
    /// Session milliseconds to wait before probing again
    pub recovery_ms: u64,
    /// Consecutive half-open successes needed to close
    pub success_threshold: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            recovery_ms: 1_000,
            success_threshold: 2,
        }
    }
}

impl CircuitBreakerConfig {
    /// Create a circuit breaker configuration
    #[must_use]
    pub const fn new(failure_threshold: u32, recovery_ms: u64, success_threshold: u32) -> Self {
        Self {
            failure_threshold,
            recovery_ms,
            success_threshold,
        }
    }
}

/// Lock-free circuit breaker driven by caller-supplied session time
///
/// - **Closed**: calls pass through and consecutive failures are counted.
/// - **Open**: calls fail fast with `ProviderError::CircuitOpen`.
/// - **Half-Open**: after `recovery_ms`, calls probe the estimator; enough
///   successes close the circuit, any failure re-opens it.
#[derive(Debug)]
pub struct CircuitBreaker {
    source_name: String,
    state: AtomicU32,
    failure_count: AtomicU32,
    success_count: AtomicU32,
    opened_at_ms: AtomicU64,
    config: CircuitBreakerConfig,
}

impl CircuitBreaker {
    /// Circuit breaker with default thresholds
    #[must_use]
    pub fn new(source_name: &str) -> Self {
        Self::with_config(source_name, CircuitBreakerConfig::default())
    }

    /// Circuit breaker with custom thresholds
    #[must_use]
    pub fn with_config(source_name: &str, config: CircuitBreakerConfig) -> Self {
        Self {
            source_name: source_name.to_owned(),
            state: AtomicU32::new(CircuitState::Closed.to_u32()),
            failure_count: AtomicU32::new(0),
            success_count: AtomicU32::new(0),
            opened_at_ms: AtomicU64::new(0),
            config,
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> CircuitState {
        CircuitState::from_u32(self.state.load(Ordering::SeqCst))
    }

    /// Consecutive failures while closed
    #[must_use]
    pub fn failure_count(&self) -> u32 {
        self.failure_count.load(Ordering::SeqCst)
    }

    /// Whether a call at `now_ms` may reach the estimator
    #[must_use]
    pub fn is_allowed(&self, now_ms: u64) -> bool {
        match self.state() {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            CircuitState::Open => self.try_half_open(now_ms),
        }
    }

    fn try_half_open(&self, now_ms: u64) -> bool {
        let opened_at = self.opened_at_ms.load(Ordering::SeqCst);
        if now_ms.saturating_sub(opened_at) < self.config.recovery_ms {
            return false;
        }
        let moved = self
            .state
            .compare_exchange(
                CircuitState::Open.to_u32(),
                CircuitState::HalfOpen.to_u32(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok();
        if moved {
            info!(source = %self.source_name, "circuit half-open, probing estimator");
        }
        moved
    }

    /// Record a successful call
    pub fn record_success(&self) {
        match self.state() {
            CircuitState::Closed => self.failure_count.store(0, Ordering::SeqCst),
            CircuitState::HalfOpen => {
                let count = self.success_count.fetch_add(1, Ordering::SeqCst) + 1;
                if count >= self.config.success_threshold {
                    self.state
                        .store(CircuitState::Closed.to_u32(), Ordering::SeqCst);
                    self.failure_count.store(0, Ordering::SeqCst);
                    self.success_count.store(0, Ordering::SeqCst);
                    info!(source = %self.source_name, "circuit closed, estimator recovered");
                }
            }
            CircuitState::Open => {}
        }
    }

    /// Record a failed call at `now_ms`
    pub fn record_failure(&self, now_ms: u64) {
        match self.state() {
            CircuitState::Closed => {
                let count = self.failure_count.fetch_add(1, Ordering::SeqCst) + 1;
                if count >= self.config.failure_threshold {
                    self.open(now_ms);
                    warn!(
                        source = %self.source_name,
                        failures = count,
                        recovery_ms = self.config.recovery_ms,
                        "circuit opened, estimator failing"
                    );
                }
            }
            CircuitState::HalfOpen => {
                self.open(now_ms);
                self.success_count.store(0, Ordering::SeqCst);
                warn!(source = %self.source_name, "circuit re-opened, probe failed");
            }
            CircuitState::Open => self.opened_at_ms.store(now_ms, Ordering::SeqCst),
        }
    }

    fn open(&self, now_ms: u64) {
        self.state
            .store(CircuitState::Open.to_u32(), Ordering::SeqCst);
        self.opened_at_ms.store(now_ms, Ordering::SeqCst);
    }

    /// Run `operation` under circuit protection
    ///
    /// Only per-tick failures trip the circuit; fatal source errors pass
    /// through untouched.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::CircuitOpen` while open, otherwise the
    /// operation's own error
    pub async fn call<F, T>(&self, now_ms: u64, operation: F) -> Result<T, ProviderError>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        if !self.is_allowed(now_ms) {
            return Err(ProviderError::CircuitOpen {
                source_name: self.source_name.clone(),
                retry_after_ms: self.retry_after_ms(now_ms),
            });
        }

        match operation.await {
            Ok(value) => {
                self.record_success();
                Ok(value)
            }
            Err(error) => {
                if error.is_per_tick() {
                    self.record_failure(now_ms);
                }
                Err(error)
            }
        }
    }

    fn retry_after_ms(&self, now_ms: u64) -> u64 {
        let opened_at = self.opened_at_ms.load(Ordering::SeqCst);
        self.config
            .recovery_ms
            .saturating_sub(now_ms.saturating_sub(opened_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inference_error() -> ProviderError {
        ProviderError::InferenceFailed {
            source_name: "pose".into(),
            reason: "tensor shape".into(),
        }
    }

    #[test]
    fn test_opens_after_threshold() {
        let breaker = CircuitBreaker::with_config("pose", CircuitBreakerConfig::new(3, 500, 1));
        breaker.record_failure(0);
        breaker.record_failure(100);
        assert_eq!(breaker.state(), CircuitState::Closed);
        breaker.record_failure(200);
        assert_eq!(breaker.state(), CircuitState::Open);
        assert!(!breaker.is_allowed(600));
        assert!(breaker.is_allowed(700));
        assert_eq!(breaker.state(), CircuitState::HalfOpen);
    }

    #[test]
    fn test_success_resets_failures() {
        let breaker = CircuitBreaker::new("pose");
        breaker.record_failure(0);
        breaker.record_failure(0);
        breaker.record_success();
        assert_eq!(breaker.failure_count(), 0);
    }

    #[tokio::test]
    async fn test_call_fails_fast_while_open() {
        let breaker = CircuitBreaker::with_config("pose", CircuitBreakerConfig::new(1, 1_000, 1));
        let first: Result<(), _> = breaker.call(0, async { Err(inference_error()) }).await;
        assert!(first.is_err());
        assert_eq!(breaker.state(), CircuitState::Open);

        let blocked: Result<(), _> = breaker.call(400, async { Ok(()) }).await;
        assert!(matches!(
            blocked,
            Err(ProviderError::CircuitOpen {
                retry_after_ms: 600,
                ..
            })
        ));

        let probe: Result<(), _> = breaker.call(1_000, async { Ok(()) }).await;
        assert!(probe.is_ok());
        assert_eq!(breaker.state(), CircuitState::Closed);
    }

    #[tokio::test]
    async fn test_fatal_errors_do_not_trip() {
        let breaker = CircuitBreaker::with_config("pose", CircuitBreakerConfig::new(1, 1_000, 1));
        let result: Result<(), _> = breaker
            .call(0, async {
                Err(ProviderError::Unavailable {
                    source_name: "pose".into(),
                    reason: "not initialized".into(),
                })
            })
            .await;
        assert!(result.is_err());
        assert_eq!(breaker.state(), CircuitState::Closed);
    }
}

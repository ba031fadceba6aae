// ABOUTME: Session controller driving a rep counter from a signal source on a fixed tick
// ABOUTME: Owns source initialization, the polling loop, stop handling, and result handoff
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Session Controller
//!
//! One session runs as a single spawned task that alone mutates its
//! [`RepCounter`]. Every tick the loop either launches a capture (when the
//! [`TickGate`] is free) or drops the tick and polls the counter so the
//! liveness limits keep firing on schedule. Capture results come back over a
//! channel tagged with the tick time that produced them.
//!
//! When the counter goes inactive the loop builds a [`SessionResult`], hands
//! it to the [`ResultStore`] on a separate task and returns it without
//! waiting for the write.

use crate::config::AssessmentConfig;
use crate::errors::{AppError, AppResult, ProviderError, ProviderResult};
use crate::models::{Sample, SessionResult, TestType};
use crate::session::gate::TickGate;
use crate::store::ResultStore;
use assessment_intelligence::{assessment_feedback, CounterSnapshot, RepCounter};
use assessment_providers::SignalSource;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Capture results buffered between the capture task and the loop
const CAPTURE_CHANNEL_CAPACITY: usize = 4;

/// Builds sessions from a configuration, a signal source, and a result store
pub struct SessionController {
    config: AssessmentConfig,
    source: Arc<dyn SignalSource>,
    fallback: Option<Arc<dyn SignalSource>>,
    store: Arc<dyn ResultStore>,
    user_id: Option<String>,
}

impl SessionController {
    /// Create a controller for `source`, persisting results to `store`
    #[must_use]
    pub fn new(
        config: AssessmentConfig,
        source: Arc<dyn SignalSource>,
        store: Arc<dyn ResultStore>,
    ) -> Self {
        Self {
            config,
            source,
            fallback: None,
            store,
            user_id: None,
        }
    }

    /// Source to use when the primary source fails to initialize
    #[must_use]
    pub fn with_fallback(mut self, fallback: Arc<dyn SignalSource>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Record results under this profile instead of the local user
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Initialize the source and start the polling loop
    ///
    /// # Errors
    ///
    /// Returns an error if `test_type` is not a rep-counted test, if the
    /// configuration is invalid, or if neither the source nor the fallback
    /// initializes
    pub async fn start(self, test_type: TestType) -> AppResult<SessionHandle> {
        if test_type != TestType::Situp {
            return Err(AppError::invalid_input(format!(
                "{test_type} is not a rep-counted test"
            )));
        }
        self.config
            .validate()
            .map_err(|e| AppError::config(format!("{e:#}")))?;

        let source = self.initialize_source().await?;
        let kind = source.kind();
        let counter = RepCounter::new(kind, self.config.counter_for(kind), 0)?;

        let session_id = Uuid::new_v4();
        let (snapshot_tx, snapshot_rx) = watch::channel(counter.snapshot(0));
        let (stop_tx, stop_rx) = mpsc::channel::<()>(1);

        let session = SessionLoop {
            counter,
            source,
            store: self.store,
            test_type,
            user_id: self.user_id,
            tick_interval: self.config.tick_interval,
            snapshot_tx,
            stop_rx,
        };

        let span = info_span!("session", %session_id, source_kind = %kind);
        let task = tokio::spawn(session.run().instrument(span));

        Ok(SessionHandle {
            session_id,
            snapshots: snapshot_rx,
            stop_tx,
            task,
        })
    }

    async fn initialize_source(&self) -> AppResult<Arc<dyn SignalSource>> {
        let primary = Arc::clone(&self.source);
        let error = match primary.initialize().await {
            Ok(()) => {
                info!(source = primary.name(), "signal source initialized");
                return Ok(primary);
            }
            Err(e) => e,
        };

        let Some(fallback) = self.fallback.as_ref().map(Arc::clone) else {
            error!(source = primary.name(), error = %error, "signal source failed to initialize");
            return Err(error.into());
        };

        warn!(
            source = primary.name(),
            fallback = fallback.name(),
            error = %error,
            "signal source failed to initialize, switching to fallback"
        );
        fallback.initialize().await?;
        info!(source = fallback.name(), "fallback signal source initialized");
        Ok(fallback)
    }
}

/// Live view of a running session
#[derive(Debug)]
pub struct SessionHandle {
    session_id: Uuid,
    snapshots: watch::Receiver<CounterSnapshot>,
    stop_tx: mpsc::Sender<()>,
    task: JoinHandle<AppResult<SessionOutcome>>,
}

impl SessionHandle {
    /// Session identifier used in log spans
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Receiver that sees every published counter snapshot
    #[must_use]
    pub fn snapshots(&self) -> watch::Receiver<CounterSnapshot> {
        self.snapshots.clone()
    }

    /// Most recently published snapshot
    #[must_use]
    pub fn latest(&self) -> CounterSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Ask the session to stop; repeated calls are no-ops
    pub fn stop(&self) {
        if self.stop_tx.try_send(()).is_err() {
            debug!(session_id = %self.session_id, "stop already requested or session finished");
        }
    }

    /// Wait for the session to end
    ///
    /// # Errors
    ///
    /// Returns an error if the session task panicked or was cancelled
    pub async fn finished(self) -> AppResult<SessionOutcome> {
        self.task
            .await
            .map_err(|e| AppError::internal(format!("Session task failed: {e}")))?
    }
}

/// Everything a finished session produced
#[derive(Debug)]
pub struct SessionOutcome {
    /// Persisted result
    pub result: SessionResult,
    /// Final counter snapshot
    pub snapshot: CounterSnapshot,
    /// Ticks skipped because a capture was still in flight
    pub dropped_ticks: u64,
    /// Coaching lines for the final form score
    pub feedback: Vec<&'static str>,
    /// Background write of `result` to the store
    pub persisted: JoinHandle<AppResult<()>>,
}

/// Capture result tagged with the tick that launched it
struct Captured {
    at_ms: u64,
    result: ProviderResult<Option<Sample>>,
}

struct SessionLoop {
    counter: RepCounter,
    source: Arc<dyn SignalSource>,
    store: Arc<dyn ResultStore>,
    test_type: TestType,
    user_id: Option<String>,
    tick_interval: Duration,
    snapshot_tx: watch::Sender<CounterSnapshot>,
    stop_rx: mpsc::Receiver<()>,
}

impl SessionLoop {
    async fn run(mut self) -> AppResult<SessionOutcome> {
        let started_wall = Utc::now();
        let started = Instant::now();
        let elapsed_ms = || started.elapsed().as_millis() as u64;

        let gate = TickGate::new();
        let (capture_tx, mut capture_rx) = mpsc::channel::<Captured>(CAPTURE_CHANNEL_CAPACITY);
        let mut interval = time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut dropped_ticks: u64 = 0;
        // Capture results may land after a later dropped tick was polled
        let mut clock_ms: u64 = 0;

        info!(
            tick_interval_ms = self.tick_interval.as_millis() as u64,
            "session started"
        );

        let snapshot = loop {
            tokio::select! {
                biased;
                Some(()) = self.stop_rx.recv() => {
                    clock_ms = clock_ms.max(elapsed_ms());
                    break self.counter.stop(clock_ms);
                }
                Some(captured) = capture_rx.recv() => {
                    clock_ms = clock_ms.max(captured.at_ms);
                    let snapshot = self.apply(captured.result, clock_ms);
                    if self.publish(&snapshot) {
                        break snapshot;
                    }
                }
                _ = interval.tick() => {
                    clock_ms = clock_ms.max(elapsed_ms());
                    let at_ms = clock_ms;
                    if let Some(permit) = gate.try_acquire() {
                        let source = Arc::clone(&self.source);
                        let tx = capture_tx.clone();
                        tokio::spawn(async move {
                            let result = source.capture(at_ms).await;
                            drop(permit);
                            if tx.send(Captured { at_ms, result }).await.is_err() {
                                debug!(at_ms, "session ended before capture completed");
                            }
                        }.in_current_span());
                    } else {
                        dropped_ticks += 1;
                        debug!(at_ms, dropped_ticks, "capture still in flight, dropping tick");
                        let snapshot = self.counter.poll(at_ms);
                        if self.publish(&snapshot) {
                            break snapshot;
                        }
                    }
                }
            }
        };

        self.publish(&snapshot);
        info!(
            reps = snapshot.count,
            status = %snapshot.status,
            message = snapshot.message.as_deref().unwrap_or_default(),
            duration_ms = snapshot.duration_ms,
            dropped_ticks,
            "session finished"
        );

        Ok(self.finish(snapshot, started_wall, dropped_ticks))
    }

    fn apply(&mut self, result: ProviderResult<Option<Sample>>, now: u64) -> CounterSnapshot {
        match result {
            Ok(Some(sample)) => self.counter.update(&sample, now),
            Ok(None) => self.counter.poll(now),
            Err(e) if e.is_per_tick() => {
                warn!(source = self.source.name(), error = %e, "capture failed, polling instead");
                self.counter.poll(now)
            }
            Err(e) => self.source_lost(&e, now),
        }
    }

    fn source_lost(&mut self, error: &ProviderError, now: u64) -> CounterSnapshot {
        warn!(source = self.source.name(), error = %error, "signal source lost, stopping session");
        self.counter.stop(now)
    }

    /// Publish to watchers; returns true once the session is over
    fn publish(&self, snapshot: &CounterSnapshot) -> bool {
        self.snapshot_tx.send_replace(snapshot.clone());
        !snapshot.active
    }

    fn finish(
        self,
        snapshot: CounterSnapshot,
        started_wall: DateTime<Utc>,
        dropped_ticks: u64,
    ) -> SessionOutcome {
        let mut result = SessionResult::new(
            self.test_type,
            snapshot.count,
            snapshot.status,
            snapshot.duration_ms,
            started_wall,
            Utc::now(),
        )
        .with_form_score(snapshot.form_score);
        if let Some(user_id) = self.user_id {
            result = result.with_user_id(user_id);
        }

        let feedback = snapshot.form_score.map_or_else(Vec::new, |score| {
            assessment_feedback(score, snapshot.count, snapshot.confidence_score)
        });

        let store = self.store;
        let record = result.clone();
        let persisted = tokio::spawn(
            async move {
                let id = record.id;
                match store.append(&record).await {
                    Ok(()) => {
                        debug!(result_id = %id, "session result stored");
                        Ok(())
                    }
                    Err(e) => {
                        error!(result_id = %id, error = %e, "failed to store session result");
                        Err(e)
                    }
                }
            }
            .in_current_span(),
        );

        SessionOutcome {
            result,
            snapshot,
            dropped_ticks,
            feedback,
            persisted,
        }
    }
}

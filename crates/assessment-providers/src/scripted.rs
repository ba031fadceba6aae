// ABOUTME: Replay source that feeds a recorded or hand-written sample script
// ABOUTME: Used for deterministic session tests and for replaying captured sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::SignalSource;
use crate::errors::{ProviderError, ProviderResult};
use crate::models::{Sample, SignalKind};

/// Replays one scripted entry per capture
///
/// `None` entries simulate ticks where nothing was captured. Once the script
/// runs out, captures fail with `ProviderError::Exhausted`.
#[derive(Debug)]
pub struct ScriptedSource {
    name: String,
    kind: SignalKind,
    script: Mutex<VecDeque<Option<Sample>>>,
}

impl ScriptedSource {
    /// Replay `script` as a source of `kind` samples
    #[must_use]
    pub fn new(kind: SignalKind, script: impl IntoIterator<Item = Option<Sample>>) -> Self {
        Self {
            name: format!("scripted-{kind}"),
            kind,
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    /// Replay a script with a sample on every tick
    #[must_use]
    pub fn from_samples(kind: SignalKind, samples: impl IntoIterator<Item = Sample>) -> Self {
        Self::new(kind, samples.into_iter().map(Some))
    }

    /// Entries left to replay
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.lock().map_or(0, |script| script.len())
    }
}

#[async_trait]
impl SignalSource for ScriptedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SignalKind {
        self.kind
    }

    async fn capture(&self, _now_ms: u64) -> ProviderResult<Option<Sample>> {
        let next = self
            .script
            .lock()
            .map_err(|_| ProviderError::Unavailable {
                source_name: self.name.clone(),
                reason: "Mutex poisoned: script".to_owned(),
            })?
            .pop_front();
        next.ok_or_else(|| ProviderError::Exhausted {
            source_name: self.name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrientationSample;

    #[tokio::test]
    async fn test_replays_in_order_then_exhausts() {
        let source = ScriptedSource::new(
            SignalKind::Orientation,
            [
                Some(Sample::Orientation(OrientationSample::new(80.0))),
                None,
                Some(Sample::Orientation(OrientationSample::new(20.0))),
            ],
        );
        assert_eq!(source.remaining(), 3);
        assert_eq!(
            source.capture(0).await.unwrap(),
            Some(Sample::Orientation(OrientationSample::new(80.0)))
        );
        assert_eq!(source.capture(1).await.unwrap(), None);
        assert!(source.capture(2).await.unwrap().is_some());
        assert!(matches!(
            source.capture(3).await,
            Err(ProviderError::Exhausted { .. })
        ));
        assert_eq!(source.name(), "scripted-orientation");
    }
}

// ABOUTME: Core signal source trait shared by every adapter
// ABOUTME: Defines initialization and per-tick capture contracts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;

use crate::errors::ProviderResult;
use crate::models::{Sample, SignalKind};

/// A producer of one sample per tick
///
/// `initialize` runs once at session start; a failure there is fatal for
/// the session unless a fallback source is configured. `capture` may fail or
/// return `None` on any tick without ending the session.
#[async_trait]
pub trait SignalSource: Send + Sync {
    /// Human-readable source name for logs and errors
    fn name(&self) -> &str;

    /// Adapter family this source produces
    fn kind(&self) -> SignalKind;

    /// Bring the source up (load models, open sensors)
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InitializationFailed` if the source cannot be used
    async fn initialize(&self) -> ProviderResult<()> {
        Ok(())
    }

    /// Capture the sample for the tick at `now_ms`
    ///
    /// # Errors
    ///
    /// Returns a per-tick error (capture, inference, open circuit) when this
    /// tick is lost, or `Unavailable`/`Exhausted` when the source is done
    async fn capture(&self, now_ms: u64) -> ProviderResult<Option<Sample>>;
}

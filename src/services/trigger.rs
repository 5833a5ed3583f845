// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Guarded, fire-and-forget sync triggering.

use crate::services::guard::SingleFlight;
use crate::services::sync::{run_sync_logged, SyncContext, SyncOutcome};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Result of a trigger attempt.
#[derive(Debug)]
pub enum TriggerStatus {
    /// A sync was spawned. Awaiting the handle is optional.
    Started(JoinHandle<SyncOutcome>),
    /// Another sync is already running; nothing was spawned.
    Busy,
}

impl TriggerStatus {
    pub fn is_started(&self) -> bool {
        matches!(self, TriggerStatus::Started(_))
    }
}

/// Starts syncs on their own task, one at a time.
#[derive(Clone)]
pub struct SyncTrigger {
    ctx: Arc<SyncContext>,
    guard: SingleFlight,
}

impl SyncTrigger {
    pub fn new(ctx: Arc<SyncContext>) -> Self {
        Self::with_guard(ctx, SingleFlight::new())
    }

    /// Build a trigger that shares an existing guard.
    pub fn with_guard(ctx: Arc<SyncContext>, guard: SingleFlight) -> Self {
        Self { ctx, guard }
    }

    /// Start a sync unless one is already running.
    ///
    /// `source` is only used for logging ("manual", "scheduled").
    /// Must be called from within a Tokio runtime.
    pub fn try_trigger(&self, source: &'static str) -> TriggerStatus {
        let Some(permit) = self.guard.try_acquire() else {
            tracing::info!(source, "Sync already running, skipping new request");
            return TriggerStatus::Busy;
        };

        let ctx = self.ctx.clone();
        let handle = tokio::spawn(async move {
            let _permit = permit;
            let outcome = run_sync_logged(&ctx).await;
            tracing::info!(source, outcome = outcome.label(), "Sync run finished");
            outcome
        });

        TriggerStatus::Started(handle)
    }

    /// Whether a sync is in flight.
    pub fn is_running(&self) -> bool {
        self.guard.is_busy()
    }
}

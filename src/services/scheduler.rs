// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily sync timer.

use crate::services::trigger::SyncTrigger;
use crate::time_utils::{format_utc_rfc3339, next_daily_occurrence};
use chrono::{NaiveTime, Utc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Sleep until the next `at` (UTC), trigger a sync, repeat until cancelled.
///
/// A tick that lands while a sync is already running is skipped, not
/// deferred.
pub async fn run_daily_scheduler(trigger: SyncTrigger, at: NaiveTime, cancel: CancellationToken) {
    loop {
        let now = Utc::now();
        let target = next_daily_occurrence(now, at);
        let wait = (target - now).to_std().unwrap_or_default();

        tracing::info!(
            sleep_secs = wait.as_secs(),
            next_run = %format_utc_rfc3339(target),
            "Sleeping until next scheduled sync"
        );

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Scheduler stopped");
                return;
            }
            _ = tokio::time::sleep(wait) => {}
        }

        if !trigger.try_trigger("scheduled").is_started() {
            tracing::warn!("Scheduled time reached but sync already running; skipping this run");
        }
    }
}

/// Spawn the scheduler on its own task.
pub fn spawn_daily_scheduler(
    trigger: SyncTrigger,
    at: NaiveTime,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(run_daily_scheduler(trigger, at, cancel))
}

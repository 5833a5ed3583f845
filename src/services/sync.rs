// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sync orchestration.
//!
//! Handles the core workflow:
//! 1. Load user settings (skip if Strava is not connected)
//! 2. Resolve a valid access token
//! 3. Fetch every activity newer than the watermark
//! 4. Map and upsert each activity
//! 5. Advance the watermark
//!
//! Any failure aborts the remaining steps. Upserts are keyed and
//! overwriting, so re-running after a failure is safe.

use crate::config::Config;
use crate::db::{Store, SupabaseStore};
use crate::error::{Result, SyncError};
use crate::models::SettingsUpdate;
use crate::services::mapper::map_activity;
use crate::services::strava::StravaClient;
use crate::services::tokens::get_valid_access_token;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Everything a sync run needs, built once at startup.
pub struct SyncContext {
    pub store: Arc<dyn Store>,
    pub strava: StravaClient,
    /// The user whose activities are synced
    pub user_id: String,
}

impl SyncContext {
    pub fn new(store: Arc<dyn Store>, strava: StravaClient, user_id: impl Into<String>) -> Self {
        Self {
            store,
            strava,
            user_id: user_id.into(),
        }
    }

    /// Build a context talking to Supabase and Strava as configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = SupabaseStore::new(&config.supabase_url, &config.supabase_service_role_key)?;
        let strava = StravaClient::new(
            config.strava_client_id.clone(),
            config.strava_client_secret.clone(),
        )
        .with_endpoints(&config.strava_api_url, &config.strava_oauth_url);

        Ok(Self::new(
            Arc::new(store),
            strava,
            config.supabase_user_id.clone(),
        ))
    }
}

/// Counts from a completed sync.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub fetched: usize,
    pub upserted: usize,
    /// New value of `last_sync_at`
    pub watermark: DateTime<Utc>,
}

/// Result of one sync attempt.
#[derive(Debug)]
pub enum SyncOutcome {
    /// No Strava connection for the user; nothing was done.
    Skipped,
    /// All activities were upserted and the watermark advanced.
    Synced(SyncReport),
    /// The run aborted; the watermark was not advanced.
    Failed(SyncError),
}

impl SyncOutcome {
    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            SyncOutcome::Skipped => "skipped",
            SyncOutcome::Synced(_) => "synced",
            SyncOutcome::Failed(_) => "failed",
        }
    }
}

/// Run one sync, propagating errors.
///
/// Returns `Skipped` when the user has not connected Strava, and fails with
/// `SettingsNotFound` when the user has no settings row at all.
pub async fn run_sync(ctx: &SyncContext) -> Result<SyncOutcome> {
    tracing::info!(user_id = %ctx.user_id, "Starting Strava sync");

    // 1. Load settings
    let settings = ctx
        .store
        .get_user_settings(&ctx.user_id)
        .await?
        .ok_or_else(|| SyncError::SettingsNotFound(ctx.user_id.clone()))?;

    if !settings.is_connected() {
        tracing::info!(
            user_id = %ctx.user_id,
            "No Strava connection for this user, nothing to do"
        );
        return Ok(SyncOutcome::Skipped);
    }

    // 2. Resolve token
    let access_token = get_valid_access_token(ctx, &settings, Utc::now()).await?;

    // 3. Cursor from watermark (None = full history)
    let after = settings.last_sync_at.map(|t| t.timestamp());

    // 4. Fetch
    let activities = ctx.strava.fetch_all_activities(&access_token, after).await?;
    tracing::info!(
        count = activities.len(),
        after = ?after,
        "Fetched activities from Strava"
    );

    // 5. Map and upsert
    let mut upserted = 0;
    for activity in &activities {
        let record = map_activity(&ctx.user_id, activity, Utc::now());
        ctx.store.upsert_activity(&record).await?;
        upserted += 1;
    }

    // 6. Advance watermark
    let watermark = Utc::now();
    ctx.store
        .update_user_settings(&ctx.user_id, &SettingsUpdate::watermark(watermark))
        .await?;

    tracing::info!(
        fetched = activities.len(),
        upserted,
        "Sync complete"
    );

    Ok(SyncOutcome::Synced(SyncReport {
        fetched: activities.len(),
        upserted,
        watermark,
    }))
}

/// Run one sync, logging and folding any error into `SyncOutcome::Failed`.
pub async fn run_sync_logged(ctx: &SyncContext) -> SyncOutcome {
    match run_sync(ctx).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(
                user_id = %ctx.user_id,
                error = %e,
                strava_error = e.is_strava_error(),
                "Sync failed"
            );
            SyncOutcome::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_targets_configured_user() {
        let config = Config::test_default();
        let ctx = SyncContext::from_config(&config).unwrap();
        assert_eq!(ctx.user_id, config.supabase_user_id);
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava-Sync service
//!
//! Runs either a single sync (`SYNC_MODE=once`) or the manual trigger
//! endpoint plus the daily scheduler (`SYNC_MODE=scheduled`, default).

use anyhow::Context;
use std::sync::Arc;
use strava_sync::{
    config::{Config, RunMode},
    services::{scheduler, run_sync_logged, SyncContext, SyncTrigger},
    time_utils::format_utc_rfc3339,
    AppState,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    let ctx = Arc::new(SyncContext::from_config(&config).context("Failed to set up store")?);
    tracing::info!(user_id = %ctx.user_id, mode = ?config.mode, "Strava-Sync starting");

    match config.mode {
        RunMode::Once => {
            let outcome = run_sync_logged(&ctx).await;
            tracing::info!(outcome = outcome.label(), "One-shot sync finished");
            Ok(())
        }
        RunMode::Scheduled => run_scheduled(config, ctx).await,
    }
}

/// Serve the manual trigger endpoint and run the daily scheduler until Ctrl-C.
async fn run_scheduled(config: Config, ctx: Arc<SyncContext>) -> anyhow::Result<()> {
    let trigger = SyncTrigger::new(ctx);
    let cancel = CancellationToken::new();

    let scheduler = scheduler::spawn_daily_scheduler(
        trigger.clone(),
        config.daily_sync_at,
        cancel.clone(),
    );

    let state = Arc::new(AppState { trigger });
    let app = strava_sync::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(
        address = %addr,
        started_at = %format_utc_rfc3339(chrono::Utc::now()),
        "Manual sync server listening"
    );

    let server_cancel = cancel.clone();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { server_cancel.cancelled().await })
            .await
    });

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    tracing::info!("Shutdown requested");
    cancel.cancel();

    scheduler.await.context("Scheduler task panicked")?;
    server
        .await
        .context("Server task panicked")?
        .context("Server error")?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,strava_sync=debug")),
        )
        .with(format)
        .init();
}

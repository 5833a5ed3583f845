// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Manual sync trigger route.

use crate::services::TriggerStatus;
use crate::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Manual sync routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/sync-now",
        post(sync_now)
            .options(super::preflight)
            .fallback(super::fallback),
    )
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SyncNowResponse {
    /// "started" or "busy"
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Start a background sync (POST /sync-now).
///
/// Returns immediately: 202 if a sync was started, 409 if one is
/// already running.
async fn sync_now(State(state): State<Arc<AppState>>) -> (StatusCode, Json<SyncNowResponse>) {
    match state.trigger.try_trigger("manual") {
        TriggerStatus::Started(_) => {
            tracing::info!("Manual sync started");
            (
                StatusCode::ACCEPTED,
                Json(SyncNowResponse {
                    status: "started".to_string(),
                    message: None,
                }),
            )
        }
        TriggerStatus::Busy => (
            StatusCode::CONFLICT,
            Json(SyncNowResponse {
                status: "busy".to_string(),
                message: Some("Sync already running".to_string()),
            }),
        ),
    }
}

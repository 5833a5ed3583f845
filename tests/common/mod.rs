// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use strava_sync::db::MemoryStore;
use strava_sync::models::UserSettings;
use strava_sync::routes::create_router;
use strava_sync::services::{StravaClient, SyncContext, SyncTrigger};
use strava_sync::AppState;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const USER_ID: &str = "00000000-0000-0000-0000-000000000001";

/// Settings for a connected user whose token is good for hours.
#[allow(dead_code)]
pub fn connected_settings() -> UserSettings {
    UserSettings {
        user_id: USER_ID.to_string(),
        strava_access_token: Some("valid_access_token".to_string()),
        strava_refresh_token: Some("valid_refresh_token".to_string()),
        strava_token_expires_at: Some(Utc::now() + Duration::hours(6)),
        last_sync_at: None,
        updated_at: None,
    }
}

/// Strava client pointed at a mock server, without page delays.
#[allow(dead_code)]
pub fn test_strava_client(server: &MockServer) -> StravaClient {
    StravaClient::new("client_id".to_string(), "client_secret".to_string())
        .with_endpoints(
            &format!("{}/api/v3", server.uri()),
            &format!("{}/oauth/token", server.uri()),
        )
        .with_page_delay(std::time::Duration::ZERO)
}

/// Sync context over an in-memory store and a mock Strava.
#[allow(dead_code)]
pub fn test_context(store: &MemoryStore, server: &MockServer) -> Arc<SyncContext> {
    Arc::new(SyncContext::new(
        Arc::new(store.clone()),
        test_strava_client(server),
        USER_ID,
    ))
}

/// `count` minimal activities with consecutive ids.
#[allow(dead_code)]
pub fn activities_page(first_id: u64, count: u64) -> Value {
    Value::Array(
        (first_id..first_id + count)
            .map(|id| {
                json!({
                    "id": id,
                    "name": format!("Activity {}", id),
                    "sport_type": "Ride",
                    "start_date": "2026-01-01T10:00:00Z",
                    "moving_time": 1800,
                    "distance": 10000.0
                })
            })
            .collect(),
    )
}

/// Serve `body` for the given activities page.
#[allow(dead_code)]
pub async fn mount_activities_page(
    server: &MockServer,
    page: u32,
    body: Value,
    delay: Option<std::time::Duration>,
) {
    let mut response = ResponseTemplate::new(200).set_body_json(body);
    if let Some(delay) = delay {
        response = response.set_delay(delay);
    }

    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .and(query_param("page", page.to_string()))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

/// Create a test app around the given context.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(ctx: Arc<SyncContext>) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        trigger: SyncTrigger::new(ctx),
    });

    (create_router(state.clone()), state)
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Per-user settings row (`user_settings` table).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User settings holding Strava tokens and the sync watermark.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub user_id: String,
    /// Strava access token (None until the user connects Strava)
    #[serde(default)]
    pub strava_access_token: Option<String>,
    #[serde(default)]
    pub strava_refresh_token: Option<String>,
    /// When the access token expires
    #[serde(default)]
    pub strava_token_expires_at: Option<DateTime<Utc>>,
    /// Watermark: time of the last successful sync
    #[serde(default)]
    pub last_sync_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserSettings {
    /// Whether a Strava account is connected.
    pub fn is_connected(&self) -> bool {
        self.strava_access_token
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, update: &SettingsUpdate) {
        if let Some(token) = &update.strava_access_token {
            self.strava_access_token = Some(token.clone());
        }
        if let Some(token) = &update.strava_refresh_token {
            self.strava_refresh_token = Some(token.clone());
        }
        if let Some(expires_at) = update.strava_token_expires_at {
            self.strava_token_expires_at = Some(expires_at);
        }
        if let Some(last_sync_at) = update.last_sync_at {
            self.last_sync_at = Some(last_sync_at);
        }
        self.updated_at = Some(update.updated_at);
    }
}

/// Partial update of a settings row. Unset fields are left untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strava_access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strava_refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strava_token_expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl SettingsUpdate {
    /// New token pair after a refresh.
    pub fn tokens(
        access_token: String,
        refresh_token: String,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            strava_access_token: Some(access_token),
            strava_refresh_token: Some(refresh_token),
            strava_token_expires_at: Some(expires_at),
            last_sync_at: None,
            updated_at: now,
        }
    }

    /// Advance the sync watermark.
    pub fn watermark(now: DateTime<Utc>) -> Self {
        Self {
            strava_access_token: None,
            strava_refresh_token: None,
            strava_token_expires_at: None,
            last_sync_at: Some(now),
            updated_at: now,
        }
    }
}

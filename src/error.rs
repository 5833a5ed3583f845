// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for a sync run.

/// Errors that abort a sync run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("No user_settings row found for user {0}. Connect Strava at least once first.")]
    SettingsNotFound(String),

    #[error("Missing strava_refresh_token in user_settings")]
    MissingRefreshToken,

    /// Token exchange failed. `status` is `None` when no usable HTTP
    /// response came back (transport error, undecodable body).
    #[error("Failed to refresh Strava token: {}", detail(.status, .body))]
    Auth { status: Option<u16>, body: String },

    /// Activity listing failed. `status` as for `Auth`.
    #[error("Failed to fetch activities: {}", detail(.status, .body))]
    Fetch { status: Option<u16>, body: String },

    #[error("Store error: {0}")]
    Store(String),
}

impl SyncError {
    /// Whether the error came from the Strava side (token or listing).
    pub fn is_strava_error(&self) -> bool {
        matches!(
            self,
            SyncError::MissingRefreshToken
                | SyncError::Auth { .. }
                | SyncError::Fetch { .. }
        )
    }
}

fn detail(status: &Option<u16>, body: &str) -> String {
    match status {
        Some(status) => format!("HTTP {}: {}", status, body),
        None => body.to_string(),
    }
}

/// Result type alias for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Access token lifecycle: refresh when expiring, persist the new pair.

use crate::error::SyncError;
use crate::models::{SettingsUpdate, UserSettings};
use crate::services::sync::SyncContext;
use chrono::{DateTime, Duration, Utc};

/// Margin before token expiration when we proactively refresh (5 minutes).
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

/// Whether a token expiring at `expires_at` must be refreshed at `now`.
pub fn needs_refresh(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match expires_at {
        Some(expires_at) => expires_at - now < Duration::seconds(TOKEN_REFRESH_MARGIN_SECS),
        None => true,
    }
}

/// Return an access token valid for at least the refresh margin.
///
/// The stored token is returned untouched while it has more than five
/// minutes left. Otherwise the refresh token is exchanged with Strava and
/// the new pair is written back to the settings row before returning.
pub async fn get_valid_access_token(
    ctx: &SyncContext,
    settings: &UserSettings,
    now: DateTime<Utc>,
) -> Result<String, SyncError> {
    if let Some(access_token) = settings.strava_access_token.as_deref() {
        if !access_token.is_empty() && !needs_refresh(settings.strava_token_expires_at, now) {
            return Ok(access_token.to_string());
        }
    }

    tracing::info!(user_id = %ctx.user_id, "Access token expired or expiring, refreshing");

    let refresh_token = settings
        .strava_refresh_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or(SyncError::MissingRefreshToken)?;

    let new_tokens = ctx.strava.refresh_token(refresh_token).await?;

    let expires_at = DateTime::from_timestamp(new_tokens.expires_at, 0).ok_or_else(|| {
        SyncError::Auth {
            status: None,
            body: format!(
                "token response has out-of-range expires_at: {}",
                new_tokens.expires_at
            ),
        }
    })?;

    let update = SettingsUpdate::tokens(
        new_tokens.access_token.clone(),
        new_tokens.refresh_token,
        expires_at,
        Utc::now(),
    );
    ctx.store
        .update_user_settings(&ctx.user_id, &update)
        .await?;

    tracing::info!(
        user_id = %ctx.user_id,
        expires_at = %crate::time_utils::format_utc_rfc3339(expires_at),
        "Token refreshed and stored"
    );
    Ok(new_tokens.access_token)
}

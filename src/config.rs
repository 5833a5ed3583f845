// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local runs.

use chrono::NaiveTime;
use std::env;

/// Default Strava REST API base URL.
pub const DEFAULT_STRAVA_API_URL: &str = "https://www.strava.com/api/v3";
/// Default Strava OAuth token endpoint.
pub const DEFAULT_STRAVA_OAUTH_URL: &str = "https://www.strava.com/oauth/token";
/// Default port for the manual sync endpoint.
pub const DEFAULT_MANUAL_SYNC_PORT: u16 = 8765;
/// Default daily sync time (UTC).
pub const DEFAULT_DAILY_SYNC_AT: &str = "23:30";

/// How the binary runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// HTTP trigger endpoint plus the daily scheduler.
    Scheduled,
    /// Run a single sync and exit.
    Once,
}

impl std::str::FromStr for RunMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Ok(RunMode::Scheduled),
            "once" => Ok(RunMode::Once),
            _ => Err(()),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Supabase ---
    /// Supabase project URL (PostgREST lives under `/rest/v1`)
    pub supabase_url: String,
    /// Service role key used for both `apikey` and bearer auth
    pub supabase_service_role_key: String,
    /// The user whose settings and activities are synced
    pub supabase_user_id: String,

    // --- Strava ---
    /// Strava OAuth client ID
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Strava REST API base URL
    pub strava_api_url: String,
    /// Strava OAuth token endpoint
    pub strava_oauth_url: String,

    // --- Runtime ---
    /// Port for the manual sync endpoint
    pub port: u16,
    /// Scheduled server or one-shot sync
    pub mode: RunMode,
    /// Daily wall-clock time (UTC) of the scheduled sync
    pub daily_sync_at: NaiveTime,
}

impl Config {
    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_role_key: "test_service_role_key".to_string(),
            supabase_user_id: "00000000-0000-0000-0000-000000000001".to_string(),
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            strava_api_url: DEFAULT_STRAVA_API_URL.to_string(),
            strava_oauth_url: DEFAULT_STRAVA_OAUTH_URL.to_string(),
            port: DEFAULT_MANUAL_SYNC_PORT,
            mode: RunMode::Scheduled,
            daily_sync_at: NaiveTime::from_hms_opt(23, 30, 0).unwrap_or_default(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("MANUAL_SYNC_PORT") {
            Ok(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "MANUAL_SYNC_PORT",
                value: v,
            })?,
            Err(_) => DEFAULT_MANUAL_SYNC_PORT,
        };

        let mode = match env::var("SYNC_MODE") {
            Ok(v) => v.parse().map_err(|_| ConfigError::Invalid {
                var: "SYNC_MODE",
                value: v,
            })?,
            Err(_) => RunMode::Scheduled,
        };

        let daily_sync_at = env::var("SYNC_DAILY_AT")
            .unwrap_or_else(|_| DEFAULT_DAILY_SYNC_AT.to_string());
        let daily_sync_at = parse_daily_time(&daily_sync_at).ok_or(ConfigError::Invalid {
            var: "SYNC_DAILY_AT",
            value: daily_sync_at,
        })?;

        Ok(Self {
            supabase_url: var_with_fallback("SUPABASE_URL", "VITE_SUPABASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .ok_or(ConfigError::Missing("SUPABASE_URL"))?,
            supabase_service_role_key: required("SUPABASE_SERVICE_ROLE_KEY")?,
            supabase_user_id: required("SUPABASE_USER_ID")?,

            strava_client_id: var_with_fallback("STRAVA_CLIENT_ID", "VITE_STRAVA_CLIENT_ID")
                .ok_or(ConfigError::Missing("STRAVA_CLIENT_ID"))?,
            strava_client_secret: var_with_fallback(
                "STRAVA_CLIENT_SECRET",
                "VITE_STRAVA_CLIENT_SECRET",
            )
            .ok_or(ConfigError::Missing("STRAVA_CLIENT_SECRET"))?,
            strava_api_url: env::var("STRAVA_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_STRAVA_API_URL.to_string()),
            strava_oauth_url: env::var("STRAVA_OAUTH_URL")
                .unwrap_or_else(|_| DEFAULT_STRAVA_OAUTH_URL.to_string()),

            port,
            mode,
            daily_sync_at,
        })
    }
}

/// Read a required, non-empty variable.
fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

/// Read `primary`, falling back to `fallback` (the frontend's `VITE_` names).
fn var_with_fallback(primary: &str, fallback: &str) -> Option<String> {
    [primary, fallback]
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

/// Parse an `HH:MM` (or `HH:MM:SS`) wall-clock time.
pub fn parse_daily_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for token refresh and activity listing.
//!
//! Handles:
//! - OAuth refresh-token exchange
//! - Paginated activity listing from an `after` cursor

use crate::config::{DEFAULT_STRAVA_API_URL, DEFAULT_STRAVA_OAUTH_URL};
use crate::error::SyncError;
use serde::Deserialize;
use std::time::Duration;

/// Page size for activity listing (Strava maximum).
pub const ACTIVITIES_PER_PAGE: u32 = 200;

/// Pause between page requests to stay friendly with Strava rate limits.
const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(200);

/// Per-request deadline for Strava calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    oauth_url: String,
    client_id: String,
    client_secret: String,
    page_delay: Duration,
}

impl StravaClient {
    /// Create a new Strava client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_STRAVA_API_URL.to_string(),
            oauth_url: DEFAULT_STRAVA_OAUTH_URL.to_string(),
            client_id,
            client_secret,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    /// Point the client at different API and OAuth endpoints.
    pub fn with_endpoints(mut self, base_url: &str, oauth_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self.oauth_url = oauth_url.to_string();
        self
    }

    /// Override the pause between page requests.
    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    /// Exchange a refresh token for a new token pair.
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenRefreshResponse, SyncError> {
        let response = self
            .http
            .post(&self.oauth_url)
            .timeout(REQUEST_TIMEOUT)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await
            .map_err(|e| SyncError::Auth {
                status: None,
                body: format!("request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status, body = %body, "Strava token refresh failed");
            return Err(SyncError::Auth {
                status: Some(status),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| SyncError::Auth {
                status: None,
                body: format!("unreadable token response: {}", e),
            })
    }

    /// Fetch one page of the athlete's activities.
    pub async fn list_activities(
        &self,
        access_token: &str,
        after: Option<i64>, // Unix timestamp
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RemoteActivity>, SyncError> {
        let url = format!("{}/athlete/activities", self.base_url);

        let mut query = vec![
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ];
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }

        let response = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .bearer_auth(access_token)
            .query(&query)
            .send()
            .await
            .map_err(|e| SyncError::Fetch {
                status: None,
                body: format!("request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            if status == 429 {
                tracing::warn!("Strava rate limit hit (429)");
            }
            return Err(SyncError::Fetch {
                status: Some(status),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| SyncError::Fetch {
                status: None,
                body: format!("JSON parse error: {}", e),
            })
    }

    /// Fetch every activity after the cursor, page by page.
    ///
    /// Stops at the first empty or short page. Any failed page fails the
    /// whole fetch.
    pub async fn fetch_all_activities(
        &self,
        access_token: &str,
        after: Option<i64>,
    ) -> Result<Vec<RemoteActivity>, SyncError> {
        let mut all = Vec::new();
        let mut page = 1;

        loop {
            let activities = self
                .list_activities(access_token, after, page, ACTIVITIES_PER_PAGE)
                .await?;
            let count = activities.len();
            tracing::debug!(page, count, "Fetched activity page");

            if count == 0 {
                break;
            }

            all.extend(activities);
            if count < ACTIVITIES_PER_PAGE as usize {
                break;
            }

            page += 1;
            if !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        Ok(all)
    }
}

/// Token refresh response from Strava.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry as Unix epoch seconds
    pub expires_at: i64,
}

/// Summary activity from the listing endpoint.
///
/// Strava omits or nulls many of these depending on the activity and
/// the athlete's privacy settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteActivity {
    pub id: u64,
    pub name: Option<String>,
    pub sport_type: Option<String>,
    pub start_date: Option<String>,
    /// Seconds
    pub moving_time: Option<i64>,
    /// Seconds
    pub elapsed_time: Option<i64>,
    /// Meters
    pub distance: Option<f64>,
    /// Meters
    pub total_elevation_gain: Option<f64>,
    pub suffer_score: Option<f64>,
    pub average_heartrate: Option<f64>,
    pub calories: Option<f64>,
    pub location_city: Option<String>,
    pub location_state: Option<String>,
    /// e.g. "(GMT-08:00) America/Los_Angeles"
    pub timezone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_activity_tolerates_missing_and_null_fields() {
        let json = serde_json::json!({
            "id": 12345678901_u64,
            "name": null,
            "moving_time": 1800,
            "distance": 5000.5,
            "resource_state": 2
        });

        let activity: RemoteActivity = serde_json::from_value(json).unwrap();
        assert_eq!(activity.id, 12345678901);
        assert_eq!(activity.name, None);
        assert_eq!(activity.moving_time, Some(1800));
        assert_eq!(activity.sport_type, None);
        assert_eq!(activity.distance, Some(5000.5));
    }
}

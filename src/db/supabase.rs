// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Supabase store over the PostgREST API.
//!
//! Provides the three operations a sync needs:
//! - Read the user's settings row
//! - Patch the user's settings row (tokens, watermark)
//! - Upsert activities keyed on (`user_id`, `strava_id`)

use super::{tables, Store};
use crate::error::SyncError;
use crate::models::{ActivityRecord, SettingsUpdate, UserSettings};
use async_trait::async_trait;
use std::time::Duration;

/// Per-request deadline for store calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// PostgREST client authenticated with the service role key.
#[derive(Clone)]
pub struct SupabaseStore {
    http: reqwest::Client,
    rest_url: String,
    service_role_key: String,
}

impl SupabaseStore {
    /// Create a store for the project at `supabase_url`.
    pub fn new(supabase_url: &str, service_role_key: &str) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SyncError::Store(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            rest_url: format!("{}/rest/v1", supabase_url.trim_end_matches('/')),
            service_role_key: service_role_key.to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    /// Attach PostgREST auth headers.
    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
    }

    /// Check response status and return error if not successful.
    async fn check_response(
        response: reqwest::Response,
        operation: &str,
    ) -> Result<reqwest::Response, SyncError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(SyncError::Store(format!(
            "{} failed: HTTP {}: {}",
            operation, status, body
        )))
    }
}

#[async_trait]
impl Store for SupabaseStore {
    async fn get_user_settings(&self, user_id: &str) -> Result<Option<UserSettings>, SyncError> {
        let filter = format!("eq.{}", user_id);
        let response = self
            .authed(self.http.get(self.table_url(tables::USER_SETTINGS)))
            .query(&[("user_id", filter.as_str()), ("select", "*"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| SyncError::Store(e.to_string()))?;

        let rows: Vec<UserSettings> = Self::check_response(response, "Read user_settings")
            .await?
            .json()
            .await
            .map_err(|e| SyncError::Store(format!("JSON parse error: {}", e)))?;

        Ok(rows.into_iter().next())
    }

    async fn update_user_settings(
        &self,
        user_id: &str,
        update: &SettingsUpdate,
    ) -> Result<(), SyncError> {
        let filter = format!("eq.{}", user_id);
        let response = self
            .authed(self.http.patch(self.table_url(tables::USER_SETTINGS)))
            .query(&[("user_id", filter.as_str())])
            .header("Prefer", "return=minimal")
            .json(update)
            .send()
            .await
            .map_err(|e| SyncError::Store(e.to_string()))?;

        Self::check_response(response, "Update user_settings").await?;
        Ok(())
    }

    async fn upsert_activity(&self, record: &ActivityRecord) -> Result<(), SyncError> {
        let response = self
            .authed(self.http.post(self.table_url(tables::ACTIVITIES)))
            .query(&[("on_conflict", tables::ACTIVITIES_CONFLICT_KEY)])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(record)
            .send()
            .await
            .map_err(|e| SyncError::Store(e.to_string()))?;

        Self::check_response(response, "Upsert activity").await?;
        Ok(())
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store for tests and offline runs.

use super::Store;
use crate::error::SyncError;
use crate::models::{ActivityRecord, SettingsUpdate, UserSettings};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Store backed by concurrent hash maps. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    settings: Arc<DashMap<String, UserSettings>>,
    activities: Arc<DashMap<(String, u64), ActivityRecord>>,
    upsert_calls: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed (or replace) a settings row.
    pub fn put_settings(&self, settings: UserSettings) {
        self.settings.insert(settings.user_id.clone(), settings);
    }

    /// Snapshot of a user's settings row.
    pub fn settings(&self, user_id: &str) -> Option<UserSettings> {
        self.settings.get(user_id).map(|s| s.clone())
    }

    /// Snapshot of a stored activity.
    pub fn activity(&self, user_id: &str, strava_id: u64) -> Option<ActivityRecord> {
        self.activities
            .get(&(user_id.to_string(), strava_id))
            .map(|a| a.clone())
    }

    /// Number of stored activity rows.
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    /// Number of upsert calls made, including overwrites.
    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_user_settings(&self, user_id: &str) -> Result<Option<UserSettings>, SyncError> {
        Ok(self.settings(user_id))
    }

    async fn update_user_settings(
        &self,
        user_id: &str,
        update: &SettingsUpdate,
    ) -> Result<(), SyncError> {
        // PostgREST PATCH on a missing row is a silent no-op; mirror that.
        if let Some(mut settings) = self.settings.get_mut(user_id) {
            settings.apply(update);
        }
        Ok(())
    }

    async fn upsert_activity(&self, record: &ActivityRecord) -> Result<(), SyncError> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        self.activities.insert(record.key(), record.clone());
        Ok(())
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Store layer (Supabase/PostgREST, plus an in-memory store for tests).

pub mod memory;
pub mod supabase;

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

use crate::error::SyncError;
use crate::models::{ActivityRecord, SettingsUpdate, UserSettings};
use async_trait::async_trait;

/// Table names as constants.
pub mod tables {
    pub const USER_SETTINGS: &str = "user_settings";
    pub const ACTIVITIES: &str = "activities";
    /// Composite uniqueness constraint on `activities`.
    pub const ACTIVITIES_CONFLICT_KEY: &str = "user_id,strava_id";
}

/// The three store operations a sync needs.
#[async_trait]
pub trait Store: Send + Sync {
    /// Read the settings row for a user, if one exists.
    async fn get_user_settings(&self, user_id: &str) -> Result<Option<UserSettings>, SyncError>;

    /// Apply a partial update to the user's settings row.
    async fn update_user_settings(
        &self,
        user_id: &str,
        update: &SettingsUpdate,
    ) -> Result<(), SyncError>;

    /// Insert an activity, overwriting any row with the same (`user_id`, `strava_id`).
    async fn upsert_activity(&self, record: &ActivityRecord) -> Result<(), SyncError>;
}

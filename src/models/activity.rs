// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity model as stored in the `activities` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored activity row, unique per (`user_id`, `strava_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Owning user
    pub user_id: String,
    /// Strava activity ID
    pub strava_id: u64,
    /// Sport type (Run, Ride, Hike, etc.)
    pub sport_type: String,
    /// Activity name/title
    pub name: String,
    /// Start date/time (ISO 8601, as reported by Strava)
    pub start_date: Option<String>,
    /// Duration in seconds
    pub duration: i64,
    /// Distance in meters
    pub distance: f64,
    /// Elevation gain in meters
    pub elevation_gain: f64,
    /// Strava suffer score
    pub training_load: Option<f64>,
    /// Average heart rate (bpm)
    pub hr_avg: Option<i64>,
    /// Calories burned
    pub calories: Option<f64>,
    /// City, state or timezone-derived label
    pub location_label: String,
    /// When this row was last written by a sync
    pub updated_at: DateTime<Utc>,
}

impl ActivityRecord {
    /// Composite uniqueness key.
    pub fn key(&self) -> (String, u64) {
        (self.user_id.clone(), self.strava_id)
    }
}

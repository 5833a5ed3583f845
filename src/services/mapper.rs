// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Maps Strava activities onto the `activities` table schema.

use crate::models::ActivityRecord;
use crate::services::strava::RemoteActivity;
use chrono::{DateTime, Utc};

const DEFAULT_SPORT_TYPE: &str = "Run";
const DEFAULT_NAME: &str = "Untitled";
const UNKNOWN_LOCATION: &str = "Unknown";

/// Build the stored record for one remote activity.
///
/// Empty strings and zero values count as absent, so they fall through
/// to the next candidate or the default.
pub fn map_activity(user_id: &str, act: &RemoteActivity, now: DateTime<Utc>) -> ActivityRecord {
    ActivityRecord {
        user_id: user_id.to_string(),
        strava_id: act.id,
        sport_type: non_empty(&act.sport_type)
            .unwrap_or(DEFAULT_SPORT_TYPE)
            .to_string(),
        name: non_empty(&act.name).unwrap_or(DEFAULT_NAME).to_string(),
        start_date: act.start_date.clone(),
        duration: act
            .moving_time
            .filter(|&t| t != 0)
            .or(act.elapsed_time.filter(|&t| t != 0))
            .unwrap_or(0),
        distance: act.distance.unwrap_or(0.0),
        elevation_gain: act.total_elevation_gain.unwrap_or(0.0),
        training_load: act.suffer_score,
        hr_avg: act
            .average_heartrate
            .filter(|&hr| hr != 0.0)
            .map(|hr| hr.round_ties_even() as i64),
        calories: act.calories,
        location_label: location_label(act),
        updated_at: now,
    }
}

/// City, else state, else the last segment of the timezone name.
fn location_label(act: &RemoteActivity) -> String {
    non_empty(&act.location_city)
        .or_else(|| non_empty(&act.location_state))
        .map(str::to_string)
        .or_else(|| {
            non_empty(&act.timezone)
                .and_then(|tz| tz.rsplit('/').next())
                .map(str::to_string)
        })
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_bare_activity_gets_defaults() {
        let act = RemoteActivity {
            id: 7,
            ..Default::default()
        };

        let record = map_activity("u1", &act, now());

        assert_eq!(record.user_id, "u1");
        assert_eq!(record.strava_id, 7);
        assert_eq!(record.sport_type, "Run");
        assert_eq!(record.name, "Untitled");
        assert_eq!(record.start_date, None);
        assert_eq!(record.duration, 0);
        assert_eq!(record.distance, 0.0);
        assert_eq!(record.elevation_gain, 0.0);
        assert_eq!(record.training_load, None);
        assert_eq!(record.hr_avg, None);
        assert_eq!(record.calories, None);
        assert_eq!(record.location_label, "Unknown");
        assert_eq!(record.updated_at, now());
    }

    #[test]
    fn test_full_activity_passes_through() {
        let act = RemoteActivity {
            id: 99,
            name: Some("Morning Ride".to_string()),
            sport_type: Some("GravelRide".to_string()),
            start_date: Some("2026-02-28T15:00:00Z".to_string()),
            moving_time: Some(3600),
            elapsed_time: Some(4000),
            distance: Some(40_000.0),
            total_elevation_gain: Some(512.3),
            suffer_score: Some(88.0),
            average_heartrate: Some(141.6),
            calories: Some(950.0),
            location_city: Some("Palo Alto".to_string()),
            location_state: Some("California".to_string()),
            timezone: Some("(GMT-08:00) America/Los_Angeles".to_string()),
        };

        let record = map_activity("u1", &act, now());

        assert_eq!(record.sport_type, "GravelRide");
        assert_eq!(record.name, "Morning Ride");
        assert_eq!(record.start_date.as_deref(), Some("2026-02-28T15:00:00Z"));
        assert_eq!(record.duration, 3600);
        assert_eq!(record.distance, 40_000.0);
        assert_eq!(record.elevation_gain, 512.3);
        assert_eq!(record.training_load, Some(88.0));
        assert_eq!(record.hr_avg, Some(142));
        assert_eq!(record.calories, Some(950.0));
        assert_eq!(record.location_label, "Palo Alto");
    }

    #[test]
    fn test_duration_falls_back_to_elapsed_time() {
        let act = RemoteActivity {
            id: 1,
            moving_time: Some(0),
            elapsed_time: Some(1234),
            ..Default::default()
        };
        assert_eq!(map_activity("u1", &act, now()).duration, 1234);

        let act = RemoteActivity {
            id: 1,
            elapsed_time: Some(99),
            ..Default::default()
        };
        assert_eq!(map_activity("u1", &act, now()).duration, 99);
    }

    #[test]
    fn test_location_falls_back_to_state_then_timezone() {
        let act = RemoteActivity {
            id: 1,
            location_city: Some(String::new()),
            location_state: Some("Oregon".to_string()),
            ..Default::default()
        };
        assert_eq!(map_activity("u1", &act, now()).location_label, "Oregon");

        let act = RemoteActivity {
            id: 1,
            timezone: Some("(GMT+01:00) Europe/Paris".to_string()),
            ..Default::default()
        };
        assert_eq!(map_activity("u1", &act, now()).location_label, "Paris");

        let act = RemoteActivity {
            id: 1,
            timezone: Some("UTC".to_string()),
            ..Default::default()
        };
        assert_eq!(map_activity("u1", &act, now()).location_label, "UTC");
    }

    #[test]
    fn test_heart_rate_rounding() {
        let hr = |value: f64| {
            let act = RemoteActivity {
                id: 1,
                average_heartrate: Some(value),
                ..Default::default()
            };
            map_activity("u1", &act, now()).hr_avg
        };

        assert_eq!(hr(150.4), Some(150));
        assert_eq!(hr(150.6), Some(151));
        // Ties go to the even neighbor.
        assert_eq!(hr(150.5), Some(150));
        assert_eq!(hr(151.5), Some(152));
        assert_eq!(hr(0.0), None);
    }

    #[test]
    fn test_empty_strings_use_defaults() {
        let act = RemoteActivity {
            id: 1,
            name: Some(String::new()),
            sport_type: Some(String::new()),
            timezone: Some(String::new()),
            ..Default::default()
        };

        let record = map_activity("u1", &act, now());
        assert_eq!(record.name, "Untitled");
        assert_eq!(record.sport_type, "Run");
        assert_eq!(record.location_label, "Unknown");
    }
}

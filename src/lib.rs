// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava-Sync: keep a Supabase activity table in step with Strava
//!
//! This crate syncs a user's Strava activities into Supabase on a daily
//! schedule and on demand through a small HTTP trigger endpoint.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use services::SyncTrigger;

/// Shared application state.
pub struct AppState {
    pub trigger: SyncTrigger,
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - sync business logic.

pub mod guard;
pub mod mapper;
pub mod scheduler;
pub mod strava;
pub mod sync;
pub mod tokens;
pub mod trigger;

pub use guard::SingleFlight;
pub use strava::{RemoteActivity, StravaClient};
pub use sync::{run_sync, run_sync_logged, SyncContext, SyncOutcome, SyncReport};
pub use trigger::{SyncTrigger, TriggerStatus};

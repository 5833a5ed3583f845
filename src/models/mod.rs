// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the store.

pub mod activity;
pub mod settings;

pub use activity::ActivityRecord;
pub use settings::{SettingsUpdate, UserSettings};

// ABOUTME: Engine-wide constants and environment-based configuration values
// ABOUTME: Anonymous name pool, defaults, and environment variable helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Fitness

//! # Constants Module
//!
//! Hardcoded constants and environment variable configuration helpers.

/// Leaderboard identity constants
pub mod leaderboard {
    /// Fixed pool of anonymous display names for non-owner leaderboard rows.
    ///
    /// The pool contents and order are part of the anonymization contract:
    /// a user's displayed identity is selected by checksum over their id
    /// modulo this length, so reordering or resizing the pool reshuffles
    /// every displayed name.
    pub const ANONYMOUS_NAMES: [&str; 15] = [
        "Fitness Pro",
        "Gym Warrior",
        "Health Hero",
        "Workout King",
        "Fit Master",
        "Strong Athlete",
        "Power Lifter",
        "Cardio Queen",
        "Muscle Builder",
        "Training Expert",
        "Fitness Guru",
        "Strength Star",
        "Active Champion",
        "Wellness Pro",
        "Fit Legend",
    ];
}

/// Default configuration values
pub mod defaults {
    /// Default SQLite database location
    pub const DATABASE_URL: &str = "sqlite:./data/streaks.db";

    /// Default log level
    pub const LOG_LEVEL: &str = "info";
}

/// Environment-based configuration
pub mod env_config {
    use std::env;

    use super::defaults;

    /// Get database URL from environment or default
    #[must_use]
    pub fn database_url() -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| defaults::DATABASE_URL.into())
    }

    /// Get log level from environment or default
    #[must_use]
    pub fn log_level() -> String {
        env::var("LOG_LEVEL").unwrap_or_else(|_| defaults::LOG_LEVEL.into())
    }

    /// Get log format from environment (`json`, `pretty`, or `compact`)
    #[must_use]
    pub fn log_format() -> Option<String> {
        env::var("LOG_FORMAT").ok()
    }

    /// Get clock timezone policy from environment (`local` or `utc`)
    #[must_use]
    pub fn clock_policy() -> Option<String> {
        env::var("STREAKS_CLOCK").ok()
    }
}

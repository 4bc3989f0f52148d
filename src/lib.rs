// ABOUTME: Main library entry point for the Stride streak and leaderboard engine
// ABOUTME: Wires clock, store, and services behind a small embeddable API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Fitness

#![deny(unsafe_code)]

//! # Stride Streaks
//!
//! The streak and leaderboard engine of the Stride fitness application:
//! the rules that decide whether a user's daily-workout streak continues,
//! resets, or increments, and the algorithm that turns all users' streak
//! records into a ranked, privacy-preserving leaderboard.
//!
//! ## Guarantees
//!
//! - **Idempotent completions**: logging a workout more than once on the
//!   same calendar day counts exactly once, even across racing devices
//! - **Day-boundary correctness**: all comparisons happen at calendar-day
//!   granularity under an explicit, injected clock
//! - **Stable anonymization**: non-owner leaderboard identities are
//!   deterministic anonymous names; real names and emails never leak
//!
//! ## Architecture
//!
//! - **Clock**: [`clock::ClockSource`] supplies "today"
//! - **Store**: [`database::StreakStore`] persists one record per user
//! - **Services**: [`services::streaks`] evaluates and records
//!   completions; [`services::leaderboard`] builds ranked views
//!
//! ## Example
//!
//! ```rust,no_run
//! use stride_streaks::clock::SystemClock;
//! use stride_streaks::database::Database;
//! use stride_streaks::errors::AppResult;
//! use stride_streaks::services::streaks;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let db = Database::new("sqlite::memory:").await?;
//!     let store = db.streaks();
//!     let clock = SystemClock::default();
//!
//!     let outcome = streaks::record_completion(&store, &clock, Uuid::new_v4()).await?;
//!     println!("accepted: {}, streak: {}", outcome.accepted, outcome.record.current_streak);
//!     Ok(())
//! }
//! ```

/// Calendar-day clock abstraction
pub mod clock;

/// Environment-based configuration
pub mod config;

/// Engine-wide constants and environment helpers
pub mod constants;

/// Database management and the `StreakStore` contract
pub mod database;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Core data models
pub mod models;

/// Domain services: streaks and leaderboard
pub mod services;

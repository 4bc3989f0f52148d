// ABOUTME: Database management and the StreakStore persistence contract
// ABOUTME: SqlitePool wrapper with migrations plus the async store trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Fitness

//! # Database Management
//!
//! This module provides the persistence boundary for the streak engine:
//! a [`Database`] wrapper owning the `SQLite` pool and running migrations,
//! and the [`StreakStore`] trait that the service layer is written against.
//! Hosts backed by another relational store implement [`StreakStore`]
//! themselves; [`SqliteStreakStore`] is the shipped implementation.

pub mod streaks;

pub use streaks::SqliteStreakStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::StreakRecord;

/// Database manager wrapping the `SQLite` connection pool
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration fails.
    pub async fn new(database_url: &str) -> AppResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options)
            .await
            .map_err(|e| store_error("Failed to connect to database", &e))?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Streak store over this database
    #[must_use]
    pub fn streaks(&self) -> SqliteStreakStore {
        SqliteStreakStore::new(self.pool.clone())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails.
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_streaks (
                user_id TEXT PRIMARY KEY,
                current_streak INTEGER NOT NULL DEFAULT 0,
                longest_streak INTEGER NOT NULL DEFAULT 0,
                last_workout_date TEXT,
                total_workouts INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to create user_streaks table", &e))?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_user_streaks_order
            ON user_streaks(current_streak DESC, total_workouts DESC)
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to create user_streaks index", &e))?;

        Ok(())
    }
}

/// Field set persisted by an accepted completion.
///
/// All four fields land in one conditional row update so a completion is
/// atomic from the caller's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakCompletion {
    /// New streak length
    pub current_streak: u32,
    /// New historical maximum
    pub longest_streak: u32,
    /// New lifetime count
    pub total_workouts: u32,
    /// The day being logged
    pub workout_date: NaiveDate,
}

/// Persistence contract for streak records.
///
/// All writes are scoped to a single user's own row. The two mutation
/// methods are conditional: they report whether the write applied, and a
/// `false` return means a concurrent mutation won the race — callers
/// re-fetch instead of retrying blindly, preserving idempotency.
#[async_trait]
pub trait StreakStore: Send + Sync {
    /// Fetch a user's streak record, `None` if the user has none yet
    async fn get_streak(&self, user_id: Uuid) -> AppResult<Option<StreakRecord>>;

    /// Create a zeroed record for a user.
    ///
    /// Concurrent first-touch creates collapse to the surviving row, so
    /// this is safe to call from racing readers.
    async fn create_streak(&self, user_id: Uuid) -> AppResult<StreakRecord>;

    /// Reset an expired streak to zero, clearing the last workout date.
    ///
    /// Applies only while the stored `last_workout_date` still equals
    /// `expected_last_workout`; returns whether the write applied.
    async fn reset_streak(
        &self,
        user_id: Uuid,
        expected_last_workout: NaiveDate,
    ) -> AppResult<bool>;

    /// Persist an accepted completion in one atomic row update.
    ///
    /// Applies only while the stored `last_workout_date` still differs
    /// from `completion.workout_date`; returns whether the write applied.
    /// A `false` return means the day was already logged by a concurrent
    /// call.
    async fn apply_completion(
        &self,
        user_id: Uuid,
        completion: &StreakCompletion,
    ) -> AppResult<bool>;

    /// Snapshot of all streak records in stable creation order
    async fn list_streaks(&self) -> AppResult<Vec<StreakRecord>>;
}

/// Map a sqlx error into the engine taxonomy, keeping the query context.
///
/// Pool and I/O failures surface as `StoreUnavailable`; everything else is
/// a `DatabaseError`.
pub(crate) fn store_error(context: &str, err: &sqlx::Error) -> AppError {
    let message = format!("{context}: {err}");
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            AppError::store_unavailable(message)
        }
        _ => AppError::database(message),
    }
}

// ABOUTME: SQLite implementation of the StreakStore persistence contract
// ABOUTME: Row mapping plus conditional reset and completion updates over user_streaks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Fitness

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{store_error, StreakCompletion, StreakStore};
use crate::errors::{AppError, AppResult};
use crate::models::StreakRecord;

/// Streak store backed by the `user_streaks` table.
///
/// Wraps a `SqlitePool` clone; cheap to construct per request, like the
/// other managers in this codebase.
pub struct SqliteStreakStore {
    pool: SqlitePool,
}

impl SqliteStreakStore {
    /// Create a new store over the given pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &SqliteRow) -> AppResult<StreakRecord> {
        let user_id_str: String = row.get("user_id");
        let current_streak: i64 = row.get("current_streak");
        let longest_streak: i64 = row.get("longest_streak");
        let last_workout_date_str: Option<String> = row.get("last_workout_date");
        let total_workouts: i64 = row.get("total_workouts");
        let created_at_str: String = row.get("created_at");

        Ok(StreakRecord {
            user_id: Uuid::parse_str(&user_id_str)
                .map_err(|e| AppError::database(format!("Invalid UUID: {e}")))?,
            current_streak: u32::try_from(current_streak)
                .map_err(|e| AppError::database(format!("Invalid streak count: {e}")))?,
            longest_streak: u32::try_from(longest_streak)
                .map_err(|e| AppError::database(format!("Invalid streak count: {e}")))?,
            last_workout_date: last_workout_date_str
                .map(|s| {
                    s.parse::<NaiveDate>()
                        .map_err(|e| AppError::database(format!("Invalid date: {e}")))
                })
                .transpose()?,
            total_workouts: u32::try_from(total_workouts)
                .map_err(|e| AppError::database(format!("Invalid workout count: {e}")))?,
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .map_err(|e| AppError::database(format!("Invalid date: {e}")))?
                .with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl StreakStore for SqliteStreakStore {
    async fn get_streak(&self, user_id: Uuid) -> AppResult<Option<StreakRecord>> {
        let row = sqlx::query(
            r"
            SELECT user_id, current_streak, longest_streak, last_workout_date,
                   total_workouts, created_at
            FROM user_streaks
            WHERE user_id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to get streak record", &e))?;

        row.map(|r| Self::row_to_record(&r)).transpose()
    }

    async fn create_streak(&self, user_id: Uuid) -> AppResult<StreakRecord> {
        let record = StreakRecord::new(user_id);

        let result = sqlx::query(
            r"
            INSERT INTO user_streaks (user_id, current_streak, longest_streak,
                                      last_workout_date, total_workouts, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT(user_id) DO NOTHING
            ",
        )
        .bind(record.user_id.to_string())
        .bind(i64::from(record.current_streak))
        .bind(i64::from(record.longest_streak))
        .bind(record.last_workout_date.map(|d| d.to_string()))
        .bind(i64::from(record.total_workouts))
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to create streak record", &e))?;

        if result.rows_affected() == 0 {
            // A concurrent first touch created the row; return the survivor
            return self
                .get_streak(user_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("streak record for {user_id}")));
        }

        Ok(record)
    }

    async fn reset_streak(
        &self,
        user_id: Uuid,
        expected_last_workout: NaiveDate,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE user_streaks
            SET current_streak = 0, last_workout_date = NULL
            WHERE user_id = $1 AND last_workout_date = $2
            ",
        )
        .bind(user_id.to_string())
        .bind(expected_last_workout.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to reset streak record", &e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn apply_completion(
        &self,
        user_id: Uuid,
        completion: &StreakCompletion,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE user_streaks
            SET current_streak = $1, longest_streak = $2,
                total_workouts = $3, last_workout_date = $4
            WHERE user_id = $5
              AND (last_workout_date IS NULL OR last_workout_date <> $6)
            ",
        )
        .bind(i64::from(completion.current_streak))
        .bind(i64::from(completion.longest_streak))
        .bind(i64::from(completion.total_workouts))
        .bind(completion.workout_date.to_string())
        .bind(user_id.to_string())
        .bind(completion.workout_date.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to apply completion", &e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_streaks(&self) -> AppResult<Vec<StreakRecord>> {
        // Creation order gives exact-tie rows a stable position across builds
        let rows = sqlx::query(
            r"
            SELECT user_id, current_streak, longest_streak, last_workout_date,
                   total_workouts, created_at
            FROM user_streaks
            ORDER BY created_at ASC, user_id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("Failed to list streak records", &e))?;

        rows.iter().map(Self::row_to_record).collect()
    }
}

// ABOUTME: Streak domain service: pure day-boundary evaluation plus stateful orchestration
// ABOUTME: get_state normalizes expiry; record_completion increments with an idempotency guarantee
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Fitness

use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use crate::clock::ClockSource;
use crate::database::{StreakCompletion, StreakStore};
use crate::errors::{AppError, AppResult};
use crate::models::{CompletionOutcome, StreakRecord};

/// Outcome of evaluating a stored record against "today"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakDecision {
    /// The streak stands and no increment is possible; a completion is
    /// already logged for today
    Continue,
    /// The last completion is older than yesterday; the streak must be
    /// reset to zero before any new increment is considered
    Expired,
    /// No completion logged today; an increment is allowed
    Eligible,
}

/// Decide whether a streak survives, resets, or may extend today.
///
/// Pure function of `(record, today)` at calendar-day granularity, total
/// over any well-formed record:
/// - no last workout → `Eligible` (streak stays 0 until an increment)
/// - last workout today → `Continue` (further record calls are rejected)
/// - last workout yesterday → `Eligible` (streak intact, may extend)
/// - last workout before yesterday → `Expired`
#[must_use]
pub fn evaluate(record: &StreakRecord, today: NaiveDate) -> StreakDecision {
    let yesterday = today.pred_opt();

    match record.last_workout_date {
        None => StreakDecision::Eligible,
        Some(last) if last == today => StreakDecision::Continue,
        Some(last) if Some(last) == yesterday => StreakDecision::Eligible,
        Some(last) if last < today => StreakDecision::Expired,
        // Future-dated rows (device clock skew) are left untouched
        Some(_) => StreakDecision::Continue,
    }
}

/// Read a user's normalized streak state.
///
/// Creates a zeroed record on first touch. If the stored streak has
/// expired, the reset is persisted before returning, so callers always see
/// a record consistent with "today". At most one reset write occurs; a
/// lost conditional write falls back to re-fetching the newer row.
///
/// # Errors
///
/// Returns store errors from the read, create, or reset write.
pub async fn get_state<S>(
    store: &S,
    clock: &dyn ClockSource,
    user_id: Uuid,
) -> AppResult<StreakRecord>
where
    S: StreakStore + ?Sized,
{
    let Some(record) = store.get_streak(user_id).await? else {
        debug!(%user_id, "no streak record yet, creating zeroed record");
        return store.create_streak(user_id).await;
    };

    let today = clock.today();
    if evaluate(&record, today) != StreakDecision::Expired {
        return Ok(record);
    }

    // Expired implies a concrete last workout date; key the reset on it so
    // a concurrent completion is never clobbered
    let Some(last) = record.last_workout_date else {
        return Ok(record);
    };

    if store.reset_streak(user_id, last).await? {
        info!(%user_id, expired_streak = record.current_streak, "streak expired, reset to zero");
        return Ok(StreakRecord {
            current_streak: 0,
            last_workout_date: None,
            ..record
        });
    }

    // Lost the conditional write: the stored row is newer than our read
    refetch(store, user_id).await
}

/// Record today's workout completion for a user.
///
/// Idempotent per calendar day: the first call of the day is accepted and
/// increments the streak (or restarts it at 1 after a gap); every further
/// call the same day is rejected with the record unchanged. The write is a
/// single conditional update, so two devices racing on the same day
/// produce exactly one accepted call.
///
/// # Errors
///
/// Returns store errors from the state read or the completion write.
pub async fn record_completion<S>(
    store: &S,
    clock: &dyn ClockSource,
    user_id: Uuid,
) -> AppResult<CompletionOutcome>
where
    S: StreakStore + ?Sized,
{
    let record = get_state(store, clock, user_id).await?;
    let today = clock.today();

    if record.last_workout_date == Some(today) {
        debug!(%user_id, "completion already logged today");
        return Ok(CompletionOutcome {
            accepted: false,
            record,
            message: already_logged_message(),
        });
    }

    let extends = matches!(
        (record.last_workout_date, today.pred_opt()),
        (Some(last), Some(yesterday)) if last == yesterday
    );
    let new_streak = if extends { record.current_streak + 1 } else { 1 };

    let completion = StreakCompletion {
        current_streak: new_streak,
        longest_streak: record.longest_streak.max(new_streak),
        total_workouts: record.total_workouts + 1,
        workout_date: today,
    };

    if !store.apply_completion(user_id, &completion).await? {
        // Another device logged today between our read and write; report
        // rejection, never a second increment
        debug!(%user_id, "completion raced with a concurrent log, rejecting");
        let record = refetch(store, user_id).await?;
        return Ok(CompletionOutcome {
            accepted: false,
            record,
            message: already_logged_message(),
        });
    }

    info!(%user_id, streak = new_streak, total = completion.total_workouts, "workout completion recorded");

    Ok(CompletionOutcome {
        accepted: true,
        record: StreakRecord {
            current_streak: completion.current_streak,
            longest_streak: completion.longest_streak,
            total_workouts: completion.total_workouts,
            last_workout_date: Some(today),
            ..record
        },
        message: completion_message(new_streak),
    })
}

async fn refetch<S>(store: &S, user_id: Uuid) -> AppResult<StreakRecord>
where
    S: StreakStore + ?Sized,
{
    store
        .get_streak(user_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("streak record for {user_id}")))
}

fn already_logged_message() -> String {
    "You've already completed a workout today. Keep up the great work!".to_owned()
}

fn completion_message(streak: u32) -> String {
    if streak == 1 {
        "Great job! You've started your fitness streak!".to_owned()
    } else if streak % 7 == 0 {
        format!("Amazing! You've hit a {streak}-day streak!")
    } else {
        format!("Fantastic! Your streak is now {streak} days!")
    }
}

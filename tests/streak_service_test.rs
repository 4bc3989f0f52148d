// ABOUTME: Integration tests for the streak service over an in-memory store
// ABOUTME: Covers idempotency, continuity, expiry, monotonic longest, and race paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Fitness

#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use chrono::NaiveDate;
use common::create_test_database;
use stride_streaks::clock::FixedClock;
use stride_streaks::database::{StreakCompletion, StreakStore};
use stride_streaks::services::streaks::{get_state, record_completion};
use uuid::Uuid;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn new_user_state_is_zeroed_and_persisted() {
    let db = create_test_database().await;
    let store = db.streaks();
    let user_id = Uuid::new_v4();
    let clock = FixedClock::new(day(2025, 6, 15));

    let record = get_state(&store, &clock, user_id).await.unwrap();
    assert_eq!(record.current_streak, 0);
    assert_eq!(record.longest_streak, 0);
    assert_eq!(record.total_workouts, 0);
    assert!(record.last_workout_date.is_none());

    // Lazy creation is persisted, not just returned
    let stored = store.get_streak(user_id).await.unwrap();
    assert!(stored.is_some());
}

#[tokio::test]
async fn first_completion_starts_streak_at_one() {
    let db = create_test_database().await;
    let store = db.streaks();
    let user_id = Uuid::new_v4();
    let today = day(2025, 6, 15);
    let clock = FixedClock::new(today);

    let outcome = record_completion(&store, &clock, user_id).await.unwrap();
    assert!(outcome.accepted);
    assert_eq!(outcome.record.current_streak, 1);
    assert_eq!(outcome.record.longest_streak, 1);
    assert_eq!(outcome.record.total_workouts, 1);
    assert_eq!(outcome.record.last_workout_date, Some(today));
    assert!(outcome.message.contains("started"));
}

#[tokio::test]
async fn consecutive_days_extend_the_streak() {
    let db = create_test_database().await;
    let store = db.streaks();
    let user_id = Uuid::new_v4();

    // Four consecutive days, then a fifth
    for offset in 0..4u32 {
        let clock = FixedClock::new(day(2025, 6, 10 + offset));
        let outcome = record_completion(&store, &clock, user_id).await.unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.record.current_streak, offset + 1);
    }

    let clock = FixedClock::new(day(2025, 6, 14));
    let outcome = record_completion(&store, &clock, user_id).await.unwrap();
    assert!(outcome.accepted);
    assert_eq!(outcome.record.current_streak, 5);
    assert_eq!(outcome.record.longest_streak, 5);
    assert_eq!(outcome.record.total_workouts, 5);
}

#[tokio::test]
async fn repeat_calls_same_day_are_rejected_without_double_counting() {
    let db = create_test_database().await;
    let store = db.streaks();
    let user_id = Uuid::new_v4();
    let clock = FixedClock::new(day(2025, 6, 15));

    let first = record_completion(&store, &clock, user_id).await.unwrap();
    assert!(first.accepted);

    for _ in 0..3 {
        let repeat = record_completion(&store, &clock, user_id).await.unwrap();
        assert!(!repeat.accepted);
        assert!(repeat.message.contains("already"));
        assert_eq!(repeat.record.current_streak, 1);
        assert_eq!(repeat.record.total_workouts, 1);
    }

    let stored = store.get_streak(user_id).await.unwrap().unwrap();
    assert_eq!(stored.current_streak, 1);
    assert_eq!(stored.total_workouts, 1);
}

#[tokio::test]
async fn lapsed_streak_restarts_at_one_and_keeps_longest() {
    let db = create_test_database().await;
    let store = db.streaks();
    let user_id = Uuid::new_v4();
    let today = day(2025, 6, 15);

    // A ten-day streak whose last workout was five days ago
    store.create_streak(user_id).await.unwrap();
    let seeded = StreakCompletion {
        current_streak: 10,
        longest_streak: 10,
        total_workouts: 10,
        workout_date: day(2025, 6, 10),
    };
    assert!(store.apply_completion(user_id, &seeded).await.unwrap());

    let clock = FixedClock::new(today);
    let outcome = record_completion(&store, &clock, user_id).await.unwrap();
    assert!(outcome.accepted);
    assert_eq!(outcome.record.current_streak, 1);
    assert_eq!(outcome.record.longest_streak, 10);
    assert_eq!(outcome.record.total_workouts, 11);
    assert_eq!(outcome.record.last_workout_date, Some(today));
}

#[tokio::test]
async fn get_state_persists_the_expiry_reset() {
    let db = create_test_database().await;
    let store = db.streaks();
    let user_id = Uuid::new_v4();

    store.create_streak(user_id).await.unwrap();
    let seeded = StreakCompletion {
        current_streak: 5,
        longest_streak: 8,
        total_workouts: 20,
        workout_date: day(2025, 6, 12),
    };
    assert!(store.apply_completion(user_id, &seeded).await.unwrap());

    let clock = FixedClock::new(day(2025, 6, 15));
    let record = get_state(&store, &clock, user_id).await.unwrap();
    assert_eq!(record.current_streak, 0);
    assert!(record.last_workout_date.is_none());

    // The reset is written through, and untouched fields survive it
    let stored = store.get_streak(user_id).await.unwrap().unwrap();
    assert_eq!(stored.current_streak, 0);
    assert!(stored.last_workout_date.is_none());
    assert_eq!(stored.longest_streak, 8);
    assert_eq!(stored.total_workouts, 20);
}

#[tokio::test]
async fn get_state_leaves_live_streaks_alone() {
    let db = create_test_database().await;
    let store = db.streaks();
    let user_id = Uuid::new_v4();
    let yesterday = day(2025, 6, 14);

    store.create_streak(user_id).await.unwrap();
    let seeded = StreakCompletion {
        current_streak: 3,
        longest_streak: 3,
        total_workouts: 3,
        workout_date: yesterday,
    };
    assert!(store.apply_completion(user_id, &seeded).await.unwrap());

    let clock = FixedClock::new(day(2025, 6, 15));
    let record = get_state(&store, &clock, user_id).await.unwrap();
    assert_eq!(record.current_streak, 3);
    assert_eq!(record.last_workout_date, Some(yesterday));
}

#[tokio::test]
async fn longest_streak_never_decreases() {
    let db = create_test_database().await;
    let store = db.streaks();
    let user_id = Uuid::new_v4();

    // Three-day run, a gap, then a two-day run
    let days = [
        day(2025, 6, 1),
        day(2025, 6, 2),
        day(2025, 6, 3),
        day(2025, 6, 10),
        day(2025, 6, 11),
    ];

    let mut longest_seen = 0;
    for date in days {
        let clock = FixedClock::new(date);
        let outcome = record_completion(&store, &clock, user_id).await.unwrap();
        assert!(outcome.accepted);
        assert!(outcome.record.longest_streak >= outcome.record.current_streak);
        assert!(outcome.record.longest_streak >= longest_seen);
        longest_seen = outcome.record.longest_streak;
    }

    let stored = store.get_streak(user_id).await.unwrap().unwrap();
    assert_eq!(stored.current_streak, 2);
    assert_eq!(stored.longest_streak, 3);
    assert_eq!(stored.total_workouts, 5);
}

#[tokio::test]
async fn concurrent_same_day_log_is_reported_as_already_logged() {
    let db = create_test_database().await;
    let store = db.streaks();
    let user_id = Uuid::new_v4();
    let today = day(2025, 6, 15);

    store.create_streak(user_id).await.unwrap();

    // Another device wins the write after our read would have happened
    let other_device = StreakCompletion {
        current_streak: 1,
        longest_streak: 1,
        total_workouts: 1,
        workout_date: today,
    };
    assert!(store.apply_completion(user_id, &other_device).await.unwrap());

    let clock = FixedClock::new(today);
    let outcome = record_completion(&store, &clock, user_id).await.unwrap();
    assert!(!outcome.accepted);
    assert_eq!(outcome.record.total_workouts, 1);
}

#[tokio::test]
async fn racing_first_touches_collapse_to_one_record() {
    let db = create_test_database().await;
    let store = db.streaks();
    let user_id = Uuid::new_v4();
    let clock = FixedClock::new(day(2025, 6, 15));

    let first = get_state(&store, &clock, user_id).await.unwrap();
    let second = get_state(&store, &clock, user_id).await.unwrap();
    assert_eq!(first.user_id, second.user_id);

    let all = store.list_streaks().await.unwrap();
    assert_eq!(all.iter().filter(|r| r.user_id == user_id).count(), 1);
}

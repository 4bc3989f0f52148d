// ABOUTME: Leaderboard domain service: ranked, privacy-preserving view assembly
// ABOUTME: Two-key stable sort, positional ranks, and deterministic identity anonymization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Fitness

use uuid::Uuid;

use crate::constants::leaderboard::ANONYMOUS_NAMES;
use crate::database::StreakStore;
use crate::errors::AppResult;
use crate::models::{LeaderboardEntry, RankSummary, StreakRecord, Viewer};

/// Assemble the ranked, anonymized leaderboard for a viewer.
///
/// Sort order is `current_streak` descending, then `total_workouts`
/// descending. Rank is the 1-based sequence position, so exact ties still
/// receive adjacent distinct ranks; the store's creation-order listing
/// keeps those positions stable across rebuilds.
///
/// Only the viewer's own row carries their real name. Every other row gets
/// a deterministic anonymous name; real names and emails never appear.
///
/// # Errors
///
/// Returns store errors from the bulk read.
pub async fn build_leaderboard<S>(store: &S, viewer: &Viewer) -> AppResult<Vec<LeaderboardEntry>>
where
    S: StreakStore + ?Sized,
{
    let records = sorted_records(store).await?;

    let entries = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let rank = (index + 1) as u32;
            if record.user_id == viewer.user_id {
                owner_entry(rank, &record, viewer)
            } else {
                anonymous_entry(rank, &record)
            }
        })
        .collect();

    Ok(entries)
}

/// Look up a single user's leaderboard position.
///
/// Uses the same sorted sequence as [`build_leaderboard`], so the returned
/// rank always matches the user's visible row. `rank` is `None` when the
/// user has no record — unranked, never zero.
///
/// # Errors
///
/// Returns store errors from the bulk read.
pub async fn user_rank<S>(store: &S, user_id: Uuid) -> AppResult<RankSummary>
where
    S: StreakStore + ?Sized,
{
    let records = sorted_records(store).await?;

    let total = records.len() as u32;
    let rank = records
        .iter()
        .position(|record| record.user_id == user_id)
        .map(|index| (index + 1) as u32);

    Ok(RankSummary { rank, total })
}

/// Deterministic anonymous display name for a non-owner user.
///
/// Selects from the fixed pool by summing the character codes of the
/// hyphenated user id string modulo the pool size. The checksum is part of
/// the anonymization contract: the same user maps to the same name across
/// repeated builds, and changing the scheme would reshuffle everyone's
/// displayed identity.
#[must_use]
pub fn anonymous_name(user_id: Uuid) -> &'static str {
    let checksum: usize = user_id.to_string().chars().map(|c| c as usize).sum();
    ANONYMOUS_NAMES[checksum % ANONYMOUS_NAMES.len()]
}

/// Bulk snapshot in leaderboard order.
///
/// Stable two-key sort over the store's creation-order listing; no
/// locking, the result is an advisory display snapshot.
async fn sorted_records<S>(store: &S) -> AppResult<Vec<StreakRecord>>
where
    S: StreakStore + ?Sized,
{
    let mut records = store.list_streaks().await?;
    records.sort_by(|a, b| {
        b.current_streak
            .cmp(&a.current_streak)
            .then_with(|| b.total_workouts.cmp(&a.total_workouts))
    });
    Ok(records)
}

fn owner_entry(rank: u32, record: &StreakRecord, viewer: &Viewer) -> LeaderboardEntry {
    LeaderboardEntry {
        rank,
        display_name: viewer.display_name(),
        streak: record.current_streak,
        total_workouts: record.total_workouts,
        longest_streak: record.longest_streak,
        last_workout_date: record.last_workout_date,
        user_id: record.user_id,
        is_current_user: true,
        avatar_initial: viewer.avatar_initial(),
    }
}

fn anonymous_entry(rank: u32, record: &StreakRecord) -> LeaderboardEntry {
    let name = anonymous_name(record.user_id);

    LeaderboardEntry {
        rank,
        display_name: name.to_owned(),
        streak: record.current_streak,
        total_workouts: record.total_workouts,
        longest_streak: record.longest_streak,
        last_workout_date: record.last_workout_date,
        user_id: record.user_id,
        is_current_user: false,
        avatar_initial: initials(name),
    }
}

/// Avatar initials for an anonymous name: first character of each word
fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_name_is_deterministic() {
        let user_id = Uuid::new_v4();
        assert_eq!(anonymous_name(user_id), anonymous_name(user_id));
    }

    #[test]
    fn anonymous_name_matches_checksum_contract() {
        // The nil UUID string is 32 '0' characters and 4 hyphens:
        // 32 * 48 + 4 * 45 = 1716, and 1716 % 15 = 6
        assert_eq!(anonymous_name(Uuid::nil()), ANONYMOUS_NAMES[6]);
    }

    #[test]
    fn initials_take_first_letter_of_each_word() {
        assert_eq!(initials("Fitness Pro"), "FP");
        assert_eq!(initials("Fit Legend"), "FL");
    }
}

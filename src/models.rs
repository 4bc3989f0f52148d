// ABOUTME: Core data models for streak tracking and leaderboard views
// ABOUTME: StreakRecord persistence model plus derived leaderboard and outcome types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Fitness

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One user's daily-workout streak state.
///
/// Exactly one record exists per user, created lazily on first streak check
/// and mutated only through the completion and expiry-reset paths. Records
/// are never deleted.
///
/// Invariants maintained by the service layer:
/// - `longest_streak >= current_streak`
/// - `current_streak == 0` whenever `last_workout_date` is `None`
/// - `total_workouts` only ever increases
/// - at most one increment per calendar day per user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    /// Owning user
    pub user_id: Uuid,
    /// Consecutive days with a logged completion
    pub current_streak: u32,
    /// Historical maximum of `current_streak`
    pub longest_streak: u32,
    /// Calendar date of the most recent logged completion, no time component
    pub last_workout_date: Option<NaiveDate>,
    /// Lifetime completion count
    pub total_workouts: u32,
    /// Row creation instant; supplies the stable tie order for leaderboard input
    pub created_at: DateTime<Utc>,
}

impl StreakRecord {
    /// Create a zeroed record for a user with no logged workouts
    #[must_use]
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            current_streak: 0,
            longest_streak: 0,
            last_workout_date: None,
            total_workouts: 0,
            created_at: Utc::now(),
        }
    }
}

/// One row of the assembled leaderboard.
///
/// Ephemeral view model, recomputed on every build from the current record
/// set. Carries no email field: non-owner identities are anonymized and the
/// viewer already knows their own address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position in the sorted sequence
    pub rank: u32,
    /// Viewer's own name, or a deterministic anonymous name for everyone else
    pub display_name: String,
    /// Current streak in days
    pub streak: u32,
    /// Lifetime completion count
    pub total_workouts: u32,
    /// Historical maximum streak
    pub longest_streak: u32,
    /// Date of the most recent logged completion
    pub last_workout_date: Option<NaiveDate>,
    /// Owning user
    pub user_id: Uuid,
    /// Whether this row belongs to the requesting viewer
    pub is_current_user: bool,
    /// Initial(s) shown in the avatar badge
    pub avatar_initial: String,
}

/// Result of a `record_completion` call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionOutcome {
    /// Whether the completion was counted; `false` means the day was
    /// already logged and the record is unchanged
    pub accepted: bool,
    /// The record after the operation
    pub record: StreakRecord,
    /// User-facing outcome message
    pub message: String,
}

/// A single user's leaderboard position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankSummary {
    /// 1-based rank, or `None` when the user has no record yet.
    /// Unranked is never reported as zero.
    pub rank: Option<u32>,
    /// Count of all records in the leaderboard
    pub total: u32,
}

/// Identity of the user requesting a leaderboard view.
///
/// The subset of the host application's profile the engine needs to label
/// the viewer's own row. Other users' identities never reach the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewer {
    /// Requesting user
    pub user_id: Uuid,
    /// First name from the host profile, if set
    pub first_name: Option<String>,
    /// Email from the host profile, if set
    pub email: Option<String>,
}

impl Viewer {
    /// Name shown on the viewer's own leaderboard row.
    ///
    /// First name, falling back to the local part of the email, falling
    /// back to `"You"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.first_name
            .clone()
            .filter(|name| !name.is_empty())
            .or_else(|| {
                self.email
                    .as_deref()
                    .and_then(|email| email.split('@').next())
                    .filter(|local| !local.is_empty())
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| "You".to_owned())
    }

    /// First character of the display name, uppercased
    #[must_use]
    pub fn avatar_initial(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "Y".to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_zeroed() {
        let record = StreakRecord::new(Uuid::new_v4());
        assert_eq!(record.current_streak, 0);
        assert_eq!(record.longest_streak, 0);
        assert_eq!(record.total_workouts, 0);
        assert!(record.last_workout_date.is_none());
    }

    #[test]
    fn viewer_display_name_prefers_first_name() {
        let viewer = Viewer {
            user_id: Uuid::new_v4(),
            first_name: Some("Alex".to_owned()),
            email: Some("alex@example.com".to_owned()),
        };
        assert_eq!(viewer.display_name(), "Alex");
        assert_eq!(viewer.avatar_initial(), "A");
    }

    #[test]
    fn viewer_display_name_falls_back_to_email_local_part() {
        let viewer = Viewer {
            user_id: Uuid::new_v4(),
            first_name: None,
            email: Some("jordan@example.com".to_owned()),
        };
        assert_eq!(viewer.display_name(), "jordan");
        assert_eq!(viewer.avatar_initial(), "J");
    }

    #[test]
    fn viewer_display_name_defaults_to_you() {
        let viewer = Viewer {
            user_id: Uuid::new_v4(),
            first_name: Some(String::new()),
            email: None,
        };
        assert_eq!(viewer.display_name(), "You");
        assert_eq!(viewer.avatar_initial(), "Y");
    }
}

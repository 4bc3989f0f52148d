// ABOUTME: Domain services orchestrating streak evaluation and leaderboard assembly
// ABOUTME: Free-function services over the StreakStore and ClockSource boundaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Fitness

//! # Domain Services
//!
//! Multi-step business operations extracted from the host application:
//! streak state and completion recording in [`streaks`], leaderboard
//! assembly and rank lookup in [`leaderboard`].

/// Leaderboard assembly and rank lookup
pub mod leaderboard;

/// Streak evaluation and completion recording
pub mod streaks;

// ABOUTME: Streak demo data seeder for the Stride streak engine
// ABOUTME: Generates users with varied streak shapes and prints the resulting leaderboard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Fitness

//! Streak demo data seeder.
//!
//! Populates the database with demo streak records covering the shapes the
//! engine distinguishes: fresh users, streaks logged today, streaks alive
//! from yesterday, and lapsed streaks awaiting expiry.
//!
//! Usage:
//! ```bash
//! # Seed with default settings
//! cargo run --bin seed-streaks
//!
//! # Reset streak data before seeding
//! cargo run --bin seed-streaks -- --reset
//!
//! # Reproducible data with a custom shape
//! cargo run --bin seed-streaks -- --users 25 --seed 7
//! ```

use anyhow::{Context, Result};
use chrono::Days;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use uuid::Uuid;

use stride_streaks::clock::{ClockSource, SystemClock};
use stride_streaks::constants::env_config;
use stride_streaks::database::{Database, StreakCompletion, StreakStore};
use stride_streaks::logging::{self, LogFormat, LoggingConfig};
use stride_streaks::models::Viewer;
use stride_streaks::services::leaderboard;

#[derive(Parser)]
#[command(
    name = "seed-streaks",
    about = "Stride streak demo data seeder",
    long_about = "Populate the database with demo streak records and print the leaderboard"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Number of demo users to seed
    #[arg(long, default_value_t = 12)]
    users: u32,

    /// RNG seed for reproducible demo data
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Delete existing streak rows before seeding
    #[arg(long)]
    reset: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let level = if args.verbose { "debug" } else { "info" };
    logging::init(&LoggingConfig {
        level: level.to_owned(),
        format: LogFormat::Compact,
    })?;

    let database_url = args
        .database_url
        .as_ref()
        .map_or_else(env_config::database_url, String::clone);
    let db = Database::new(&database_url)
        .await
        .context("failed to open database")?;

    if args.reset {
        sqlx::query("DELETE FROM user_streaks")
            .execute(db.pool())
            .await
            .context("failed to reset streak data")?;
        info!("cleared existing streak rows");
    }

    let store = db.streaks();
    let today = SystemClock::default().today();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut viewer_id = None;

    for _ in 0..args.users {
        let user_id = Uuid::new_v4();
        viewer_id.get_or_insert(user_id);
        store.create_streak(user_id).await?;

        let streak: u32 = rng.gen_range(0..30);
        if streak == 0 {
            // Fresh user: record exists, nothing logged yet
            continue;
        }

        // 0 = logged today, 1 = alive from yesterday, 2+ = lapsed
        let gap: u64 = rng.gen_range(0..4);
        let last_workout = today
            .checked_sub_days(Days::new(gap))
            .context("demo date out of range")?;

        let completion = StreakCompletion {
            current_streak: streak,
            longest_streak: streak + rng.gen_range(0..10),
            total_workouts: streak + rng.gen_range(0..50),
            workout_date: last_workout,
        };
        store.apply_completion(user_id, &completion).await?;
    }

    info!(users = args.users, "seeded demo streak records");

    let viewer = Viewer {
        user_id: viewer_id.unwrap_or_else(Uuid::new_v4),
        first_name: Some("Demo".to_owned()),
        email: Some("demo@stride.fit".to_owned()),
    };

    let entries = leaderboard::build_leaderboard(&store, &viewer).await?;
    println!("\n  Leaderboard ({} users)", entries.len());
    for entry in &entries {
        println!(
            "  {:>3}. [{:<2}] {:<16} streak {:>3}  longest {:>3}  workouts {:>4}{}",
            entry.rank,
            entry.avatar_initial,
            entry.display_name,
            entry.streak,
            entry.longest_streak,
            entry.total_workouts,
            if entry.is_current_user { "  (you)" } else { "" },
        );
    }

    let summary = leaderboard::user_rank(&store, viewer.user_id).await?;
    match summary.rank {
        Some(rank) => println!("\n  Demo viewer is ranked {rank} of {}\n", summary.total),
        None => println!("\n  Demo viewer is unranked ({} total)\n", summary.total),
    }

    Ok(())
}

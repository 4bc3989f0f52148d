// ABOUTME: Calendar-day clock abstraction for deterministic streak evaluation
// ABOUTME: SystemClock reads the wall clock under a timezone policy; FixedClock pins a date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Fitness

//! # Clock Source
//!
//! All streak comparisons happen at day granularity, so the only thing the
//! engine ever asks a clock for is "today" as a [`NaiveDate`]. Making the
//! clock an injected dependency keeps evaluation deterministic and testable
//! without wall-clock mocking.

use chrono::{Local, NaiveDate, Utc};

use crate::config::environment::ClockPolicy;

/// Supplies the current date at calendar-day granularity
pub trait ClockSource: Send + Sync {
    /// Current calendar date under this clock's timezone policy
    fn today(&self) -> NaiveDate;
}

/// Wall-clock source honoring the configured timezone policy.
///
/// `ClockPolicy::Local` reproduces the original deployment behavior (the
/// invoking device's local calendar day, a known source of cross-timezone
/// skew); `ClockPolicy::Utc` gives every deployment the same day boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    policy: ClockPolicy,
}

impl SystemClock {
    /// Create a system clock with the given timezone policy
    #[must_use]
    pub const fn new(policy: ClockPolicy) -> Self {
        Self { policy }
    }
}

impl ClockSource for SystemClock {
    fn today(&self) -> NaiveDate {
        match self.policy {
            ClockPolicy::Local => Local::now().date_naive(),
            ClockPolicy::Utc => Utc::now().date_naive(),
        }
    }
}

/// Fixed-date clock for deterministic tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    /// Pin the clock to the given date
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl ClockSource for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }
}

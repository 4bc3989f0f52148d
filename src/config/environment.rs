// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Typed log level, clock timezone policy, and database URL parsed from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Fitness

//! Environment-based configuration for deployment

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::env_config;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Standard operational logging
    #[default]
    Info,
    /// Verbose diagnostics
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback to `Info`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Timezone policy for the engine's day boundary.
///
/// `Local` matches the original deployment behavior (day boundaries follow
/// the host's local clock); `Utc` pins every deployment to the same
/// boundary at the cost of surprising users far from Greenwich.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClockPolicy {
    /// Host-local calendar days
    #[default]
    Local,
    /// UTC calendar days
    Utc,
}

impl ClockPolicy {
    /// Parse from string, warning and defaulting to `Local` on unknown values
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "utc" => Self::Utc,
            "local" => Self::Local,
            other => {
                warn!(value = other, "unknown STREAKS_CLOCK value, using local");
                Self::Local
            }
        }
    }
}

impl std::fmt::Display for ClockPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Utc => write!(f, "utc"),
        }
    }
}

/// Runtime configuration for the streak engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Database connection string
    pub database_url: String,
    /// Log level
    pub log_level: LogLevel,
    /// Day-boundary timezone policy
    pub clock: ClockPolicy,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Every setting has a default, so loading never fails; unknown values
    /// fall back with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        let clock = env_config::clock_policy()
            .map(|s| ClockPolicy::from_str_or_default(&s))
            .unwrap_or_default();

        Self {
            database_url: env_config::database_url(),
            log_level: LogLevel::from_str_or_default(&env_config::log_level()),
            clock,
        }
    }
}

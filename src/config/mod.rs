// ABOUTME: Configuration module root for the streak engine
// ABOUTME: Environment-based runtime configuration lives in the environment submodule
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Fitness

//! Configuration management

/// Environment-based runtime configuration
pub mod environment;

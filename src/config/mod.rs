// ABOUTME: Configuration module for the dreamband engine
// ABOUTME: Environment-driven engine settings plus data-driven phase baseline tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

//! Engine configuration.
//!
//! Configuration is environment-only: no config files are read. Tunable
//! tables such as [`PhaseBaselineTable`] are plain serde structures with
//! `Default` impls so embedders can also build them in code.

/// Environment-based engine configuration
pub mod environment;
/// Per-phase sensor baselines
pub mod phase_baselines;

pub use environment::{EngineConfig, SessionTimings};
pub use phase_baselines::{PhaseBaseline, PhaseBaselineTable};

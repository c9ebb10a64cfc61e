// ABOUTME: Main library entry point for the dreamband sleep session engine
// ABOUTME: Live biometric simulation, inertial wheel picker, alarms, settings, and sleep history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

#![deny(unsafe_code)]

//! # Dreamband
//!
//! Engine behind a smart-alarm bracelet companion app. Everything is
//! simulated: there is no real sensor or radio behind it.
//!
//! ## Architecture
//!
//! - **Simulation**: phase sequencer, sensor synthesizer, and the timer-driven
//!   live session (plus a virtual-time driver for stepping it by hand)
//! - **Picker**: drag-to-select wheel with velocity projection and spring settling
//! - **Alarm**: setup flow and smart wake windows
//! - **Settings**: typed preferences persisted as one JSON blob
//! - **History**: synthetic past nights, calendar, and statistics
//! - **Audio**: ambient noise player over a pluggable output
//! - **Device** / **App**: bracelet link and app shell state
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use dreamband::config::EngineConfig;
//! use dreamband::simulation::LiveSession;
//! use dreamband_core::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = EngineConfig::from_env()?;
//!     let mut session = LiveSession::from_config(&config)?;
//!     session.start().await;
//!     tokio::time::sleep(std::time::Duration::from_secs(10)).await;
//!     println!("{:?}", session.snapshot().await);
//!     session.stop().await;
//!     Ok(())
//! }
//! ```

/// Alarm setup flow
pub mod alarm;

/// App shell state
pub mod app;

/// Ambient sound playback
pub mod audio;

/// Environment configuration and phase baselines
pub mod config;

/// Simulated bracelet link
pub mod device;

/// Sleep history and statistics
pub mod history;

/// Logging setup
pub mod logging;

/// Wheel picker
pub mod picker;

/// Persisted settings
pub mod settings;

/// Live session simulation
pub mod simulation;

pub use dreamband_core::errors::{AppError, AppResult, ErrorCode};

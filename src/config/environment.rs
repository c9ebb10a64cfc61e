// ABOUTME: Environment-based configuration for the dreamband engine
// ABOUTME: Reads settings path, RNG seed, history window, timer cadence, and audio rate from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

//! Environment-only configuration. Invalid values never abort start-up: they
//! are logged and replaced by the documented default.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use dreamband_core::constants::{audio, history, session};
use dreamband_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Env var naming the settings store file
pub const SETTINGS_PATH_VAR: &str = "DREAMBAND_SETTINGS_PATH";
/// Env var holding an optional RNG seed
pub const SEED_VAR: &str = "DREAMBAND_SEED";
/// Env var holding the history lookback in days
pub const HISTORY_DAYS_VAR: &str = "DREAMBAND_HISTORY_DAYS";
/// Env var overriding the sample tick (ms)
pub const SAMPLE_INTERVAL_VAR: &str = "DREAMBAND_SAMPLE_INTERVAL_MS";
/// Env var overriding the clock tick (ms)
pub const CLOCK_INTERVAL_VAR: &str = "DREAMBAND_CLOCK_INTERVAL_MS";
/// Env var overriding the transmit toggle (ms)
pub const TRANSMIT_INTERVAL_VAR: &str = "DREAMBAND_TRANSMIT_INTERVAL_MS";
/// Env var overriding the audio sample rate (Hz)
pub const AUDIO_SAMPLE_RATE_VAR: &str = "DREAMBAND_AUDIO_SAMPLE_RATE";

/// Fixed periods of the three interval timers of a live session
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTimings {
    /// Sensor sample tick (ms)
    pub sample_interval_ms: u64,
    /// Elapsed-time clock tick (ms)
    pub clock_interval_ms: u64,
    /// Transmission indicator toggle (ms)
    pub transmit_interval_ms: u64,
}

impl Default for SessionTimings {
    fn default() -> Self {
        Self {
            sample_interval_ms: session::SAMPLE_INTERVAL_MS,
            clock_interval_ms: session::CLOCK_INTERVAL_MS,
            transmit_interval_ms: session::TRANSMIT_INTERVAL_MS,
        }
    }
}

impl SessionTimings {
    /// Sample tick as a `Duration`
    #[must_use]
    pub const fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    /// Clock tick as a `Duration`
    #[must_use]
    pub const fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms)
    }

    /// Transmit toggle as a `Duration`
    #[must_use]
    pub const fn transmit_interval(&self) -> Duration {
        Duration::from_millis(self.transmit_interval_ms)
    }

    /// Check that every period is non-zero
    ///
    /// # Errors
    ///
    /// Returns a config error naming the first zero period
    pub fn validate(&self) -> AppResult<()> {
        let periods = [
            ("sample_interval_ms", self.sample_interval_ms),
            ("clock_interval_ms", self.clock_interval_ms),
            ("transmit_interval_ms", self.transmit_interval_ms),
        ];
        for (name, value) in periods {
            if value == 0 {
                return Err(AppError::config(format!("{name} must be greater than zero")));
            }
        }
        Ok(())
    }
}

/// Engine configuration assembled from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// File backing the persisted settings store
    pub settings_path: PathBuf,
    /// Seed for every random source; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Number of past nights in the synthetic history
    pub history_days: u32,
    /// Live session timer periods
    pub timings: SessionTimings,
    /// Output sample rate used for ambient noise buffers
    pub audio_sample_rate: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settings_path: default_settings_path(),
            seed: None,
            history_days: history::LOOKBACK_DAYS,
            timings: SessionTimings::default(),
            audio_sample_rate: audio::DEFAULT_SAMPLE_RATE,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting timer configuration is unusable
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();
        let timings = SessionTimings {
            sample_interval_ms: parse_env_or(
                SAMPLE_INTERVAL_VAR,
                defaults.timings.sample_interval_ms,
            ),
            clock_interval_ms: parse_env_or(CLOCK_INTERVAL_VAR, defaults.timings.clock_interval_ms),
            transmit_interval_ms: parse_env_or(
                TRANSMIT_INTERVAL_VAR,
                defaults.timings.transmit_interval_ms,
            ),
        };
        timings.validate()?;

        Ok(Self {
            settings_path: env::var(SETTINGS_PATH_VAR)
                .map_or(defaults.settings_path, PathBuf::from),
            seed: parse_optional_env(SEED_VAR),
            history_days: parse_env_or(HISTORY_DAYS_VAR, defaults.history_days),
            timings,
            audio_sample_rate: parse_env_or(AUDIO_SAMPLE_RATE_VAR, defaults.audio_sample_rate),
        })
    }
}

/// Platform data directory location for the settings file
#[must_use]
pub fn default_settings_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dreamband")
        .join("settings.json")
}

fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, fallback = %default, "Invalid numeric env var, using default");
            default
        }),
        Err(_) => default,
    }
}

fn parse_optional_env<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        warn!(key, value = %raw, "Invalid numeric env var, ignoring");
    }
    parsed
}

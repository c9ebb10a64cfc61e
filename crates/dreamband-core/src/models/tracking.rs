// ABOUTME: Live tracking models: sleep phases, phase descriptors, and sensor samples
// ABOUTME: Phase descriptors are validated at construction so timelines never hold a zero dwell
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::session;
use crate::errors::{AppError, AppResult};

/// Phases cycled through by a live tracking session
#[non_exhaustive]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackingPhase {
    /// Wearer is drifting off
    FallingAsleep,
    /// Light sleep
    Light,
    /// Deep sleep
    Deep,
    /// REM sleep
    Rem,
}

impl TrackingPhase {
    /// Display label shown on the tracking screen
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FallingAsleep => "Засыпание",
            Self::Light => "Лёгкий сон",
            Self::Deep => "Глубокий сон",
            Self::Rem => "REM",
        }
    }

    /// Accent color used for the phase indicator
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::FallingAsleep => "#a78bfa",
            Self::Light => "#60a5fa",
            Self::Deep => "#3b82f6",
            Self::Rem => "#8b5cf6",
        }
    }
}

impl fmt::Display for TrackingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FallingAsleep => "FALLING_ASLEEP",
            Self::Light => "LIGHT",
            Self::Deep => "DEEP",
            Self::Rem => "REM",
        };
        f.write_str(name)
    }
}

/// One entry of a phase timeline
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPhaseDescriptor")]
pub struct PhaseDescriptor {
    /// Phase that is active while this entry dwells
    pub phase: TrackingPhase,
    /// How long the phase stays active (milliseconds, always > 0)
    dwell_ms: u64,
}

impl PhaseDescriptor {
    /// Create a descriptor
    ///
    /// # Errors
    ///
    /// Returns an error if `dwell_ms` is zero
    pub fn new(phase: TrackingPhase, dwell_ms: u64) -> AppResult<Self> {
        if dwell_ms == 0 {
            return Err(AppError::invalid_input(format!(
                "dwell duration for {phase} must be positive"
            )));
        }
        Ok(Self { phase, dwell_ms })
    }

    /// Dwell in milliseconds
    #[must_use]
    pub const fn dwell_ms(&self) -> u64 {
        self.dwell_ms
    }

    /// Dwell as a `Duration`
    #[must_use]
    pub const fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }
}

#[derive(Deserialize)]
struct RawPhaseDescriptor {
    phase: TrackingPhase,
    dwell_ms: u64,
}

impl TryFrom<RawPhaseDescriptor> for PhaseDescriptor {
    type Error = AppError;

    fn try_from(raw: RawPhaseDescriptor) -> AppResult<Self> {
        Self::new(raw.phase, raw.dwell_ms)
    }
}

/// One synthetic reading from the bracelet
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Heart rate (beats per minute)
    pub heart_rate_bpm: u32,
    /// Heart rate variability (ms)
    pub hrv: u32,
    /// Blood oxygen saturation (%)
    pub spo2: u32,
    /// Skin temperature (°C, one decimal)
    pub temperature_c: f64,
    /// Movement level (0-100ish)
    pub movement_level: u32,
}

impl SensorSample {
    /// Reading displayed before the first sample tick
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            heart_rate_bpm: session::INITIAL_HEART_RATE,
            hrv: session::INITIAL_HRV,
            spo2: session::INITIAL_SPO2,
            temperature_c: session::INITIAL_TEMPERATURE_C,
            movement_level: session::INITIAL_MOVEMENT,
        }
    }
}

impl Default for SensorSample {
    fn default() -> Self {
        Self::initial()
    }
}

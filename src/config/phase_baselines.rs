// ABOUTME: Phase baseline table driving synthetic heart-rate and movement sampling
// ABOUTME: Maps each tracking phase to its baseline, jitter amplitude, and movement floor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use std::collections::HashMap;

use dreamband_core::models::TrackingPhase;
use serde::{Deserialize, Serialize};

/// Reference values used while one phase is active
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseBaseline {
    /// Centre of the heart-rate draw (bpm)
    pub baseline_bpm: f64,
    /// Half-width of the uniform heart-rate jitter (bpm)
    pub amplitude_bpm: f64,
    /// Floor of the movement draw
    pub movement_baseline: f64,
}

impl PhaseBaseline {
    /// Create a baseline row
    #[must_use]
    pub const fn new(baseline_bpm: f64, amplitude_bpm: f64, movement_baseline: f64) -> Self {
        Self {
            baseline_bpm,
            amplitude_bpm,
            movement_baseline,
        }
    }
}

/// Phase → baseline lookup with a fallback row for phases without an entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseBaselineTable {
    entries: HashMap<TrackingPhase, PhaseBaseline>,
    fallback: PhaseBaseline,
}

impl Default for PhaseBaselineTable {
    fn default() -> Self {
        let entries = HashMap::from([
            (TrackingPhase::FallingAsleep, PhaseBaseline::new(70.0, 8.0, 25.0)),
            (TrackingPhase::Light, PhaseBaseline::new(62.0, 5.0, 15.0)),
            (TrackingPhase::Deep, PhaseBaseline::new(55.0, 3.0, 5.0)),
            (TrackingPhase::Rem, PhaseBaseline::new(68.0, 10.0, 8.0)),
        ]);
        Self {
            entries,
            fallback: PhaseBaseline::new(65.0, 5.0, 10.0),
        }
    }
}

impl PhaseBaselineTable {
    /// Table with no phase rows; every lookup returns `fallback`
    #[must_use]
    pub fn with_fallback(fallback: PhaseBaseline) -> Self {
        Self {
            entries: HashMap::new(),
            fallback,
        }
    }

    /// Replace (or add) the row for `phase`
    #[must_use]
    pub fn with_entry(mut self, phase: TrackingPhase, baseline: PhaseBaseline) -> Self {
        self.entries.insert(phase, baseline);
        self
    }

    /// Baseline for `phase`, or the fallback row
    #[must_use]
    pub fn get(&self, phase: TrackingPhase) -> &PhaseBaseline {
        self.entries.get(&phase).unwrap_or(&self.fallback)
    }

    /// Row used for phases without an explicit entry
    #[must_use]
    pub const fn fallback(&self) -> &PhaseBaseline {
        &self.fallback
    }
}

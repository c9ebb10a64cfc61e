// ABOUTME: Cyclic sleep phase sequencer driven by per-phase dwell timeouts
// ABOUTME: Owns a validated phase timeline and advances (index + 1) mod len with no terminal state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use std::time::Duration;

use dreamband_core::constants::timeline;
use dreamband_core::errors::{AppError, AppResult};
use dreamband_core::models::{PhaseDescriptor, TrackingPhase};
use tracing::debug;

/// Non-empty, cyclic list of phases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTimeline {
    entries: Vec<PhaseDescriptor>,
}

impl PhaseTimeline {
    /// Build a timeline from descriptors
    ///
    /// # Errors
    ///
    /// Returns an error if `entries` is empty
    pub fn new(entries: Vec<PhaseDescriptor>) -> AppResult<Self> {
        if entries.is_empty() {
            return Err(AppError::invalid_input(
                "phase timeline must contain at least one phase",
            ));
        }
        Ok(Self { entries })
    }

    /// Build a timeline from `(phase, dwell_ms)` pairs
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or any dwell is zero
    pub fn from_pairs(pairs: &[(TrackingPhase, u64)]) -> AppResult<Self> {
        let entries = pairs
            .iter()
            .map(|&(phase, dwell_ms)| PhaseDescriptor::new(phase, dwell_ms))
            .collect::<AppResult<Vec<_>>>()?;
        Self::new(entries)
    }

    /// The standard five-phase night: falling asleep, light, deep, REM, light
    #[must_use]
    pub fn standard() -> Self {
        let entries = [
            (TrackingPhase::FallingAsleep, timeline::FALLING_ASLEEP_DWELL_MS),
            (TrackingPhase::Light, timeline::LIGHT_DWELL_MS),
            (TrackingPhase::Deep, timeline::DEEP_DWELL_MS),
            (TrackingPhase::Rem, timeline::REM_DWELL_MS),
            (TrackingPhase::Light, timeline::LIGHT_RETURN_DWELL_MS),
        ]
        .into_iter()
        .filter_map(|(phase, dwell_ms)| PhaseDescriptor::new(phase, dwell_ms).ok())
        .collect();
        Self { entries }
    }

    /// Number of entries (always >= 1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with collections
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, wrapping cyclically
    #[must_use]
    pub fn get(&self, index: usize) -> &PhaseDescriptor {
        &self.entries[index % self.entries.len()]
    }

    /// Iterate entries in order
    pub fn iter(&self) -> impl Iterator<Item = &PhaseDescriptor> {
        self.entries.iter()
    }

    /// Sum of all dwell durations
    #[must_use]
    pub fn cycle_duration(&self) -> Duration {
        self.entries.iter().map(PhaseDescriptor::dwell).sum()
    }
}

impl Default for PhaseTimeline {
    fn default() -> Self {
        Self::standard()
    }
}

/// Timer-driven cyclic automaton over a [`PhaseTimeline`]
///
/// The sequencer has one state per timeline entry and starts at index 0. The
/// owner calls [`PhaseSequencer::advance`] when the current dwell elapses, or
/// feeds virtual time through [`PhaseSequencer::elapse`].
#[derive(Debug, Clone)]
pub struct PhaseSequencer {
    timeline: PhaseTimeline,
    index: usize,
    /// Time already spent in the current phase (virtual time only)
    in_phase: Duration,
}

impl PhaseSequencer {
    /// Create a sequencer positioned at the first phase
    #[must_use]
    pub const fn new(timeline: PhaseTimeline) -> Self {
        Self {
            timeline,
            index: 0,
            in_phase: Duration::ZERO,
        }
    }

    /// Move to `(index + 1) mod len` and return the new current phase
    pub fn advance(&mut self) -> &PhaseDescriptor {
        let from = self.timeline.get(self.index).phase;
        self.index = (self.index + 1) % self.timeline.len();
        self.in_phase = Duration::ZERO;
        let current = self.timeline.get(self.index);
        debug!(from = %from, to = %current.phase, index = self.index, "Sleep phase advanced");
        current
    }

    /// Active phase descriptor
    #[must_use]
    pub fn current_phase(&self) -> &PhaseDescriptor {
        self.timeline.get(self.index)
    }

    /// Index of the active phase in the timeline
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.index
    }

    /// The timeline being cycled
    #[must_use]
    pub const fn timeline(&self) -> &PhaseTimeline {
        &self.timeline
    }

    /// Virtual time left before the next transition
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.current_phase().dwell().saturating_sub(self.in_phase)
    }

    /// Consume `dt` of virtual time, returning every phase entered on the way
    ///
    /// A transition happens only once the full dwell has elapsed; any
    /// leftover time carries into the next phase.
    pub fn elapse(&mut self, mut dt: Duration) -> Vec<PhaseDescriptor> {
        let mut entered = Vec::new();
        loop {
            let left = self.remaining();
            if dt < left {
                self.in_phase += dt;
                return entered;
            }
            dt -= left;
            entered.push(*self.advance());
        }
    }

    /// Return to the first phase
    pub fn reset(&mut self) {
        self.index = 0;
        self.in_phase = Duration::ZERO;
    }
}

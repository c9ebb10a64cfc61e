// ABOUTME: Live sleep-tracking simulation: phases, sensor synthesis, session timers, ambient noise
// ABOUTME: Re-exports the sequencer, synthesizer, heart-rate history, clock, and session drivers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

/// Session clock, elapsed-time formatting, and transmission indicator
pub mod clock;
/// Bounded heart-rate history and graph geometry
pub mod heart_rate;
/// Procedural ambient noise synthesis
pub mod noise;
/// Cyclic phase timeline and sequencer
pub mod sequencer;
/// Live and virtual-time tracking sessions
pub mod session;
/// Per-phase sensor reading synthesis
pub mod synthesizer;

pub use clock::{format_elapsed, SessionClock, TransmissionIndicator};
pub use heart_rate::HeartRateHistory;
pub use noise::{NoiseGenerator, NoiseKind};
pub use sequencer::{PhaseSequencer, PhaseTimeline};
pub use session::{LiveSession, SessionDriver, SessionEvent, SessionSnapshot, SessionState};
pub use synthesizer::{movement_bars, SensorSynthesizer};

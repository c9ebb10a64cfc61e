// ABOUTME: Domain models shared by the dreamband engine and its CLI
// ABOUTME: Re-exports tracking, sleep history, and alarm types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

/// Alarm and smart wake window
pub mod alarm;
/// Historical sleep sessions and stages
pub mod sleep;
/// Live tracking phases and sensor samples
pub mod tracking;

pub use alarm::{Alarm, WakeWindow};
pub use sleep::{HeartRatePoint, SleepSession, SleepStage, SleepStageType};
pub use tracking::{PhaseDescriptor, SensorSample, TrackingPhase};

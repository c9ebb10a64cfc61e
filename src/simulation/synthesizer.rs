// ABOUTME: Synthetic biometric sampler parameterised by the active sleep phase
// ABOUTME: Draws heart rate, HRV, SpO2, temperature, and movement from an injected random source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use dreamband_core::constants::sensor;
use dreamband_core::models::{SensorSample, TrackingPhase};
use rand::Rng;

use crate::config::PhaseBaselineTable;

/// Pure sampler: given a phase and a random source, produce one [`SensorSample`]
///
/// The synthesizer holds no random state of its own. Callers pass the
/// generator so tests can inject a seeded `ChaCha8Rng`.
#[derive(Debug, Clone, Default)]
pub struct SensorSynthesizer {
    baselines: PhaseBaselineTable,
}

impl SensorSynthesizer {
    /// Create a synthesizer over a baseline table
    #[must_use]
    pub const fn new(baselines: PhaseBaselineTable) -> Self {
        Self { baselines }
    }

    /// Baseline table in use
    #[must_use]
    pub const fn baselines(&self) -> &PhaseBaselineTable {
        &self.baselines
    }

    /// Draw one sample for `phase`
    pub fn sample<R: Rng + ?Sized>(&self, phase: TrackingPhase, rng: &mut R) -> SensorSample {
        let baseline = self.baselines.get(phase);

        let heart_rate = baseline.baseline_bpm + symmetric(rng, baseline.amplitude_bpm);
        let hrv = rng.gen_range(sensor::HRV_MIN..sensor::HRV_MAX);
        let spo2 = rng.gen_range(sensor::SPO2_MIN..sensor::SPO2_MAX);
        let temperature =
            rng.gen_range(sensor::TEMPERATURE_MIN_C..sensor::TEMPERATURE_MAX_C);
        let movement = baseline.movement_baseline + rng.gen_range(0.0..sensor::MOVEMENT_JITTER);

        SensorSample {
            heart_rate_bpm: round_non_negative(heart_rate),
            hrv: round_non_negative(hrv),
            spo2: round_non_negative(spo2),
            temperature_c: (temperature * 10.0).round() / 10.0,
            movement_level: round_non_negative(movement),
        }
    }
}

/// Uniform draw in `[-amplitude, amplitude)`; zero when the amplitude is not positive
fn symmetric<R: Rng + ?Sized>(rng: &mut R, amplitude: f64) -> f64 {
    if amplitude > 0.0 {
        rng.gen_range(-amplitude..amplitude)
    } else {
        0.0
    }
}

fn round_non_negative(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

/// Number of lit bars in the movement meter for `level`
#[must_use]
pub fn movement_bars(level: u32) -> u32 {
    let lit = (f64::from(level) / 100.0 * f64::from(sensor::MOVEMENT_BARS)).ceil() as u32;
    lit.min(sensor::MOVEMENT_BARS)
}

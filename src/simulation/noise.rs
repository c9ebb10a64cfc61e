// ABOUTME: Ambient noise synthesis for looping sleep sounds (white, rain, ocean)
// ABOUTME: Rain is a three-pole leaky blend over white noise, ocean a single-pole lowpass
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use std::fmt;
use std::str::FromStr;

use dreamband_core::constants::audio;
use dreamband_core::errors::AppError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Rain pole coefficients (feedback, white gain)
const RAIN_POLES: [(f32, f32); 3] = [
    (0.998_86, 0.055_517_9),
    (0.993_32, 0.075_075_9),
    (0.969, 0.153_852),
];
/// Direct white-noise term added to the rain blend
const RAIN_DIRECT_GAIN: f32 = 0.1848;
/// Output scale applied to the rain blend
const RAIN_OUTPUT_GAIN: f32 = 0.05;
/// Ocean white-noise gain
const OCEAN_WHITE_GAIN: f32 = 0.02;
/// Ocean normalisation divisor
const OCEAN_DIVISOR: f32 = 1.02;
/// Output scale applied to the ocean lowpass
const OCEAN_OUTPUT_GAIN: f32 = 3.5;

/// Kinds of synthesized ambient noise
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoiseKind {
    /// Flat spectrum
    #[serde(rename = "white-noise")]
    White,
    /// Brown-ish multi-pole blend
    #[serde(rename = "rain")]
    Rain,
    /// Heavily lowpassed rumble
    #[serde(rename = "ocean")]
    Ocean,
}

impl NoiseKind {
    /// Identifier used by the settings blob
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::White => "white-noise",
            Self::Rain => "rain",
            Self::Ocean => "ocean",
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for NoiseKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white-noise" | "white" => Ok(Self::White),
            "rain" => Ok(Self::Rain),
            "ocean" => Ok(Self::Ocean),
            other => Err(AppError::invalid_input(format!("unknown noise kind '{other}'"))),
        }
    }
}

/// Stateful per-sample noise generator
///
/// Rain keeps one leaky integrator per pole; ocean is a one-pole lowpass
/// over its own previous output.
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    kind: NoiseKind,
    poles: [f32; 3],
    last_out: f32,
}

impl NoiseGenerator {
    /// Start a generator with a silent history
    #[must_use]
    pub const fn new(kind: NoiseKind) -> Self {
        Self {
            kind,
            poles: [0.0; 3],
            last_out: 0.0,
        }
    }

    /// Kind being generated
    #[must_use]
    pub const fn kind(&self) -> NoiseKind {
        self.kind
    }

    /// Produce the next output sample
    pub fn next_sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f32 {
        match self.kind {
            NoiseKind::White => white(rng),
            NoiseKind::Rain => {
                let mut blend = 0.0;
                for (state, (feedback, gain)) in self.poles.iter_mut().zip(RAIN_POLES) {
                    *state = feedback.mul_add(*state, white(rng) * gain);
                    blend += *state;
                }
                blend += white(rng) * RAIN_DIRECT_GAIN;
                blend * RAIN_OUTPUT_GAIN
            }
            NoiseKind::Ocean => {
                let out = OCEAN_WHITE_GAIN.mul_add(white(rng), self.last_out) / OCEAN_DIVISOR;
                self.last_out = out;
                out * OCEAN_OUTPUT_GAIN
            }
        }
    }
}

fn white<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(-1.0..1.0)
}

/// Number of samples in one looping buffer at `sample_rate`
#[must_use]
pub const fn loop_length(sample_rate: u32) -> usize {
    (audio::LOOP_SECONDS * sample_rate) as usize
}

/// Synthesize a mono looping buffer of `LOOP_SECONDS` at `sample_rate`
pub fn synthesize<R: Rng + ?Sized>(kind: NoiseKind, sample_rate: u32, rng: &mut R) -> Vec<f32> {
    let mut generator = NoiseGenerator::new(kind);
    (0..loop_length(sample_rate))
        .map(|_| generator.next_sample(rng))
        .collect()
}

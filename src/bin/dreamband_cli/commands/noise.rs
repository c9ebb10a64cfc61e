// ABOUTME: Noise command - synthesizes one ambient loop buffer and reports its statistics
// ABOUTME: Useful for checking generator levels without an audio device
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use dreamband::config::EngineConfig;
use dreamband::simulation::{noise, NoiseKind};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::helpers::display::print_json;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BufferStats {
    kind: NoiseKind,
    sample_rate: u32,
    samples: usize,
    seconds: f64,
    peak: f32,
    rms: f64,
    clipped: usize,
}

impl BufferStats {
    fn of(kind: NoiseKind, sample_rate: u32, buffer: &[f32]) -> Self {
        let sum_squares: f64 = buffer.iter().map(|s| f64::from(*s).powi(2)).sum();
        Self {
            kind,
            sample_rate,
            samples: buffer.len(),
            seconds: buffer.len() as f64 / f64::from(sample_rate),
            peak: buffer.iter().fold(0.0_f32, |peak, s| peak.max(s.abs())),
            rms: (sum_squares / buffer.len().max(1) as f64).sqrt(),
            clipped: buffer.iter().filter(|s| s.abs() > 1.0).count(),
        }
    }
}

/// Synthesize a `kind` loop and print its statistics
pub fn run(
    config: &EngineConfig,
    kind: &str,
    sample_rate: Option<u32>,
    json: bool,
) -> anyhow::Result<()> {
    let kind: NoiseKind = kind.parse()?;
    let sample_rate = sample_rate.unwrap_or(config.audio_sample_rate);
    let mut rng = config
        .seed
        .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
    let buffer = noise::synthesize(kind, sample_rate, &mut rng);
    let stats = BufferStats::of(kind, sample_rate, &buffer);

    if json {
        return print_json(&stats);
    }
    println!("\nNoise buffer: {}", stats.kind);
    println!("{}", "=".repeat(40));
    println!("   Sample rate: {} Hz", stats.sample_rate);
    println!("   Samples: {} ({:.1} s)", stats.samples, stats.seconds);
    println!("   Peak: {:.3}", stats.peak);
    println!("   RMS: {:.3}", stats.rms);
    println!("   Clipped: {}", stats.clipped);
    Ok(())
}

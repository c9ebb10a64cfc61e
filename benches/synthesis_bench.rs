// ABOUTME: Criterion benchmarks for the synthetic data generators
// ABOUTME: Measures ambient noise loop synthesis, sensor sampling, and history generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

//! Criterion benchmarks for synthesis.
//!
//! Covers one ambient loop per noise kind, a virtual hour of session driving,
//! and a month of synthetic sleep history.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use std::time::Duration;

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dreamband::config::SessionTimings;
use dreamband::history::SleepHistoryGenerator;
use dreamband::simulation::{noise, NoiseKind, PhaseTimeline, SensorSynthesizer, SessionDriver};
use dreamband_core::models::TrackingPhase;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SAMPLE_RATE: u32 = 44_100;

/// One two-second loop per noise kind
fn bench_noise_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("noise_synthesis");
    group.throughput(Throughput::Elements(noise::loop_length(SAMPLE_RATE) as u64));

    for kind in [NoiseKind::White, NoiseKind::Rain, NoiseKind::Ocean] {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &kind, |b, &kind| {
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            b.iter(|| black_box(noise::synthesize(kind, SAMPLE_RATE, &mut rng)));
        });
    }

    group.finish();
}

/// Single draws and an hour of virtual session time
fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");

    group.bench_function("sample_rem", |b| {
        let synthesizer = SensorSynthesizer::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        b.iter(|| black_box(synthesizer.sample(TrackingPhase::Rem, &mut rng)));
    });

    group.bench_function("drive_one_hour", |b| {
        b.iter(|| {
            let mut driver = SessionDriver::new(
                PhaseTimeline::standard(),
                SensorSynthesizer::default(),
                SessionTimings::default(),
                ChaCha8Rng::seed_from_u64(3),
            )
            .unwrap();
            black_box(driver.advance_by(Duration::from_secs(3600)))
        });
    });

    group.finish();
}

/// Synthetic history for increasing lookbacks
fn bench_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("history");
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

    for days in [1_u32, 15, 90] {
        group.throughput(Throughput::Elements(u64::from(days)));
        group.bench_with_input(BenchmarkId::new("nights", days), &days, |b, &days| {
            let mut generator = SleepHistoryGenerator::seeded(4);
            b.iter(|| black_box(generator.nights_before(today, days)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_noise_synthesis, bench_session, bench_history);
criterion_main!(benches);

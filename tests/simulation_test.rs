// ABOUTME: Tests for the phase sequencer, sensor synthesizer, and virtual-time session driver
// ABOUTME: Validates cycle order, sample bounds, history capacity, and timer ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::time::Duration;

use dreamband::config::{PhaseBaseline, PhaseBaselineTable, SessionTimings};
use dreamband::simulation::{
    HeartRateHistory, PhaseSequencer, PhaseTimeline, SensorSynthesizer, SessionDriver,
    SessionEvent,
};
use dreamband_core::models::TrackingPhase;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn driver(seed: u64) -> SessionDriver<ChaCha8Rng> {
    SessionDriver::new(
        PhaseTimeline::standard(),
        SensorSynthesizer::default(),
        SessionTimings::default(),
        ChaCha8Rng::seed_from_u64(seed),
    )
    .unwrap()
}

// ============================================================================
// Phase sequencer
// ============================================================================

#[test]
fn test_sequencer_cycles_through_standard_night() {
    let mut sequencer = PhaseSequencer::new(PhaseTimeline::standard());
    assert_eq!(sequencer.current_index(), 0);
    assert_eq!(sequencer.current_phase().phase, TrackingPhase::FallingAsleep);

    let visited: Vec<_> = (0..5).map(|_| sequencer.advance().phase).collect();
    assert_eq!(
        visited,
        vec![
            TrackingPhase::Light,
            TrackingPhase::Deep,
            TrackingPhase::Rem,
            TrackingPhase::Light,
            TrackingPhase::FallingAsleep,
        ]
    );
    assert_eq!(sequencer.current_index(), 0);
}

#[test]
fn test_sequencer_transitions_only_after_full_dwell() {
    let mut sequencer = PhaseSequencer::new(PhaseTimeline::standard());
    assert!(sequencer.elapse(Duration::from_millis(7999)).is_empty());
    assert_eq!(sequencer.current_index(), 0);

    let entered = sequencer.elapse(Duration::from_millis(1));
    assert_eq!(entered.len(), 1);
    assert_eq!(entered[0].phase, TrackingPhase::Light);
    assert_eq!(sequencer.remaining(), Duration::from_millis(12_000));
}

#[test]
fn test_sequencer_full_cycle_returns_to_start() {
    let mut sequencer = PhaseSequencer::new(PhaseTimeline::standard());
    let entered = sequencer.elapse(Duration::from_millis(55_000));
    assert_eq!(entered.len(), 5);
    assert_eq!(sequencer.current_index(), 0);
    assert_eq!(sequencer.remaining(), Duration::from_millis(8000));
}

#[test]
fn test_single_entry_timeline_loops_on_itself() {
    let timeline = PhaseTimeline::from_pairs(&[(TrackingPhase::Deep, 100)]).unwrap();
    let mut sequencer = PhaseSequencer::new(timeline);
    let entered = sequencer.elapse(Duration::from_millis(350));
    assert_eq!(entered.len(), 3);
    assert!(entered.iter().all(|p| p.phase == TrackingPhase::Deep));
    assert_eq!(sequencer.remaining(), Duration::from_millis(50));
}

#[test]
fn test_sequencer_reset() {
    let mut sequencer = PhaseSequencer::new(PhaseTimeline::standard());
    sequencer.elapse(Duration::from_millis(21_000));
    assert_eq!(sequencer.current_index(), 2);
    sequencer.reset();
    assert_eq!(sequencer.current_index(), 0);
    assert_eq!(sequencer.remaining(), Duration::from_millis(8000));
}

// ============================================================================
// Sensor synthesizer
// ============================================================================

#[test]
fn test_synthesizer_respects_phase_bounds() {
    let synthesizer = SensorSynthesizer::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..2000 {
        let deep = synthesizer.sample(TrackingPhase::Deep, &mut rng);
        assert!((52..=58).contains(&deep.heart_rate_bpm), "deep hr {}", deep.heart_rate_bpm);
        assert!((5..=25).contains(&deep.movement_level));

        let rem = synthesizer.sample(TrackingPhase::Rem, &mut rng);
        assert!((58..=78).contains(&rem.heart_rate_bpm), "rem hr {}", rem.heart_rate_bpm);
        assert!((8..=28).contains(&rem.movement_level));

        for sample in [deep, rem] {
            assert!((35..=60).contains(&sample.hrv));
            assert!((96..=99).contains(&sample.spo2));
            assert!((36.2..=36.6).contains(&sample.temperature_c));
        }
    }
}

#[test]
fn test_synthesizer_is_deterministic_under_seed() {
    let synthesizer = SensorSynthesizer::default();
    let mut a = ChaCha8Rng::seed_from_u64(9);
    let mut b = ChaCha8Rng::seed_from_u64(9);
    for phase in [TrackingPhase::FallingAsleep, TrackingPhase::Light, TrackingPhase::Rem] {
        assert_eq!(synthesizer.sample(phase, &mut a), synthesizer.sample(phase, &mut b));
    }
}

#[test]
fn test_zero_amplitude_yields_exact_baseline() {
    let table = PhaseBaselineTable::with_fallback(PhaseBaseline::new(60.0, 0.0, 10.0));
    let synthesizer = SensorSynthesizer::new(table);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for _ in 0..100 {
        assert_eq!(synthesizer.sample(TrackingPhase::Light, &mut rng).heart_rate_bpm, 60);
    }
}

// ============================================================================
// Heart-rate history
// ============================================================================

#[test]
fn test_heart_rate_history_drops_oldest() {
    let mut history = HeartRateHistory::seeded();
    assert_eq!(history.values(), vec![72]);

    for bpm in 0..40 {
        history.push(bpm);
    }
    assert_eq!(history.len(), 30);
    assert_eq!(history.values().first(), Some(&10));
    assert_eq!(history.latest(), Some(39));
}

// ============================================================================
// Virtual-time driver
// ============================================================================

#[test]
fn test_driver_first_phase_boundary() {
    let mut driver = driver(3);
    driver.advance_by(Duration::from_millis(7999));
    assert_eq!(driver.snapshot().phase_index, 0);

    let events = driver.advance_by(Duration::from_millis(1));
    assert!(events.contains(&SessionEvent::PhaseChanged {
        index: 1,
        phase: *PhaseTimeline::standard().get(1),
    }));
    assert_eq!(driver.snapshot().phase_index, 1);
}

#[test]
fn test_driver_counts_ticks() {
    let mut driver = driver(5);
    let events = driver.advance_by(Duration::from_millis(8000));

    let samples = events.iter().filter(|e| matches!(e, SessionEvent::Sampled(_))).count();
    let clocks = events.iter().filter(|e| matches!(e, SessionEvent::ClockTick(_))).count();
    let toggles = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::TransmitToggled(_)))
        .count();
    assert_eq!(samples, 5);
    assert_eq!(clocks, 8);
    assert_eq!(toggles, 2);

    let snapshot = driver.snapshot();
    assert_eq!(snapshot.elapsed_seconds, 8);
    assert!(snapshot.transmitting);
    // seeded reading plus five samples
    assert_eq!(snapshot.heart_rate.len(), 6);
}

#[test]
fn test_driver_orders_simultaneous_ticks() {
    let mut driver = driver(5);
    let events = driver.advance_by(Duration::from_millis(3000));
    let tail: Vec<_> = events.iter().rev().take(3).rev().cloned().collect();
    assert!(matches!(tail[0], SessionEvent::Sampled(_)));
    assert_eq!(tail[1], SessionEvent::ClockTick(3));
    assert_eq!(tail[2], SessionEvent::TransmitToggled(false));
}

#[test]
fn test_phase_change_restarts_sample_tick() {
    let mut driver = driver(8);
    driver.advance_by(Duration::from_millis(8000));
    // Without the restart a sample would fall due at 9000 ms
    let events = driver.advance_by(Duration::from_millis(1400));
    assert!(!events.iter().any(|e| matches!(e, SessionEvent::Sampled(_))));
    let events = driver.advance_by(Duration::from_millis(100));
    assert!(events.iter().any(|e| matches!(e, SessionEvent::Sampled(_))));
}

#[test]
fn test_driver_history_is_capped() {
    let mut driver = driver(11);
    driver.advance_by(Duration::from_secs(120));
    let snapshot = driver.snapshot();
    assert_eq!(snapshot.heart_rate.len(), 30);
    assert_eq!(snapshot.heart_rate.last(), Some(&snapshot.sample.heart_rate_bpm));
    assert_eq!(snapshot.elapsed_seconds, 120);
}

#[test]
fn test_driver_rejects_zero_period() {
    let timings = SessionTimings {
        sample_interval_ms: 0,
        ..SessionTimings::default()
    };
    let result = SessionDriver::new(
        PhaseTimeline::standard(),
        SensorSynthesizer::default(),
        timings,
        ChaCha8Rng::seed_from_u64(0),
    );
    assert!(result.is_err());
}

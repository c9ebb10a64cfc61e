// ABOUTME: Tests for ambient sound playback over pluggable audio outputs
// ABOUTME: Uses the in-memory output to observe loops and a failing factory for degraded mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dreamband::audio::{AmbientPlayer, AudioOutput, MemoryAudioOutput};
use dreamband::settings::{AmbientSound, MemoryStore, SettingsManager};
use dreamband_core::errors::{AppError, AppResult};

const RATE: u32 = 8000;

fn settings() -> SettingsManager<MemoryStore> {
    SettingsManager::load(MemoryStore::new())
}

#[test]
fn test_play_starts_two_second_loop() {
    let output = MemoryAudioOutput::new(RATE);
    let mut player = AmbientPlayer::with_output(output.clone(), Some(1));
    let mut settings = settings();

    player.play(AmbientSound::Rain, &mut settings).unwrap();
    assert_eq!(player.current(), Some(AmbientSound::Rain));
    assert_eq!(settings.settings().selected_sound, AmbientSound::Rain);

    let log = output.log();
    let playing = log.playing.unwrap();
    assert_eq!(playing.buffer.len(), 2 * RATE as usize);
    assert!((playing.gain - 0.01).abs() < f32::EPSILON);
    assert!(playing.buffer.iter().all(|s| s.is_finite()));
}

#[test]
fn test_switching_sounds_stops_previous() {
    let output = MemoryAudioOutput::new(RATE);
    let mut player = AmbientPlayer::with_output(output.clone(), Some(2));
    let mut settings = settings();

    player.play(AmbientSound::WhiteNoise, &mut settings).unwrap();
    player.play(AmbientSound::Ocean, &mut settings).unwrap();
    let log = output.log();
    assert_eq!(log.starts, 2);
    assert_eq!(log.stops, 1);
    assert_eq!(player.current(), Some(AmbientSound::Ocean));

    player.play(AmbientSound::Off, &mut settings).unwrap();
    let log = output.log();
    assert!(log.playing.is_none());
    assert_eq!(log.stops, 2);
    assert_eq!(player.current(), None);
    assert_eq!(settings.settings().selected_sound, AmbientSound::Off);
}

#[test]
fn test_output_opened_lazily_once() {
    let opened = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&opened);
    let output = MemoryAudioOutput::new(RATE);
    let factory_output = output.clone();
    let mut player = AmbientPlayer::new(
        Box::new(move || -> AppResult<Box<dyn AudioOutput>> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(factory_output.clone()) as Box<dyn AudioOutput>)
        }),
        Some(3),
    );
    let mut settings = settings();

    player.play(AmbientSound::Off, &mut settings).unwrap();
    assert_eq!(opened.load(Ordering::SeqCst), 0);

    player.play(AmbientSound::Rain, &mut settings).unwrap();
    player.play(AmbientSound::Ocean, &mut settings).unwrap();
    assert_eq!(opened.load(Ordering::SeqCst), 1);

    player.close();
    assert!(output.log().closed);
    assert_eq!(player.current(), None);
}

#[test]
fn test_unavailable_output_degrades_silently() {
    let mut player = AmbientPlayer::new(
        Box::new(|| -> AppResult<Box<dyn AudioOutput>> {
            Err(AppError::device_unavailable("audio"))
        }),
        Some(4),
    );
    let mut settings = settings();

    player.play(AmbientSound::Rain, &mut settings).unwrap();
    assert!(player.is_degraded());
    assert_eq!(player.current(), None);
    // The choice is still remembered
    assert_eq!(settings.settings().selected_sound, AmbientSound::Rain);
}

#[test]
fn test_drop_closes_output() {
    let output = MemoryAudioOutput::new(RATE);
    {
        let mut player = AmbientPlayer::with_output(output.clone(), Some(5));
        player.play(AmbientSound::WhiteNoise, &mut settings()).unwrap();
    }
    let log = output.log();
    assert!(log.closed);
    assert!(log.playing.is_none());
}

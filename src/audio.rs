// ABOUTME: Ambient sound player with lazily acquired, deterministically released audio output
// ABOUTME: Synthesizes a looping noise buffer per selection and persists the choice in settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

//! # Ambient player
//!
//! The output device is opened on first use. If it cannot be opened the
//! player logs once and every later call is a silent no-op. The device is
//! closed by [`AmbientPlayer::close`] or on drop.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use dreamband_core::constants::audio;
use dreamband_core::errors::AppResult;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::settings::{AmbientSound, KeyValueStore, SettingUpdate, SettingsManager};
use crate::simulation::noise;

/// Sink for looping mono buffers
pub trait AudioOutput: Send {
    /// Output sample rate (Hz)
    fn sample_rate(&self) -> u32;

    /// Start looping `buffer` at `gain`, replacing nothing (callers stop first)
    ///
    /// # Errors
    ///
    /// Returns an error if the device rejects the buffer
    fn start_loop(&mut self, buffer: Vec<f32>, gain: f32) -> AppResult<()>;

    /// Stop and disconnect the current loop, if any
    fn stop(&mut self);

    /// Release the device
    fn close(&mut self);
}

/// Opens an output device on first playback
pub type OutputFactory = Box<dyn FnMut() -> AppResult<Box<dyn AudioOutput>> + Send>;

/// Output that discards everything
#[derive(Debug, Clone, Copy)]
pub struct NullAudioOutput {
    sample_rate: u32,
}

impl NullAudioOutput {
    /// Discarding output at `sample_rate`
    #[must_use]
    pub const fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }
}

impl Default for NullAudioOutput {
    fn default() -> Self {
        Self::new(audio::DEFAULT_SAMPLE_RATE)
    }
}

impl AudioOutput for NullAudioOutput {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn start_loop(&mut self, buffer: Vec<f32>, gain: f32) -> AppResult<()> {
        debug!(samples = buffer.len(), gain, "Null audio output ignoring loop");
        Ok(())
    }

    fn stop(&mut self) {}

    fn close(&mut self) {}
}

/// Loop currently held by a [`MemoryAudioOutput`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedLoop {
    /// Buffer as handed to the output
    pub buffer: Vec<f32>,
    /// Gain applied
    pub gain: f32,
}

/// Everything a [`MemoryAudioOutput`] has been asked to do
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryAudioLog {
    /// Loop playing now
    pub playing: Option<RecordedLoop>,
    /// Loops started so far
    pub starts: usize,
    /// Stop calls that actually stopped a loop
    pub stops: usize,
    /// Whether the device was released
    pub closed: bool,
}

/// Output that records calls into a shared log
///
/// Clones share the same log, so a test can keep one clone and hand another
/// to the player.
#[derive(Debug, Clone)]
pub struct MemoryAudioOutput {
    sample_rate: u32,
    log: Arc<Mutex<MemoryAudioLog>>,
}

impl MemoryAudioOutput {
    /// Recording output at `sample_rate`
    #[must_use]
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            log: Arc::new(Mutex::new(MemoryAudioLog::default())),
        }
    }

    /// Copy of the log
    #[must_use]
    pub fn log(&self) -> MemoryAudioLog {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn with_log(&self, f: impl FnOnce(&mut MemoryAudioLog)) {
        f(&mut self.log.lock().unwrap_or_else(PoisonError::into_inner));
    }
}

impl AudioOutput for MemoryAudioOutput {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn start_loop(&mut self, buffer: Vec<f32>, gain: f32) -> AppResult<()> {
        self.with_log(|log| {
            log.playing = Some(RecordedLoop { buffer, gain });
            log.starts += 1;
        });
        Ok(())
    }

    fn stop(&mut self) {
        self.with_log(|log| {
            if log.playing.take().is_some() {
                log.stops += 1;
            }
        });
    }

    fn close(&mut self) {
        self.with_log(|log| {
            log.playing = None;
            log.closed = true;
        });
    }
}

enum OutputSlot {
    NotOpened,
    Open(Box<dyn AudioOutput>),
    Unavailable,
}

/// Plays the ambient sound chosen in settings
pub struct AmbientPlayer {
    open_output: OutputFactory,
    output: OutputSlot,
    current: Option<AmbientSound>,
    rng: ChaCha8Rng,
}

impl fmt::Debug for AmbientPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let output = match self.output {
            OutputSlot::NotOpened => "not opened",
            OutputSlot::Open(_) => "open",
            OutputSlot::Unavailable => "unavailable",
        };
        f.debug_struct("AmbientPlayer")
            .field("output", &output)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl AmbientPlayer {
    /// Player that opens its device through `open_output` on first playback
    #[must_use]
    pub fn new(open_output: OutputFactory, seed: Option<u64>) -> Self {
        Self {
            open_output,
            output: OutputSlot::NotOpened,
            current: None,
            rng: seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64),
        }
    }

    /// Player over an already constructed output
    #[must_use]
    pub fn with_output<O: AudioOutput + Clone + 'static>(output: O, seed: Option<u64>) -> Self {
        Self::new(
            Box::new(move || Ok(Box::new(output.clone()) as Box<dyn AudioOutput>)),
            seed,
        )
    }

    /// Sound currently looping
    #[must_use]
    pub const fn current(&self) -> Option<AmbientSound> {
        self.current
    }

    /// Whether the device could not be opened
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self.output, OutputSlot::Unavailable)
    }

    /// Select `sound`: persist it, stop what is playing, and loop the new buffer
    ///
    /// Persistence failures are logged by the settings manager and do not
    /// stop playback.
    ///
    /// # Errors
    ///
    /// Returns an error if an open device rejects the new buffer
    pub fn play<S: KeyValueStore>(
        &mut self,
        sound: AmbientSound,
        settings: &mut SettingsManager<S>,
    ) -> AppResult<()> {
        if settings.update(SettingUpdate::SelectedSound(sound)).is_err() {
            debug!(sound = %sound, "Ambient selection kept in memory only");
        }

        self.stop();
        let Some(kind) = sound.noise_kind() else {
            return Ok(());
        };
        let Some(sample_rate) = self.ensure_output() else {
            return Ok(());
        };

        let buffer = noise::synthesize(kind, sample_rate, &mut self.rng);
        if let OutputSlot::Open(output) = &mut self.output {
            output.start_loop(buffer, audio::AMBIENT_GAIN)?;
            self.current = Some(sound);
        }
        info!(sound = %sound, "Ambient sound started");
        Ok(())
    }

    /// Stop the current loop; the device stays open
    pub fn stop(&mut self) {
        if let OutputSlot::Open(output) = &mut self.output {
            output.stop();
        }
        if let Some(sound) = self.current.take() {
            debug!(sound = %sound, "Ambient sound stopped");
        }
    }

    /// Stop playback and release the device
    pub fn close(&mut self) {
        self.stop();
        if let OutputSlot::Open(mut output) =
            std::mem::replace(&mut self.output, OutputSlot::NotOpened)
        {
            output.close();
            debug!("Audio output released");
        }
    }

    /// Open the device if needed and return its sample rate
    fn ensure_output(&mut self) -> Option<u32> {
        if matches!(self.output, OutputSlot::NotOpened) {
            self.output = match (self.open_output)() {
                Ok(output) => OutputSlot::Open(output),
                Err(e) => {
                    warn!(error = %e, "Audio output unavailable, ambient playback disabled");
                    OutputSlot::Unavailable
                }
            };
        }
        match &self.output {
            OutputSlot::Open(output) => Some(output.sample_rate()),
            OutputSlot::NotOpened | OutputSlot::Unavailable => None,
        }
    }
}

impl Drop for AmbientPlayer {
    fn drop(&mut self) {
        self.close();
    }
}

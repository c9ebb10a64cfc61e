// ABOUTME: Simulated live sleep session wiring the sequencer, synthesizer, clock, and indicator
// ABOUTME: Offers a tokio-timer LiveSession with start/stop teardown and a virtual-time SessionDriver
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

//! Live tracking session.
//!
//! Four independent activities run while a session is active:
//!
//! - phase dwell timeout (variable period, re-armed on each transition)
//! - sensor sample tick (fixed period, re-armed when the phase changes)
//! - elapsed-second clock tick (fixed period)
//! - transmission indicator toggle (fixed period)
//!
//! [`LiveSession`] runs them as tokio tasks and cancels all of them on
//! [`LiveSession::stop`] or drop. [`SessionDriver`] applies the same rules to
//! virtual time so behaviour can be stepped without a runtime.

use std::sync::Arc;
use std::time::Duration;

use dreamband_core::errors::AppResult;
use dreamband_core::models::{PhaseDescriptor, SensorSample};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::clock::{SessionClock, TransmissionIndicator};
use super::heart_rate::HeartRateHistory;
use super::sequencer::{PhaseSequencer, PhaseTimeline};
use super::synthesizer::SensorSynthesizer;
use crate::config::{EngineConfig, PhaseBaselineTable, SessionTimings};

/// Mutable state of one tracking session
#[derive(Debug, Clone)]
pub struct SessionState {
    sequencer: PhaseSequencer,
    latest: SensorSample,
    heart_rate: HeartRateHistory,
    clock: SessionClock,
    transmitter: TransmissionIndicator,
}

impl SessionState {
    /// Fresh state at the first phase with the pre-tick reading
    #[must_use]
    pub fn new(timeline: PhaseTimeline) -> Self {
        Self {
            sequencer: PhaseSequencer::new(timeline),
            latest: SensorSample::initial(),
            heart_rate: HeartRateHistory::seeded(),
            clock: SessionClock::default(),
            transmitter: TransmissionIndicator::default(),
        }
    }

    /// Store a new reading and append its heart rate to the history
    pub fn record_sample(&mut self, sample: SensorSample) {
        self.latest = sample;
        self.heart_rate.push(sample.heart_rate_bpm);
    }

    /// Phase sequencer
    #[must_use]
    pub const fn sequencer(&self) -> &PhaseSequencer {
        &self.sequencer
    }

    /// Latest reading
    #[must_use]
    pub const fn latest_sample(&self) -> &SensorSample {
        &self.latest
    }

    /// Rolling heart-rate history
    #[must_use]
    pub const fn heart_rate(&self) -> &HeartRateHistory {
        &self.heart_rate
    }

    /// Session clock
    #[must_use]
    pub const fn clock(&self) -> &SessionClock {
        &self.clock
    }

    /// Transmission indicator
    #[must_use]
    pub const fn transmitter(&self) -> &TransmissionIndicator {
        &self.transmitter
    }

    /// Copy of everything the tracking view renders
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase_index: self.sequencer.current_index(),
            phase: *self.sequencer.current_phase(),
            sample: self.latest,
            heart_rate: self.heart_rate.values(),
            elapsed_seconds: self.clock.elapsed_seconds(),
            transmitting: self.transmitter.is_transmitting(),
        }
    }
}

/// Point-in-time view of a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Index of the active phase in the timeline
    pub phase_index: usize,
    /// Active phase
    pub phase: PhaseDescriptor,
    /// Latest reading
    pub sample: SensorSample,
    /// Heart-rate history, oldest first
    pub heart_rate: Vec<u32>,
    /// Seconds since start
    pub elapsed_seconds: u64,
    /// Transmission indicator flag
    pub transmitting: bool,
}

/// Something that happened while stepping a [`SessionDriver`]
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A new phase became active
    PhaseChanged {
        /// Timeline index of the new phase
        index: usize,
        /// New phase
        phase: PhaseDescriptor,
    },
    /// A sample was drawn
    Sampled(SensorSample),
    /// The clock advanced to this many seconds
    ClockTick(u64),
    /// The transmission flag flipped to this value
    TransmitToggled(bool),
}

/// Deterministic virtual-time session
///
/// Each timer keeps its own countdown; [`SessionDriver::advance_by`] fires
/// them in chronological order. A timer due exactly at the end of the step
/// fires within that step.
#[derive(Debug)]
pub struct SessionDriver<R> {
    state: SessionState,
    synthesizer: SensorSynthesizer,
    timings: SessionTimings,
    rng: R,
    until_sample: Duration,
    until_clock: Duration,
    until_transmit: Duration,
}

impl<R: Rng> SessionDriver<R> {
    /// Create a driver at time zero
    ///
    /// # Errors
    ///
    /// Returns an error if any timer period is zero
    pub fn new(
        timeline: PhaseTimeline,
        synthesizer: SensorSynthesizer,
        timings: SessionTimings,
        rng: R,
    ) -> AppResult<Self> {
        timings.validate()?;
        Ok(Self {
            state: SessionState::new(timeline),
            synthesizer,
            until_sample: timings.sample_interval(),
            until_clock: timings.clock_interval(),
            until_transmit: timings.transmit_interval(),
            timings,
            rng,
        })
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshot()
    }

    /// Advance virtual time by `dt`, returning the events fired in order
    pub fn advance_by(&mut self, mut dt: Duration) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        loop {
            let next = self
                .state
                .sequencer
                .remaining()
                .min(self.until_sample)
                .min(self.until_clock)
                .min(self.until_transmit);
            if next > dt {
                self.consume(dt);
                return events;
            }
            dt -= next;
            let entered = self.consume(next);

            if self.until_sample.is_zero() {
                let phase = self.state.sequencer.current_phase().phase;
                let sample = self.synthesizer.sample(phase, &mut self.rng);
                self.state.record_sample(sample);
                self.until_sample = self.timings.sample_interval();
                events.push(SessionEvent::Sampled(sample));
            }
            for phase in entered {
                // The sample tick restarts whenever the phase changes
                self.until_sample = self.timings.sample_interval();
                events.push(SessionEvent::PhaseChanged {
                    index: self.state.sequencer.current_index(),
                    phase,
                });
            }
            if self.until_clock.is_zero() {
                self.state.clock.tick();
                self.until_clock = self.timings.clock_interval();
                events.push(SessionEvent::ClockTick(self.state.clock.elapsed_seconds()));
            }
            if self.until_transmit.is_zero() {
                let flag = self.state.transmitter.toggle();
                self.until_transmit = self.timings.transmit_interval();
                events.push(SessionEvent::TransmitToggled(flag));
            }
        }
    }

    fn consume(&mut self, dt: Duration) -> Vec<PhaseDescriptor> {
        self.until_sample = self.until_sample.saturating_sub(dt);
        self.until_clock = self.until_clock.saturating_sub(dt);
        self.until_transmit = self.until_transmit.saturating_sub(dt);
        self.state.sequencer.elapse(dt)
    }
}

/// Tracking session driven by tokio timers
///
/// `start` spawns the four timer tasks; `stop` (or dropping the session)
/// aborts them. No task outlives the session.
pub struct LiveSession {
    timeline: PhaseTimeline,
    synthesizer: SensorSynthesizer,
    timings: SessionTimings,
    seed: Option<u64>,
    state: Arc<RwLock<SessionState>>,
    tasks: Vec<JoinHandle<()>>,
}

impl LiveSession {
    /// Create a stopped session
    ///
    /// # Errors
    ///
    /// Returns an error if any timer period is zero
    pub fn new(
        timeline: PhaseTimeline,
        synthesizer: SensorSynthesizer,
        timings: SessionTimings,
        seed: Option<u64>,
    ) -> AppResult<Self> {
        timings.validate()?;
        Ok(Self {
            state: Arc::new(RwLock::new(SessionState::new(timeline.clone()))),
            timeline,
            synthesizer,
            timings,
            seed,
            tasks: Vec::new(),
        })
    }

    /// Session with the standard timeline and default baselines, tuned by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the configured timer periods are invalid
    pub fn from_config(config: &EngineConfig) -> AppResult<Self> {
        Self::new(
            PhaseTimeline::standard(),
            SensorSynthesizer::new(PhaseBaselineTable::default()),
            config.timings,
            config.seed,
        )
    }

    /// Whether the timer tasks are running
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Reset state and spawn the timer tasks
    ///
    /// Must be called from within a tokio runtime. Starting a running session
    /// is a no-op.
    pub async fn start(&mut self) {
        if self.is_running() {
            warn!("Sleep session already running; start ignored");
            return;
        }
        *self.state.write().await = SessionState::new(self.timeline.clone());

        let (phase_tx, phase_rx) = watch::channel(0_usize);
        let rng = self
            .seed
            .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);

        self.tasks = vec![
            tokio::spawn(run_dwell_timer(Arc::clone(&self.state), phase_tx)),
            tokio::spawn(run_sample_timer(
                Arc::clone(&self.state),
                self.synthesizer.clone(),
                self.timings.sample_interval(),
                rng,
                phase_rx,
            )),
            tokio::spawn(run_clock_timer(
                Arc::clone(&self.state),
                self.timings.clock_interval(),
            )),
            tokio::spawn(run_transmit_timer(
                Arc::clone(&self.state),
                self.timings.transmit_interval(),
            )),
        ];
        info!(
            phases = self.timeline.len(),
            sample_ms = self.timings.sample_interval_ms,
            "Sleep session started"
        );
    }

    /// Cancel every timer task and wait for them to finish
    pub async fn stop(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        for handle in self.tasks.drain(..) {
            handle.abort();
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    warn!(error = %e, "Sleep session timer task failed");
                }
            }
        }
        let elapsed = self.state.read().await.clock.elapsed_seconds();
        info!(elapsed_seconds = elapsed, "Sleep session stopped");
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.snapshot()
    }

    /// Handle to the state the timer tasks write into
    #[must_use]
    pub fn shared_state(&self) -> Arc<RwLock<SessionState>> {
        Arc::clone(&self.state)
    }
}

impl Drop for LiveSession {
    fn drop(&mut self) {
        for handle in &self.tasks {
            handle.abort();
        }
        if !self.tasks.is_empty() {
            debug!("Sleep session dropped while running; timer tasks aborted");
        }
    }
}

async fn run_dwell_timer(state: Arc<RwLock<SessionState>>, phase_tx: watch::Sender<usize>) {
    loop {
        // Dwell is read when the delay is armed, never re-applied mid-dwell
        let dwell = state.read().await.sequencer.current_phase().dwell();
        time::sleep(dwell).await;
        let index = {
            let mut guard = state.write().await;
            guard.sequencer.advance();
            guard.sequencer.current_index()
        };
        phase_tx.send_replace(index);
    }
}

async fn run_sample_timer(
    state: Arc<RwLock<SessionState>>,
    synthesizer: SensorSynthesizer,
    period: Duration,
    mut rng: ChaCha8Rng,
    mut phase_rx: watch::Receiver<usize>,
) {
    loop {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let mut guard = state.write().await;
                    let phase = guard.sequencer.current_phase().phase;
                    let sample = synthesizer.sample(phase, &mut rng);
                    guard.record_sample(sample);
                }
                changed = phase_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    // Re-arm the tick for the new phase
                    break;
                }
            }
        }
    }
}

async fn run_clock_timer(state: Arc<RwLock<SessionState>>, period: Duration) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        state.write().await.clock.tick();
    }
}

async fn run_transmit_timer(state: Arc<RwLock<SessionState>>, period: Duration) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        state.write().await.transmitter.toggle();
    }
}

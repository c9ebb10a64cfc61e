// ABOUTME: Synthetic sleep history generator for the statistics screens
// ABOUTME: Draws stage blocks until the night's total is reached, plus heart rate and scores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use std::ops::Range;

use chrono::{Days, NaiveDate};
use dreamband_core::constants::history;
use dreamband_core::models::{HeartRatePoint, SleepSession, SleepStage, SleepStageType};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Stage types drawn uniformly for each block
const STAGE_POOL: [SleepStageType; 4] = [
    SleepStageType::Deep,
    SleepStageType::Light,
    SleepStageType::Rem,
    SleepStageType::Awake,
];

/// Half-open range of a single block's length (minutes) before clamping
#[must_use]
pub fn stage_duration_range(stage_type: SleepStageType) -> Range<u32> {
    match stage_type {
        SleepStageType::Awake => 5..15,
        SleepStageType::Deep => 20..60,
        SleepStageType::Rem => 15..45,
        SleepStageType::Light => 30..90,
        _ => 30..90,
    }
}

/// Random sleep-history source
#[derive(Debug, Clone)]
pub struct SleepHistoryGenerator<R> {
    rng: R,
}

impl SleepHistoryGenerator<ChaCha8Rng> {
    /// Reproducible generator
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Generator seeded from `seed` when present, else from OS entropy
    #[must_use]
    pub fn from_seed_or_entropy(seed: Option<u64>) -> Self {
        seed.map_or_else(|| Self::new(ChaCha8Rng::from_entropy()), Self::seeded)
    }
}

impl<R: Rng> SleepHistoryGenerator<R> {
    /// Wrap an RNG
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// One night of history for `date`
    ///
    /// Stage blocks always sum exactly to the total sleep time: the last block
    /// is clamped to whatever remains.
    pub fn session(&mut self, date: NaiveDate) -> SleepSession {
        let total = history::MIN_TOTAL_SLEEP_MINUTES
            + self.rng.gen_range(0..history::TOTAL_SLEEP_SPREAD_MINUTES);

        let mut stages = Vec::new();
        let mut remaining = total;
        while remaining > 0 {
            let stage_type = STAGE_POOL
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(SleepStageType::Light);
            let drawn = self.rng.gen_range(stage_duration_range(stage_type));
            let duration_minutes = drawn.min(remaining);
            stages.push(SleepStage {
                stage_type,
                duration_minutes,
            });
            remaining -= duration_minutes;
        }

        let heart_rate = (0..total)
            .step_by(history::HEART_RATE_STEP_MINUTES as usize)
            .map(|time_offset_minutes| HeartRatePoint {
                time_offset_minutes,
                bpm: history::MIN_HEART_RATE + self.rng.gen_range(0..history::HEART_RATE_SPREAD),
            })
            .collect();

        let id = date.format("%Y-%m-%d").to_string();
        SleepSession {
            id,
            date,
            total_sleep_minutes: total,
            quality_score: history::MIN_QUALITY_SCORE
                + self.rng.gen_range(0..history::QUALITY_SPREAD),
            time_to_fall_asleep_minutes: history::MIN_TIME_TO_FALL_ASLEEP
                + self.rng.gen_range(0..history::TIME_TO_FALL_ASLEEP_SPREAD),
            stages,
            heart_rate,
        }
    }

    /// The `days` nights before `today`, most recent (yesterday) first
    pub fn nights_before(&mut self, today: NaiveDate, days: u32) -> Vec<SleepSession> {
        let sessions: Vec<_> = (1..=u64::from(days))
            .filter_map(|back| today.checked_sub_days(Days::new(back)))
            .map(|date| self.session(date))
            .collect();
        debug!(nights = sessions.len(), %today, "Synthetic sleep history generated");
        sessions
    }
}

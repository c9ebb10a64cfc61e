// ABOUTME: Aggregates over recorded nights for the statistics detail view
// ABOUTME: Per-stage totals, stacked-bar shares, history averages, and duration labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use dreamband_core::models::{SleepSession, SleepStageType};
use serde::Serialize;

/// `"{h}ч {m}м"` once an hour is reached, otherwise `"{m}м"`
#[must_use]
pub fn format_duration_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{hours}ч {mins}м")
    } else {
        format!("{mins}м")
    }
}

/// Minutes per stage for one night
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageBreakdown {
    /// Deep sleep
    pub deep: u32,
    /// Light sleep
    pub light: u32,
    /// REM sleep
    pub rem: u32,
    /// Awake
    pub awake: u32,
}

impl StageBreakdown {
    /// Totals for `session`
    #[must_use]
    pub fn of(session: &SleepSession) -> Self {
        Self {
            deep: session.stage_minutes(SleepStageType::Deep),
            light: session.stage_minutes(SleepStageType::Light),
            rem: session.stage_minutes(SleepStageType::Rem),
            awake: session.stage_minutes(SleepStageType::Awake),
        }
    }

    /// Sum over all stages
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.deep + self.light + self.rem + self.awake
    }

    /// Legend lines in display order
    #[must_use]
    pub fn legend(&self) -> [(&'static str, String); 4] {
        [
            ("Глубокий", format_duration_minutes(self.deep)),
            ("Легкий", format_duration_minutes(self.light)),
            ("REM", format_duration_minutes(self.rem)),
            ("Бодр-е", format_duration_minutes(self.awake)),
        ]
    }
}

/// One block of the stacked stage bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartSegment {
    /// Stage
    pub stage_type: SleepStageType,
    /// Block length (minutes)
    pub duration_minutes: u32,
    /// Share of the night, 0.0..=1.0
    pub share: f64,
    /// Chart color variable
    pub color: &'static str,
}

/// Stage blocks normalised to the night's length, in chronological order
#[must_use]
pub fn chart_segments(session: &SleepSession) -> Vec<ChartSegment> {
    let total = f64::from(session.staged_minutes().max(1));
    session
        .stages
        .iter()
        .map(|stage| ChartSegment {
            stage_type: stage.stage_type,
            duration_minutes: stage.duration_minutes,
            share: f64::from(stage.duration_minutes) / total,
            color: stage.stage_type.chart_color(),
        })
        .collect()
}

/// Averages across a set of nights
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryOverview {
    /// Number of nights
    pub nights: usize,
    /// Mean total sleep (minutes)
    pub average_sleep_minutes: f64,
    /// Mean quality score
    pub average_quality: f64,
    /// Mean time to fall asleep (minutes)
    pub average_time_to_fall_asleep: f64,
}

impl HistoryOverview {
    /// Summarise `sessions`; `None` when empty
    #[must_use]
    pub fn of(sessions: &[SleepSession]) -> Option<Self> {
        if sessions.is_empty() {
            return None;
        }
        let n = sessions.len() as f64;
        let mean = |f: fn(&SleepSession) -> u32| {
            sessions.iter().map(|s| f64::from(f(s))).sum::<f64>() / n
        };
        Some(Self {
            nights: sessions.len(),
            average_sleep_minutes: mean(|s| s.total_sleep_minutes),
            average_quality: mean(|s| s.quality_score),
            average_time_to_fall_asleep: mean(|s| s.time_to_fall_asleep_minutes),
        })
    }
}

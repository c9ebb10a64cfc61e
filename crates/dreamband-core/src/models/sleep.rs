// ABOUTME: Sleep history models for the statistics screens
// ABOUTME: SleepSession, SleepStage, SleepStageType, and HeartRatePoint definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Types of sleep stages recorded in a night's history
#[non_exhaustive]
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SleepStageType {
    /// Awake stage - user is conscious
    Awake,
    /// REM (Rapid Eye Movement) sleep stage
    Rem,
    /// Light sleep stage
    Light,
    /// Deep sleep stage
    Deep,
}

impl SleepStageType {
    /// Every stage, in chart order
    pub const ALL: [Self; 4] = [Self::Awake, Self::Rem, Self::Light, Self::Deep];

    /// Chart color variable for this stage
    #[must_use]
    pub const fn chart_color(self) -> &'static str {
        match self {
            Self::Awake => "var(--chart-5)",
            Self::Rem => "var(--chart-4)",
            Self::Light => "var(--chart-2)",
            Self::Deep => "var(--chart-1)",
        }
    }
}

/// A contiguous block of one stage
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepStage {
    /// Stage type
    pub stage_type: SleepStageType,
    /// Duration of this stage in minutes
    pub duration_minutes: u32,
}

/// Heart rate reading at an offset into the night
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRatePoint {
    /// Minutes since the session started
    pub time_offset_minutes: u32,
    /// Beats per minute
    pub bpm: u32,
}

/// One night of (synthetic) sleep history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepSession {
    /// Identifier; the ISO date of the night
    pub id: String,
    /// Night the session belongs to
    pub date: NaiveDate,
    /// Total sleep time (minutes)
    pub total_sleep_minutes: u32,
    /// Quality score (0-100)
    pub quality_score: u32,
    /// Time to fall asleep (minutes)
    pub time_to_fall_asleep_minutes: u32,
    /// Stages in chronological order
    pub stages: Vec<SleepStage>,
    /// Heart rate readings in chronological order
    pub heart_rate: Vec<HeartRatePoint>,
}

impl SleepSession {
    /// Minutes spent in each stage
    #[must_use]
    pub fn stage_summary(&self) -> HashMap<SleepStageType, u32> {
        let mut summary = HashMap::new();
        for stage in &self.stages {
            *summary.entry(stage.stage_type).or_insert(0) += stage.duration_minutes;
        }
        summary
    }

    /// Minutes spent in one stage
    #[must_use]
    pub fn stage_minutes(&self, stage_type: SleepStageType) -> u32 {
        self.stages
            .iter()
            .filter(|s| s.stage_type == stage_type)
            .map(|s| s.duration_minutes)
            .sum()
    }

    /// Sum of all stage durations
    #[must_use]
    pub fn staged_minutes(&self) -> u32 {
        self.stages.iter().map(|s| s.duration_minutes).sum()
    }
}

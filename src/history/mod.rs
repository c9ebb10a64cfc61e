// ABOUTME: Synthetic sleep history, month calendar, and statistics for past nights
// ABOUTME: Feeds the history screen, the detail view, and the CLI history command
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

/// Month grid and session lookup
pub mod calendar;
/// Random history generation
pub mod generator;
/// Per-night and cross-night aggregates
pub mod stats;

pub use calendar::{CalendarDay, MonthCalendar, SessionIndex, WEEKDAY_HEADERS};
pub use generator::{stage_duration_range, SleepHistoryGenerator};
pub use stats::{
    chart_segments, format_duration_minutes, ChartSegment, HistoryOverview, StageBreakdown,
};

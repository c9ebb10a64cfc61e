// ABOUTME: Output formatting helpers for dreamband-cli
// ABOUTME: Text renderings of session snapshots, nights, calendars, and settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use chrono::NaiveDate;
use dreamband::history::{
    chart_segments, format_duration_minutes, HistoryOverview, MonthCalendar, SessionIndex,
    StageBreakdown, WEEKDAY_HEADERS,
};
use dreamband::settings::AppSettings;
use dreamband::simulation::{format_elapsed, movement_bars, SessionEvent, SessionSnapshot};
use dreamband_core::models::{SleepSession, WakeWindow};
use serde::Serialize;

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One status line for a live or virtual session
pub fn display_snapshot(snapshot: &SessionSnapshot) {
    let sample = &snapshot.sample;
    println!(
        "[{}] {:<14} HR {:>3} bpm  HRV {:>3} ms  SpO2 {:>3}%  {:.1}°C  movement {}  {}",
        format_elapsed(snapshot.elapsed_seconds),
        snapshot.phase.phase.label(),
        sample.heart_rate_bpm,
        sample.hrv,
        sample.spo2,
        sample.temperature_c,
        "|".repeat(movement_bars(sample.movement_level) as usize),
        if snapshot.transmitting { "TX" } else { "  " },
    );
}

/// Print the notable events of a virtual-time step
pub fn display_events(events: &[SessionEvent]) {
    for event in events {
        if let SessionEvent::PhaseChanged { index, phase } = event {
            println!("   -> phase {index}: {} for {} ms", phase.phase.label(), phase.dwell_ms());
        }
    }
}

/// Closing summary after a session stops
pub fn display_session_summary(snapshot: &SessionSnapshot) {
    println!("\nSession finished");
    println!("{}", "=".repeat(50));
    println!("   Duration: {}", format_elapsed(snapshot.elapsed_seconds));
    println!("   Final phase: {}", snapshot.phase.phase.label());
    println!("   Heart-rate points: {}", snapshot.heart_rate.len());
    if let (Some(min), Some(max)) = (
        snapshot.heart_rate.iter().min(),
        snapshot.heart_rate.iter().max(),
    ) {
        println!("   Heart-rate range: {min}-{max} bpm");
    }
}

/// Table of nights with an overview header
pub fn display_history(sessions: &[SleepSession]) {
    println!("\nSleep history ({} nights)", sessions.len());
    println!("{}", "=".repeat(60));
    if let Some(overview) = HistoryOverview::of(sessions) {
        println!(
            "   Average sleep: {}   Average quality: {:.0}%   Average latency: {:.0} min",
            format_duration_minutes(overview.average_sleep_minutes.round() as u32),
            overview.average_quality,
            overview.average_time_to_fall_asleep,
        );
        println!("{}", "-".repeat(60));
    }
    for session in sessions {
        println!(
            "   {}  {:>8}  quality {:>2}%  fell asleep in {} min",
            session.id,
            format_duration_minutes(session.total_sleep_minutes),
            session.quality_score,
            session.time_to_fall_asleep_minutes,
        );
    }
}

/// One night in detail
pub fn display_session(session: &SleepSession) {
    println!("\nNight of {}", session.id);
    println!("{}", "=".repeat(50));
    println!("   Total sleep: {}", format_duration_minutes(session.total_sleep_minutes));
    println!("   Quality: {}%", session.quality_score);
    println!("   Fell asleep in: {} min", session.time_to_fall_asleep_minutes);

    println!("\n   Stages:");
    for (label, duration) in StageBreakdown::of(session).legend() {
        println!("      {label:<10} {duration}");
    }

    println!("\n   Timeline:");
    for segment in chart_segments(session) {
        let width = (segment.share * 40.0).round().max(1.0) as usize;
        println!(
            "      {:<6} {:>3} min {}",
            format!("{:?}", segment.stage_type),
            segment.duration_minutes,
            "#".repeat(width),
        );
    }

    if let (Some(min), Some(max)) = (
        session.heart_rate.iter().map(|p| p.bpm).min(),
        session.heart_rate.iter().map(|p| p.bpm).max(),
    ) {
        println!("\n   Heart rate: {min}-{max} bpm over {} readings", session.heart_rate.len());
    }
}

/// Month grid; `*` marks nights with data, `[]` marks today
pub fn display_calendar(calendar: &MonthCalendar, index: &SessionIndex, today: NaiveDate) {
    println!("\n{}", calendar.title());
    println!("{}", WEEKDAY_HEADERS.map(|h| format!("{h:>4}")).concat());
    for week in calendar.cells(index, today).chunks(7) {
        let line: String = week
            .iter()
            .map(|cell| match cell {
                None => "    ".to_owned(),
                Some(day) if day.is_today => format!("[{:>2}]", day.day),
                Some(day) if day.has_data => format!(" {:>2}*", day.day),
                Some(day) => format!(" {:>2} ", day.day),
            })
            .collect();
        println!("{line}");
    }
}

/// Smart wake window of an alarm
pub fn display_wake_window(time_label: &str, window_minutes: u32, window: &WakeWindow) {
    println!("\nAlarm {time_label}");
    println!("{}", "=".repeat(40));
    println!("   Window: {window_minutes} min");
    println!("   Wake between {} - {}", window.start_label(), window.end_label());
    if window.wraps_midnight() {
        println!("   Window crosses midnight");
    }
}

/// All settings, one per line
pub fn display_settings(settings: &AppSettings) -> anyhow::Result<()> {
    println!("\nSettings");
    println!("{}", "=".repeat(40));
    let value = serde_json::to_value(settings)?;
    if let Some(fields) = value.as_object() {
        for (key, value) in fields {
            println!("   {key:<20} {value}");
        }
    }
    Ok(())
}

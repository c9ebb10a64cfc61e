// ABOUTME: Tests for synthetic sleep history, the month calendar, and night statistics
// ABOUTME: Checks generator invariants under fixed seeds and calendar grid layout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::NaiveDate;
use dreamband::history::{
    chart_segments, format_duration_minutes, stage_duration_range, HistoryOverview,
    MonthCalendar, SessionIndex, SleepHistoryGenerator, StageBreakdown,
};
use dreamband_core::models::SleepStageType;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Generator
// ============================================================================

#[test]
fn test_generated_nights_satisfy_invariants() {
    let mut generator = SleepHistoryGenerator::seeded(2024);
    for session in generator.nights_before(date(2025, 3, 10), 60) {
        assert!((420..540).contains(&session.total_sleep_minutes));
        assert!((60..100).contains(&session.quality_score));
        assert!((5..30).contains(&session.time_to_fall_asleep_minutes));
        assert_eq!(session.staged_minutes(), session.total_sleep_minutes);

        let (last, rest) = session.stages.split_last().unwrap();
        for stage in rest {
            assert!(stage_duration_range(stage.stage_type).contains(&stage.duration_minutes));
        }
        assert!(last.duration_minutes > 0);
        assert!(last.duration_minutes < stage_duration_range(last.stage_type).end);

        assert_eq!(
            session.heart_rate.len() as u32,
            session.total_sleep_minutes.div_ceil(10)
        );
        for (i, point) in session.heart_rate.iter().enumerate() {
            assert_eq!(point.time_offset_minutes, i as u32 * 10);
            assert!((50..70).contains(&point.bpm));
        }
    }
}

#[test]
fn test_nights_are_most_recent_first() {
    let sessions = SleepHistoryGenerator::seeded(1).nights_before(date(2025, 3, 1), 3);
    let ids: Vec<_> = sessions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["2025-02-28", "2025-02-27", "2025-02-26"]);
}

#[test]
fn test_same_seed_same_history() {
    let today = date(2025, 3, 10);
    let a = SleepHistoryGenerator::seeded(77).nights_before(today, 15);
    let b = SleepHistoryGenerator::seeded(77).nights_before(today, 15);
    assert_eq!(a, b);
    let c = SleepHistoryGenerator::seeded(78).nights_before(today, 15);
    assert_ne!(a, c);
}

#[test]
fn test_zero_days_is_empty() {
    assert!(SleepHistoryGenerator::seeded(0)
        .nights_before(date(2025, 3, 10), 0)
        .is_empty());
}

// ============================================================================
// Calendar
// ============================================================================

#[test]
fn test_march_grid() {
    let today = date(2025, 3, 10);
    let index = SessionIndex::new(SleepHistoryGenerator::seeded(5).nights_before(today, 15));
    let calendar = MonthCalendar::containing(today);
    assert_eq!(calendar.title(), "Март 2025");

    let cells = calendar.cells(&index, today);
    // 2025-03-01 is a Saturday
    assert!(cells[..5].iter().all(Option::is_none));
    assert_eq!(cells.len(), 5 + 31);

    let days: Vec<_> = cells.iter().flatten().collect();
    assert_eq!(days[0].day, 1);
    assert!(days[..9].iter().all(|d| d.has_data));
    assert!(days[9..].iter().all(|d| !d.has_data));
    assert!(days[9].is_today);
    assert_eq!(days.iter().filter(|d| d.is_today).count(), 1);
}

#[test]
fn test_select_day_and_navigation() {
    let today = date(2025, 3, 10);
    let index = SessionIndex::new(SleepHistoryGenerator::seeded(5).nights_before(today, 15));
    let march = MonthCalendar::containing(today);
    assert_eq!(march.select_day(&index, 9).map(|s| s.id.as_str()), Some("2025-03-09"));
    assert!(march.select_day(&index, 10).is_none());
    assert!(march.select_day(&index, 32).is_none());

    let february = march.previous();
    assert_eq!(february.year_month(), (2025, 2));
    assert_eq!(february.days_in_month(), 28);
    assert!(february.select_day(&index, 23).is_some());
    assert!(february.select_day(&index, 22).is_none());
    assert_eq!(march.next().title(), "Апрель 2025");
    assert_eq!(MonthCalendar::containing(date(2024, 12, 31)).next().year_month(), (2025, 1));
}

#[test]
fn test_index_lookup_by_id() {
    let index =
        SessionIndex::new(SleepHistoryGenerator::seeded(5).nights_before(date(2025, 3, 10), 15));
    assert_eq!(index.len(), 15);
    assert!(index.by_id("2025-03-01").is_ok());
    assert!(index.by_id("2025-03-10").is_err());
    assert!(index.by_id("yesterday").is_err());
}

// ============================================================================
// Statistics
// ============================================================================

#[test]
fn test_breakdown_sums_to_total() {
    let session = SleepHistoryGenerator::seeded(3).session(date(2025, 1, 1));
    let breakdown = StageBreakdown::of(&session);
    assert_eq!(breakdown.total(), session.total_sleep_minutes);
    assert_eq!(breakdown.deep, session.stage_minutes(SleepStageType::Deep));

    let shares: f64 = chart_segments(&session).iter().map(|s| s.share).sum();
    assert!((shares - 1.0).abs() < 1e-9);
}

#[test]
fn test_legend_labels() {
    let session = SleepHistoryGenerator::seeded(3).session(date(2025, 1, 1));
    let legend = StageBreakdown::of(&session).legend();
    assert_eq!(legend[0].0, "Глубокий");
    assert_eq!(
        legend[0].1,
        format_duration_minutes(session.stage_minutes(SleepStageType::Deep))
    );
    assert_eq!(legend[3].0, "Бодр-е");
}

#[test]
fn test_overview_averages() {
    let sessions = SleepHistoryGenerator::seeded(9).nights_before(date(2025, 3, 10), 4);
    let overview = HistoryOverview::of(&sessions).unwrap();
    assert_eq!(overview.nights, 4);
    let expected = sessions.iter().map(|s| f64::from(s.quality_score)).sum::<f64>() / 4.0;
    assert!((overview.average_quality - expected).abs() < 1e-9);
    assert!(HistoryOverview::of(&[]).is_none());
}

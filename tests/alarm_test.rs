// ABOUTME: Tests for the alarm setup flow and the application state shell
// ABOUTME: Covers wheel-driven alarm creation, wake windows, navigation, and notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use dreamband::alarm::AlarmSetup;
use dreamband::app::{AppState, Page};
use dreamband::history::SleepHistoryGenerator;
use dreamband_core::constants::app::ALARM_REQUIRED_MESSAGE;
use dreamband_core::models::Alarm;

const ITEM: f64 = 64.0;

// ============================================================================
// Alarm setup
// ============================================================================

#[test]
fn test_default_alarm_end_to_end() {
    let setup = AlarmSetup::new().unwrap();
    let alarm = setup.save().unwrap();
    assert_eq!(alarm.time_label(), "07:00");
    assert_eq!(alarm.window, 30);
    assert!(alarm.vibrate_phone && alarm.vibrate_bracelet);

    let mut app = AppState::new();
    app.save_alarm(alarm);
    assert_eq!(app.page(), Page::Home);
    assert_eq!(app.alarm_window_label().as_deref(), Some("06:45 - 07:15"));
}

#[test]
fn test_wheels_change_the_saved_time() {
    let mut setup = AlarmSetup::new().unwrap();
    let hours = setup.hour_picker();
    hours.drag_by(-ITEM);
    hours.release(0.0);
    assert_eq!(hours.run_to_rest(), 8);

    let minutes = setup.minute_picker();
    minutes.drag_by(2.0 * ITEM);
    minutes.release(0.0);
    assert_eq!(minutes.run_to_rest(), 58);

    assert_eq!(setup.preview_window().unwrap().to_string(), "08:28 - 08:58");
    assert_eq!(setup.save().unwrap().time_label(), "08:58");
}

#[test]
fn test_wake_window_wraps_midnight() {
    let alarm = Alarm::new(0, 10, 30, "default").unwrap();
    let window = alarm.wake_window();
    assert_eq!(window.to_string(), "23:55 - 00:25");
    assert!(window.wraps_midnight());
}

#[test]
fn test_parse_time() {
    assert!(Alarm::parse_time("06:45").is_ok());
    assert!(Alarm::parse_time("25:00").is_err());
    assert!(Alarm::parse_time("seven").is_err());
}

#[test]
fn test_alarm_serializes_time_as_hhmm() {
    let alarm = Alarm::new(6, 5, 15, "radar").unwrap();
    let json = serde_json::to_value(&alarm).unwrap();
    assert_eq!(json["time"], "06:05");
    assert_eq!(json["vibratePhone"], true);
    let back: Alarm = serde_json::from_value(json).unwrap();
    assert_eq!(back, alarm);
}

// ============================================================================
// App state
// ============================================================================

#[test]
fn test_initial_state() {
    let app = AppState::new();
    assert_eq!(app.page(), Page::Onboarding);
    assert!(app.is_onboarding());
    assert!(!app.shows_bottom_nav());
    assert_eq!(app.username(), "Пользователь");
    assert!(app.alarm().is_none());
}

#[test]
fn test_navigation_tracks_tabs_and_back() {
    let mut app = AppState::new();
    app.complete_onboarding();
    assert_eq!(app.page(), Page::Home);
    assert!(app.shows_bottom_nav());

    app.set_page(Page::Stats);
    assert_eq!(app.active_tab(), Page::Stats);
    app.set_page(Page::AlarmSetup);
    assert_eq!(app.active_tab(), Page::Stats);
    assert!(!app.shows_bottom_nav());

    app.back();
    assert_eq!(app.page(), Page::Stats);
}

#[test]
fn test_sleep_requires_alarm() {
    let mut app = AppState::new();
    let now = Instant::now();
    assert!(!app.start_sleep(now));
    assert!(!app.is_sleeping());
    assert_eq!(
        app.notification(now).map(|n| n.message.as_str()),
        Some(ALARM_REQUIRED_MESSAGE)
    );

    app.save_alarm(Alarm::new(7, 0, 30, "default").unwrap());
    assert!(app.start_sleep(now));
    assert!(app.is_sleeping());
    app.wake_up();
    assert!(!app.is_sleeping());
}

#[test]
fn test_notification_expires() {
    let mut app = AppState::new();
    let shown = Instant::now();
    app.show_notification("first", shown);
    assert!(app.notification(shown + Duration::from_millis(1999)).is_some());
    assert!(app.notification(shown + Duration::from_millis(2000)).is_none());

    app.show_notification("second", shown);
    let later = shown + Duration::from_millis(1000);
    app.show_notification("third", later);
    // The newer banner gets its own lifetime
    let third = app.notification(later + Duration::from_millis(1500)).unwrap();
    assert_eq!(third.message, "third");
    app.dismiss_notification();
    assert!(app.notification(later).is_none());
}

#[test]
fn test_open_last_night() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let sessions = SleepHistoryGenerator::seeded(1).nights_before(today, 15);
    let mut app = AppState::new();
    app.open_last_night(&sessions).unwrap();
    assert_eq!(app.page(), Page::StatsDetail);
    assert_eq!(app.selected_session_id(), Some("2025-03-09"));
    assert_eq!(
        app.selected_session(&sessions).map(|s| s.date),
        NaiveDate::from_ymd_opt(2025, 3, 9)
    );

    assert!(app.open_session("1999-01-01", &sessions).is_err());
    assert!(app.open_last_night(&[]).is_err());
}

#[test]
fn test_rename() {
    let mut app = AppState::new();
    assert!(app.rename("  Аня  "));
    assert_eq!(app.username(), "Аня");
    assert!(!app.rename("   "));
    assert_eq!(app.username(), "Аня");
}

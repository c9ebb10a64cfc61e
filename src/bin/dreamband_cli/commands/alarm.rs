// ABOUTME: Alarm command - builds an alarm through the setup wheels and prints its wake window
// ABOUTME: Drives the hour and minute pickers the way the setup screen does
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use anyhow::Context;
use chrono::Timelike;
use dreamband::alarm::AlarmSetup;
use dreamband::app::AppState;
use dreamband_core::models::Alarm;

use crate::helpers::display::{display_wake_window, print_json};

/// Set an alarm for `time` with a `window`-minute smart wake window
pub fn run(time: &str, window: u32, json: bool) -> anyhow::Result<()> {
    let time = Alarm::parse_time(time)?;
    let setup = AlarmSetup::at(time.hour(), time.minute()).context("positioning alarm wheels")?;
    let mut alarm = setup.save()?;
    alarm.window = window;

    let mut app = AppState::new();
    app.save_alarm(alarm.clone());

    if json {
        return print_json(&serde_json::json!({
            "alarm": alarm,
            "wakeWindow": app.alarm_window_label(),
        }));
    }
    display_wake_window(&alarm.time_label(), alarm.window, &alarm.wake_window());
    Ok(())
}

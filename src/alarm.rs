// ABOUTME: Alarm setup flow pairing an hour wheel and a minute wheel
// ABOUTME: Builds the saved Alarm and the "wake between" preview shown before saving
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use chrono::{Duration, NaiveTime};
use dreamband_core::constants::alarm;
use dreamband_core::errors::{AppError, AppResult};
use dreamband_core::models::{Alarm, WakeWindow};
use tracing::info;

use crate::picker::WheelPicker;

/// Hour and minute wheels of the alarm setup screen
#[derive(Debug, Clone)]
pub struct AlarmSetup {
    hour: WheelPicker,
    minute: WheelPicker,
}

impl AlarmSetup {
    /// Setup preselected at 07:00
    ///
    /// # Errors
    ///
    /// Returns an error only if the default time were outside the wheel ranges
    pub fn new() -> AppResult<Self> {
        Self::at(alarm::DEFAULT_HOUR, alarm::DEFAULT_MINUTE)
    }

    /// Setup preselected at `hour:minute`
    ///
    /// # Errors
    ///
    /// Returns an error if the hour is not in 0..=23 or the minute not in 0..=59
    pub fn at(hour: u32, minute: u32) -> AppResult<Self> {
        Ok(Self {
            hour: WheelPicker::inclusive(0, 23, to_wheel_value(hour)?)?,
            minute: WheelPicker::inclusive(0, 59, to_wheel_value(minute)?)?,
        })
    }

    /// Hour wheel
    pub fn hour_picker(&mut self) -> &mut WheelPicker {
        &mut self.hour
    }

    /// Minute wheel
    pub fn minute_picker(&mut self) -> &mut WheelPicker {
        &mut self.minute
    }

    /// Currently selected wall-clock time
    ///
    /// # Errors
    ///
    /// Returns an error if the wheels hold an impossible time
    pub fn time(&self) -> AppResult<NaiveTime> {
        let hour = u32::try_from(self.hour.selected_value())
            .map_err(|e| AppError::out_of_range("hour must be non-negative").with_source(e))?;
        let minute = u32::try_from(self.minute.selected_value())
            .map_err(|e| AppError::out_of_range("minute must be non-negative").with_source(e))?;
        NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            AppError::out_of_range(format!("{hour:02}:{minute:02} is not a valid time"))
        })
    }

    /// "Wake between" preview: the 30 minutes ending at the selected time
    ///
    /// This differs from [`Alarm::wake_window`], which is centred on the time.
    ///
    /// # Errors
    ///
    /// Returns an error if the wheels hold an impossible time
    pub fn preview_window(&self) -> AppResult<WakeWindow> {
        let end = self.time()?;
        let window = Duration::minutes(i64::from(alarm::DEFAULT_WINDOW_MINUTES));
        let (start, _) = end.overflowing_sub_signed(window);
        Ok(WakeWindow { start, end })
    }

    /// Build the alarm for the selected time
    ///
    /// # Errors
    ///
    /// Returns an error if the wheels hold an impossible time
    pub fn save(&self) -> AppResult<Alarm> {
        let time = self.time()?;
        let alarm = Alarm {
            time,
            window: alarm::DEFAULT_WINDOW_MINUTES,
            sound: alarm::DEFAULT_SOUND.to_owned(),
            vibrate_phone: true,
            vibrate_bracelet: true,
        };
        info!(time = %alarm.time_label(), window = alarm.window, "Alarm saved");
        Ok(alarm)
    }
}

fn to_wheel_value(value: u32) -> AppResult<i32> {
    i32::try_from(value)
        .map_err(|e| AppError::out_of_range(format!("{value} does not fit a wheel")).with_source(e))
}

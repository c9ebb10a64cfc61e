// ABOUTME: Alarm model and smart wake window computation
// ABOUTME: Times are HH:MM wall-clock values; windows wrap around midnight
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use std::fmt;

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{AppError, AppResult};

const TIME_FORMAT: &str = "%H:%M";

/// Alarm created by the setup flow and held for the rest of the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alarm {
    /// Wake time, serialized as `"HH:MM"`
    #[serde(serialize_with = "serialize_hhmm", deserialize_with = "deserialize_hhmm")]
    pub time: NaiveTime,
    /// Width of the smart wake window (minutes)
    pub window: u32,
    /// Alarm sound identifier
    pub sound: String,
    /// Vibrate the phone when the alarm fires
    pub vibrate_phone: bool,
    /// Vibrate the bracelet when the alarm fires
    pub vibrate_bracelet: bool,
}

impl Alarm {
    /// Create an alarm for `hour:minute`
    ///
    /// # Errors
    ///
    /// Returns an error if the hour or minute is out of range
    pub fn new(hour: u32, minute: u32, window: u32, sound: impl Into<String>) -> AppResult<Self> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            AppError::out_of_range(format!("{hour:02}:{minute:02} is not a valid time"))
        })?;
        Ok(Self {
            time,
            window,
            sound: sound.into(),
            vibrate_phone: true,
            vibrate_bracelet: true,
        })
    }

    /// Parse an `"HH:MM"` string
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid `HH:MM` time
    pub fn parse_time(value: &str) -> AppResult<NaiveTime> {
        NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|e| {
            AppError::invalid_input(format!("invalid alarm time '{value}'")).with_source(e)
        })
    }

    /// Wake time as `"HH:MM"`
    #[must_use]
    pub fn time_label(&self) -> String {
        format_hhmm(self.time)
    }

    /// Smart wake window centred on the alarm time: `[time - window/2, time + window/2]`
    #[must_use]
    pub fn wake_window(&self) -> WakeWindow {
        let half = Duration::seconds(i64::from(self.window) * 30);
        let (start, _) = self.time.overflowing_sub_signed(half);
        let (end, _) = self.time.overflowing_add_signed(half);
        WakeWindow { start, end }
    }
}

/// Closed wall-clock interval in which the smart alarm may fire
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WakeWindow {
    /// Earliest wake time
    pub start: NaiveTime,
    /// Latest wake time
    pub end: NaiveTime,
}

impl WakeWindow {
    /// Start as `"HH:MM"`
    #[must_use]
    pub fn start_label(&self) -> String {
        format_hhmm(self.start)
    }

    /// End as `"HH:MM"`
    #[must_use]
    pub fn end_label(&self) -> String {
        format_hhmm(self.end)
    }

    /// Whether the window crosses midnight
    #[must_use]
    pub fn wraps_midnight(&self) -> bool {
        self.end < self.start
    }
}

impl fmt::Display for WakeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start_label(), self.end_label())
    }
}

/// Format a time as zero-padded `"HH:MM"`, dropping seconds
#[must_use]
pub fn format_hhmm(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

fn serialize_hhmm<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_hhmm(*time))
}

fn deserialize_hhmm<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    NaiveTime::parse_from_str(&raw, TIME_FORMAT).map_err(serde::de::Error::custom)
}

// ABOUTME: Persisted user settings with typed option sets and a write-through manager
// ABOUTME: Missing fields take defaults; an unreadable blob falls back to defaults with a warning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

//! # Settings
//!
//! The whole settings object is serialized as one JSON blob under
//! [`STORAGE_KEY`](dreamband_core::constants::settings::STORAGE_KEY). Every
//! update writes the full blob back.

/// Key-value stores
pub mod store;

use std::fmt;
use std::str::FromStr;

use dreamband_core::constants::settings::STORAGE_KEY;
use dreamband_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::simulation::NoiseKind;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Minute options offered by segmented controls
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinuteChoice {
    /// 15 minutes
    #[serde(rename = "15 мин")]
    Fifteen,
    /// 30 minutes
    #[serde(rename = "30 мин")]
    Thirty,
    /// 45 minutes
    #[serde(rename = "45 мин")]
    FortyFive,
}

impl MinuteChoice {
    /// Every option, in display order
    pub const ALL: [Self; 3] = [Self::Fifteen, Self::Thirty, Self::FortyFive];

    /// Length in minutes
    #[must_use]
    pub const fn minutes(self) -> u32 {
        match self {
            Self::Fifteen => 15,
            Self::Thirty => 30,
            Self::FortyFive => 45,
        }
    }

    /// Stored label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fifteen => "15 мин",
            Self::Thirty => "30 мин",
            Self::FortyFive => "45 мин",
        }
    }
}

impl FromStr for MinuteChoice {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label() == trimmed || c.minutes().to_string() == trimmed)
            .ok_or_else(|| AppError::invalid_input(format!("unknown minute option '{s}'")))
    }
}

/// Bracelet vibration strength
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VibrationIntensity {
    /// Weak
    #[serde(rename = "Низкая")]
    Low,
    /// Default
    #[serde(rename = "Средняя")]
    Medium,
    /// Strong
    #[serde(rename = "Высокая")]
    High,
}

impl VibrationIntensity {
    /// Stored label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Низкая",
            Self::Medium => "Средняя",
            Self::High => "Высокая",
        }
    }
}

impl FromStr for VibrationIntensity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "низкая" | "low" => Ok(Self::Low),
            "средняя" | "medium" => Ok(Self::Medium),
            "высокая" | "high" => Ok(Self::High),
            _ => Err(AppError::invalid_input(format!(
                "unknown vibration intensity '{s}'"
            ))),
        }
    }
}

/// Alarm ringtone
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlarmSound {
    /// "Радар"
    Radar,
    /// "Кристаллы"
    Crystals,
    /// "Волны"
    Waves,
}

impl AlarmSound {
    /// Identifier stored in settings
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Radar => "radar",
            Self::Crystals => "crystals",
            Self::Waves => "waves",
        }
    }

    /// Display name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Radar => "Радар",
            Self::Crystals => "Кристаллы",
            Self::Waves => "Волны",
        }
    }
}

impl FromStr for AlarmSound {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "radar" => Ok(Self::Radar),
            "crystals" => Ok(Self::Crystals),
            "waves" => Ok(Self::Waves),
            other => Err(AppError::invalid_input(format!("unknown alarm sound '{other}'"))),
        }
    }
}

/// Ambient sound played while falling asleep
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmbientSound {
    /// Silence
    #[serde(rename = "none")]
    Off,
    /// Filtered rain noise
    #[serde(rename = "rain")]
    Rain,
    /// Uniform white noise
    #[serde(rename = "white-noise")]
    WhiteNoise,
    /// Low-passed ocean noise
    #[serde(rename = "ocean")]
    Ocean,
}

impl AmbientSound {
    /// Every option, in display order
    pub const ALL: [Self; 4] = [Self::Off, Self::Rain, Self::WhiteNoise, Self::Ocean];

    /// Identifier stored in settings
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Off => "none",
            Self::Rain => "rain",
            Self::WhiteNoise => "white-noise",
            Self::Ocean => "ocean",
        }
    }

    /// Display name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Off => "Отключено",
            Self::Rain => "Шум дождя",
            Self::WhiteNoise => "Белый шум",
            Self::Ocean => "Волны океана",
        }
    }

    /// Generator to synthesize, `None` for silence
    #[must_use]
    pub const fn noise_kind(self) -> Option<NoiseKind> {
        match self {
            Self::Off => None,
            Self::Rain => Some(NoiseKind::Rain),
            Self::WhiteNoise => Some(NoiseKind::White),
            Self::Ocean => Some(NoiseKind::Ocean),
        }
    }
}

impl fmt::Display for AmbientSound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AmbientSound {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|sound| sound.id() == trimmed)
            .ok_or_else(|| AppError::invalid_input(format!("unknown ambient sound '{s}'")))
    }
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Smart wake window
    pub wake_up_window: MinuteChoice,
    /// Alarm ringtone
    pub alarm_sound: AlarmSound,
    /// Vibrate the phone on alarm
    pub phone_vibration: bool,
    /// Vibrate the bracelet on alarm
    pub bracelet_vibration: bool,
    /// Ambient sound auto-off timer label
    pub sound_timer: String,
    /// Smart alarm on weekends
    pub smart_weekends: bool,
    /// Smart bedtime reminder
    pub smart_reminder: bool,
    /// Bedtime reminder
    pub sleep_reminder: bool,
    /// Bedtime reminder lead time
    pub reminder_time: MinuteChoice,
    /// Ambient sound selection
    pub selected_sound: AmbientSound,
    /// Bracelet vibration strength
    pub vibration_intensity: VibrationIntensity,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            wake_up_window: MinuteChoice::Thirty,
            alarm_sound: AlarmSound::Radar,
            phone_vibration: true,
            bracelet_vibration: true,
            sound_timer: "30 мин".to_owned(),
            smart_weekends: false,
            smart_reminder: true,
            sleep_reminder: true,
            reminder_time: MinuteChoice::Thirty,
            selected_sound: AmbientSound::Off,
            vibration_intensity: VibrationIntensity::Medium,
        }
    }
}

impl AppSettings {
    /// Parse a stored blob; absent fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the blob is not a valid settings object
    pub fn from_json(raw: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Apply one field change
    pub fn apply(&mut self, update: SettingUpdate) {
        match update {
            SettingUpdate::WakeUpWindow(v) => self.wake_up_window = v,
            SettingUpdate::AlarmSound(v) => self.alarm_sound = v,
            SettingUpdate::PhoneVibration(v) => self.phone_vibration = v,
            SettingUpdate::BraceletVibration(v) => self.bracelet_vibration = v,
            SettingUpdate::SoundTimer(v) => self.sound_timer = v,
            SettingUpdate::SmartWeekends(v) => self.smart_weekends = v,
            SettingUpdate::SmartReminder(v) => self.smart_reminder = v,
            SettingUpdate::SleepReminder(v) => self.sleep_reminder = v,
            SettingUpdate::ReminderTime(v) => self.reminder_time = v,
            SettingUpdate::SelectedSound(v) => self.selected_sound = v,
            SettingUpdate::VibrationIntensity(v) => self.vibration_intensity = v,
        }
    }
}

/// A change to exactly one settings field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingUpdate {
    /// `wakeUpWindow`
    WakeUpWindow(MinuteChoice),
    /// `alarmSound`
    AlarmSound(AlarmSound),
    /// `phoneVibration`
    PhoneVibration(bool),
    /// `braceletVibration`
    BraceletVibration(bool),
    /// `soundTimer`
    SoundTimer(String),
    /// `smartWeekends`
    SmartWeekends(bool),
    /// `smartReminder`
    SmartReminder(bool),
    /// `sleepReminder`
    SleepReminder(bool),
    /// `reminderTime`
    ReminderTime(MinuteChoice),
    /// `selectedSound`
    SelectedSound(AmbientSound),
    /// `vibrationIntensity`
    VibrationIntensity(VibrationIntensity),
}

impl SettingUpdate {
    /// Every stored field name
    pub const KEYS: [&'static str; 11] = [
        "wakeUpWindow",
        "alarmSound",
        "phoneVibration",
        "braceletVibration",
        "soundTimer",
        "smartWeekends",
        "smartReminder",
        "sleepReminder",
        "reminderTime",
        "selectedSound",
        "vibrationIntensity",
    ];

    /// Build an update from a stored field name and a textual value
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown key or a value the field cannot hold
    pub fn parse(key: &str, value: &str) -> AppResult<Self> {
        Ok(match key {
            "wakeUpWindow" => Self::WakeUpWindow(value.parse()?),
            "alarmSound" => Self::AlarmSound(value.parse()?),
            "phoneVibration" => Self::PhoneVibration(parse_flag(key, value)?),
            "braceletVibration" => Self::BraceletVibration(parse_flag(key, value)?),
            "soundTimer" => Self::SoundTimer(value.to_owned()),
            "smartWeekends" => Self::SmartWeekends(parse_flag(key, value)?),
            "smartReminder" => Self::SmartReminder(parse_flag(key, value)?),
            "sleepReminder" => Self::SleepReminder(parse_flag(key, value)?),
            "reminderTime" => Self::ReminderTime(value.parse()?),
            "selectedSound" => Self::SelectedSound(value.parse()?),
            "vibrationIntensity" => Self::VibrationIntensity(value.parse()?),
            other => return Err(AppError::not_found(format!("setting '{other}'"))),
        })
    }

    /// Stored field name
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::WakeUpWindow(_) => "wakeUpWindow",
            Self::AlarmSound(_) => "alarmSound",
            Self::PhoneVibration(_) => "phoneVibration",
            Self::BraceletVibration(_) => "braceletVibration",
            Self::SoundTimer(_) => "soundTimer",
            Self::SmartWeekends(_) => "smartWeekends",
            Self::SmartReminder(_) => "smartReminder",
            Self::SleepReminder(_) => "sleepReminder",
            Self::ReminderTime(_) => "reminderTime",
            Self::SelectedSound(_) => "selectedSound",
            Self::VibrationIntensity(_) => "vibrationIntensity",
        }
    }
}

fn parse_flag(key: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(AppError::invalid_input(format!(
            "{key} expects true or false, got '{value}'"
        ))),
    }
}

/// Settings held in memory and written through to a store
#[derive(Debug)]
pub struct SettingsManager<S> {
    store: S,
    settings: AppSettings,
}

impl<S: KeyValueStore> SettingsManager<S> {
    /// Load settings from `store`
    ///
    /// A missing blob yields defaults. An unreadable or malformed blob also
    /// yields defaults and is logged; it is replaced on the next update.
    pub fn load(store: S) -> Self {
        let settings = match store.get(STORAGE_KEY) {
            Ok(Some(raw)) => AppSettings::from_json(&raw).unwrap_or_else(|e| {
                warn!(error = %e, key = STORAGE_KEY, "Stored settings unreadable, using defaults");
                AppSettings::default()
            }),
            Ok(None) => AppSettings::default(),
            Err(e) => {
                warn!(error = %e, key = STORAGE_KEY, "Settings store unavailable, using defaults");
                AppSettings::default()
            }
        };
        Self { store, settings }
    }

    /// Current settings
    #[must_use]
    pub const fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Apply `update` and persist the full settings object
    ///
    /// The in-memory value changes even if persisting fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write
    pub fn update(&mut self, update: SettingUpdate) -> AppResult<()> {
        let key = update.key();
        self.settings.apply(update);
        debug!(setting = key, "Setting updated");
        self.persist()
    }

    /// Restore defaults and persist them
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write
    pub fn reset(&mut self) -> AppResult<()> {
        self.settings = AppSettings::default();
        self.persist()
    }

    /// Give back the underlying store
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) -> AppResult<()> {
        let blob = serde_json::to_string(&self.settings)?;
        self.store.set(STORAGE_KEY, blob).inspect_err(|e| {
            warn!(error = %e, key = STORAGE_KEY, "Failed to persist settings");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_serialize_with_stored_labels() {
        let json = serde_json::to_value(AppSettings::default()).unwrap();
        assert_eq!(json["wakeUpWindow"], "30 мин");
        assert_eq!(json["selectedSound"], "none");
        assert_eq!(json["vibrationIntensity"], "Средняя");
        assert_eq!(json["alarmSound"], "radar");
    }

    #[test]
    fn test_partial_blob_merges_over_defaults() {
        let settings = AppSettings::from_json(r#"{"smartWeekends":true}"#).unwrap();
        assert!(settings.smart_weekends);
        assert_eq!(settings.reminder_time, MinuteChoice::Thirty);
    }

    #[test]
    fn test_parse_update_keys() {
        for key in SettingUpdate::KEYS {
            let value = match key {
                "wakeUpWindow" | "reminderTime" => "15 мин",
                "alarmSound" => "waves",
                "soundTimer" => "1 час",
                "selectedSound" => "ocean",
                "vibrationIntensity" => "Высокая",
                _ => "false",
            };
            let update = SettingUpdate::parse(key, value).unwrap();
            assert_eq!(update.key(), key);
        }
        assert!(SettingUpdate::parse("volume", "3").is_err());
        assert!(SettingUpdate::parse("smartWeekends", "maybe").is_err());
    }
}

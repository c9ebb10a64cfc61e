// ABOUTME: Engine-wide constants for timers, phase timeline, picker geometry, and history
// ABOUTME: Values mirror the companion app's fixed cadence and presentation defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

//! # Constants Module
//!
//! Hardcoded defaults. Anything a deployment may want to tune is also exposed
//! through the engine's environment configuration, which falls back to these.

/// Live tracking session cadence
pub mod session {
    /// Sensor sample tick period (milliseconds)
    pub const SAMPLE_INTERVAL_MS: u64 = 1500;
    /// Elapsed-time clock tick period (milliseconds)
    pub const CLOCK_INTERVAL_MS: u64 = 1000;
    /// Transmission indicator toggle period (milliseconds)
    pub const TRANSMIT_INTERVAL_MS: u64 = 3000;
    /// Maximum number of heart-rate readings retained for the graph
    pub const HEART_RATE_HISTORY_LEN: usize = 30;

    /// Heart rate shown before the first sample tick
    pub const INITIAL_HEART_RATE: u32 = 72;
    /// HRV shown before the first sample tick
    pub const INITIAL_HRV: u32 = 45;
    /// `SpO2` shown before the first sample tick
    pub const INITIAL_SPO2: u32 = 98;
    /// Skin temperature shown before the first sample tick
    pub const INITIAL_TEMPERATURE_C: f64 = 36.4;
    /// Movement level shown before the first sample tick
    pub const INITIAL_MOVEMENT: u32 = 15;
}

/// Default live phase timeline (phase, dwell in milliseconds)
pub mod timeline {
    /// Dwell of the initial falling-asleep phase
    pub const FALLING_ASLEEP_DWELL_MS: u64 = 8000;
    /// Dwell of the first light phase
    pub const LIGHT_DWELL_MS: u64 = 12_000;
    /// Dwell of the deep phase
    pub const DEEP_DWELL_MS: u64 = 15_000;
    /// Dwell of the REM phase
    pub const REM_DWELL_MS: u64 = 10_000;
    /// Dwell of the closing light phase
    pub const LIGHT_RETURN_DWELL_MS: u64 = 10_000;
}

/// Synthetic sensor value bounds shared by every phase
pub mod sensor {
    /// Lower bound of the HRV draw (ms)
    pub const HRV_MIN: f64 = 35.0;
    /// Upper bound of the HRV draw (ms)
    pub const HRV_MAX: f64 = 60.0;
    /// Lower bound of the `SpO2` draw (%)
    pub const SPO2_MIN: f64 = 96.0;
    /// Upper bound of the `SpO2` draw (%)
    pub const SPO2_MAX: f64 = 99.0;
    /// Lower bound of the temperature draw (°C)
    pub const TEMPERATURE_MIN_C: f64 = 36.2;
    /// Upper bound of the temperature draw (°C)
    pub const TEMPERATURE_MAX_C: f64 = 36.6;
    /// Width of the uniform movement jitter added to the phase baseline
    pub const MOVEMENT_JITTER: f64 = 20.0;
    /// Number of bars in the movement meter
    pub const MOVEMENT_BARS: u32 = 8;
}

/// Inertial wheel picker geometry and physics
pub mod picker {
    /// Visible viewport height (px)
    pub const VIEWPORT_EXTENT: f64 = 192.0;
    /// Height of one item (px)
    pub const ITEM_EXTENT: f64 = 64.0;
    /// Number of copies of the value range laid out end to end
    pub const RANGE_COPIES: usize = 3;
    /// Release velocity projection factor (seconds)
    pub const VELOCITY_PROJECTION: f64 = 0.3;
    /// Spring stiffness
    pub const SPRING_STIFFNESS: f64 = 400.0;
    /// Spring damping
    pub const SPRING_DAMPING: f64 = 40.0;
    /// Spring mass
    pub const SPRING_MASS: f64 = 1.0;
    /// Distance from target under which the spring may come to rest (px)
    pub const REST_DELTA: f64 = 0.5;
    /// Speed under which the spring may come to rest (px/s)
    pub const REST_SPEED: f64 = 2.0;
    /// Maximum integrator sub-step (seconds)
    pub const MAX_SUBSTEP_SECS: f64 = 0.001;
    /// Items rendered above the first visible one
    pub const OVERSCAN_BEFORE: i64 = 5;
    /// Total rendered window size
    pub const RENDER_WINDOW: i64 = 15;
    /// Smallest scale applied to a fully faded item
    pub const MIN_ITEM_SCALE: f64 = 0.7;
    /// Divisor applied to the viewport to get the fade-out distance
    pub const FADE_DISTANCE_DIVISOR: f64 = 1.5;
}

/// Alarm defaults
pub mod alarm {
    /// Hour preselected by the alarm setup flow
    pub const DEFAULT_HOUR: u32 = 7;
    /// Minute preselected by the alarm setup flow
    pub const DEFAULT_MINUTE: u32 = 0;
    /// Smart wake window (minutes)
    pub const DEFAULT_WINDOW_MINUTES: u32 = 30;
    /// Alarm sound identifier used by the setup flow
    pub const DEFAULT_SOUND: &str = "default";
}

/// Synthetic sleep history generation
pub mod history {
    /// Number of past nights generated
    pub const LOOKBACK_DAYS: u32 = 15;
    /// Shortest total sleep time (minutes)
    pub const MIN_TOTAL_SLEEP_MINUTES: u32 = 420;
    /// Width of the total sleep time draw (minutes)
    pub const TOTAL_SLEEP_SPREAD_MINUTES: u32 = 120;
    /// Minutes between heart-rate readings
    pub const HEART_RATE_STEP_MINUTES: u32 = 10;
    /// Lowest generated heart rate
    pub const MIN_HEART_RATE: u32 = 50;
    /// Width of the heart-rate draw
    pub const HEART_RATE_SPREAD: u32 = 20;
    /// Lowest quality score
    pub const MIN_QUALITY_SCORE: u32 = 60;
    /// Width of the quality score draw
    pub const QUALITY_SPREAD: u32 = 40;
    /// Shortest time to fall asleep (minutes)
    pub const MIN_TIME_TO_FALL_ASLEEP: u32 = 5;
    /// Width of the time-to-fall-asleep draw (minutes)
    pub const TIME_TO_FALL_ASLEEP_SPREAD: u32 = 25;
}

/// Ambient noise synthesis
pub mod audio {
    /// Default output sample rate (Hz)
    pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
    /// Length of a looping buffer (seconds)
    pub const LOOP_SECONDS: u32 = 2;
    /// Playback gain applied to ambient buffers
    pub const AMBIENT_GAIN: f32 = 0.01;
}

/// Persisted settings
pub mod settings {
    /// Key under which the settings blob is stored
    pub const STORAGE_KEY: &str = "app-settings";
}

/// Simulated bracelet link
pub mod device {
    /// Time a connect or disconnect takes (milliseconds)
    pub const TOGGLE_DELAY_MS: u64 = 1500;
    /// Battery level reported by the simulated bracelet (%)
    pub const BATTERY_LEVEL: u8 = 92;
}

/// App shell
pub mod app {
    /// How long a notification stays visible (milliseconds)
    pub const NOTIFICATION_TTL_MS: u64 = 2000;
    /// Username shown before the user edits it
    pub const DEFAULT_USERNAME: &str = "Пользователь";
    /// Message shown when sleep is started without an alarm
    pub const ALARM_REQUIRED_MESSAGE: &str = "Пожалуйста, сначала установите будильник";
}

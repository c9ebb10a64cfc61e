// ABOUTME: App shell state: page navigation, onboarding, saved alarm, notifications, username
// ABOUTME: Plain state transitions with caller-supplied instants so expiry is testable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use dreamband_core::constants::app;
use dreamband_core::errors::{AppError, AppResult};
use dreamband_core::models::{Alarm, SleepSession};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Every page of the app
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Page {
    /// First-run introduction
    Onboarding,
    /// Dashboard tab
    Home,
    /// History calendar tab
    Stats,
    /// Profile and bracelet tab
    Profile,
    /// Settings tab
    Settings,
    /// Articles tab
    Learn,
    /// Alarm wheel sheet
    AlarmSetup,
    /// One night's statistics
    StatsDetail,
}

impl Page {
    /// Whether this page is a bottom-navigation tab
    #[must_use]
    pub const fn is_tab(self) -> bool {
        matches!(
            self,
            Self::Home | Self::Stats | Self::Profile | Self::Settings | Self::Learn
        )
    }

    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Onboarding => "ONBOARDING",
            Self::Home => "HOME",
            Self::Stats => "STATS",
            Self::Profile => "PROFILE",
            Self::Settings => "SETTINGS",
            Self::Learn => "LEARN",
            Self::AlarmSetup => "ALARM_SETUP",
            Self::StatsDetail => "STATS_DETAIL",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_ascii_uppercase()))
            .map_err(|_| AppError::invalid_input(format!("unknown page '{s}'")))
    }
}

/// Transient message banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Monotonic id; a newer banner replaces an older one
    pub id: u64,
    /// Text
    pub message: String,
    shown_at: Instant,
}

impl Notification {
    /// Whether the banner is still visible at `now`
    #[must_use]
    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at)
            < Duration::from_millis(app::NOTIFICATION_TTL_MS)
    }
}

/// Top-level UI state
#[derive(Debug, Clone)]
pub struct AppState {
    page: Page,
    previous_page: Page,
    tab: Page,
    onboarding: bool,
    alarm: Option<Alarm>,
    selected_session: Option<String>,
    sleeping: bool,
    notification: Option<Notification>,
    next_notification_id: u64,
    username: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            page: Page::Onboarding,
            previous_page: Page::Home,
            tab: Page::Home,
            onboarding: true,
            alarm: None,
            selected_session: None,
            sleeping: false,
            notification: None,
            next_notification_id: 0,
            username: app::DEFAULT_USERNAME.to_owned(),
        }
    }
}

impl AppState {
    /// Fresh state on the onboarding page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Page being shown
    #[must_use]
    pub const fn page(&self) -> Page {
        self.page
    }

    /// Page shown before the current one
    #[must_use]
    pub const fn previous_page(&self) -> Page {
        self.previous_page
    }

    /// Highlighted bottom-navigation tab
    #[must_use]
    pub const fn active_tab(&self) -> Page {
        self.tab
    }

    /// Whether onboarding is still showing
    #[must_use]
    pub const fn is_onboarding(&self) -> bool {
        self.onboarding
    }

    /// Saved alarm
    #[must_use]
    pub const fn alarm(&self) -> Option<&Alarm> {
        self.alarm.as_ref()
    }

    /// Whether the sleep screen is up
    #[must_use]
    pub const fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    /// Display name
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Id of the night opened in the detail view
    #[must_use]
    pub fn selected_session_id(&self) -> Option<&str> {
        self.selected_session.as_deref()
    }

    /// Bottom navigation is hidden during onboarding and on sheet pages
    #[must_use]
    pub fn shows_bottom_nav(&self) -> bool {
        !self.onboarding && !matches!(self.page, Page::AlarmSetup | Page::StatsDetail)
    }

    /// Navigate to `page`, remembering where we came from
    pub fn set_page(&mut self, page: Page) {
        self.previous_page = self.page;
        if page.is_tab() {
            self.tab = page;
        }
        debug!(from = %self.page, to = %page, "Page changed");
        self.page = page;
    }

    /// Leave onboarding for the home tab
    pub fn complete_onboarding(&mut self) {
        self.onboarding = false;
        self.set_page(Page::Home);
    }

    /// Keep `alarm` for the session and return home
    pub fn save_alarm(&mut self, alarm: Alarm) {
        info!(time = %alarm.time_label(), "Alarm set");
        self.alarm = Some(alarm);
        self.set_page(Page::Home);
    }

    /// Smart wake window of the saved alarm, e.g. `"06:45 - 07:15"`
    #[must_use]
    pub fn alarm_window_label(&self) -> Option<String> {
        self.alarm.as_ref().map(|a| a.wake_window().to_string())
    }

    /// Enter the sleep screen; without an alarm, show a reminder instead
    ///
    /// Returns whether sleep started.
    pub fn start_sleep(&mut self, now: Instant) -> bool {
        if self.alarm.is_some() {
            self.sleeping = true;
            info!("Sleep started");
            true
        } else {
            self.show_notification(app::ALARM_REQUIRED_MESSAGE, now);
            false
        }
    }

    /// Leave the sleep screen
    pub fn wake_up(&mut self) {
        self.sleeping = false;
    }

    /// Show `message`, replacing any visible banner
    pub fn show_notification(&mut self, message: impl Into<String>, now: Instant) {
        self.next_notification_id += 1;
        self.notification = Some(Notification {
            id: self.next_notification_id,
            message: message.into(),
            shown_at: now,
        });
    }

    /// Banner visible at `now`; expired banners are dropped
    pub fn notification(&mut self, now: Instant) -> Option<&Notification> {
        if self.notification.as_ref().is_some_and(|n| !n.is_visible(now)) {
            self.notification = None;
        }
        self.notification.as_ref()
    }

    /// Dismiss the banner early
    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Rename the user; blank input keeps the current name
    ///
    /// Returns whether the name changed.
    pub fn rename(&mut self, input: &str) -> bool {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return false;
        }
        trimmed.clone_into(&mut self.username);
        true
    }

    /// Open the detail view for session `id`
    ///
    /// # Errors
    ///
    /// Returns a not-found error if `sessions` has no such id
    pub fn open_session(&mut self, id: &str, sessions: &[SleepSession]) -> AppResult<()> {
        if !sessions.iter().any(|s| s.id == id) {
            return Err(AppError::not_found(format!("sleep session {id}")));
        }
        self.selected_session = Some(id.to_owned());
        self.set_page(Page::StatsDetail);
        Ok(())
    }

    /// Open the most recent night from the home tab
    ///
    /// # Errors
    ///
    /// Returns a not-found error if there is no history
    pub fn open_last_night(&mut self, sessions: &[SleepSession]) -> AppResult<()> {
        let last = sessions
            .first()
            .ok_or_else(|| AppError::not_found("last night's sleep session"))?;
        let id = last.id.clone();
        self.open_session(&id, sessions)
    }

    /// The session opened in the detail view
    #[must_use]
    pub fn selected_session<'a>(&self, sessions: &'a [SleepSession]) -> Option<&'a SleepSession> {
        let id = self.selected_session.as_deref()?;
        sessions.iter().find(|s| s.id == id)
    }

    /// Return from the detail view to the page that opened it
    pub fn back(&mut self) {
        self.set_page(self.previous_page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_names_round_trip() {
        for page in [Page::Onboarding, Page::AlarmSetup, Page::StatsDetail, Page::Learn] {
            assert_eq!(page.as_str().parse::<Page>().unwrap(), page);
        }
        assert!("NOWHERE".parse::<Page>().is_err());
    }

    #[test]
    fn test_blank_rename_ignored() {
        let mut state = AppState::new();
        assert!(!state.rename("   "));
        assert_eq!(state.username(), "Пользователь");
        assert!(state.rename("  Аня "));
        assert_eq!(state.username(), "Аня");
    }
}

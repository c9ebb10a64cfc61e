// ABOUTME: Simulated bracelet link with a timed connect/disconnect toggle
// ABOUTME: Status is shared behind an async RwLock so it can be read while a toggle is pending
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use std::sync::Arc;
use std::time::Duration;

use dreamband_core::constants::device;
use dreamband_core::errors::{AppError, AppResult, ErrorCode};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

/// Observable link state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkStatus {
    /// Bracelet is connected
    pub connected: bool,
    /// A toggle is in progress
    pub connecting: bool,
    /// Reported battery charge (%)
    pub battery_level: u8,
}

impl LinkStatus {
    /// Status line for the profile screen
    #[must_use]
    pub const fn status_text(&self) -> &'static str {
        match (self.connecting, self.connected) {
            (true, true) => "Отключение...",
            (true, false) => "Подключение...",
            (false, true) => "Подключено",
            (false, false) => "Не подключено",
        }
    }
}

/// Simulated bracelet connection
#[derive(Debug, Clone)]
pub struct DeviceLink {
    status: Arc<RwLock<LinkStatus>>,
    toggle_delay: Duration,
}

impl Default for DeviceLink {
    fn default() -> Self {
        Self::new(Duration::from_millis(device::TOGGLE_DELAY_MS))
    }
}

impl DeviceLink {
    /// Connected link whose toggles take `toggle_delay`
    #[must_use]
    pub fn new(toggle_delay: Duration) -> Self {
        Self {
            status: Arc::new(RwLock::new(LinkStatus {
                connected: true,
                connecting: false,
                battery_level: device::BATTERY_LEVEL,
            })),
            toggle_delay,
        }
    }

    /// Current status
    pub async fn status(&self) -> LinkStatus {
        *self.status.read().await
    }

    /// Flip the connection after the toggle delay and return the new state
    ///
    /// # Errors
    ///
    /// Returns a `ResourceLocked` error if another toggle is still pending
    pub async fn toggle(&self) -> AppResult<bool> {
        {
            let mut status = self.status.write().await;
            if status.connecting {
                return Err(AppError::new(
                    ErrorCode::ResourceLocked,
                    "bracelet toggle already in progress",
                ));
            }
            status.connecting = true;
            info!(status = status.status_text(), "Bracelet link toggling");
        }

        // Detached: `connecting` clears even if this future is dropped
        let shared = Arc::clone(&self.status);
        let delay = self.toggle_delay;
        let flip = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut status = shared.write().await;
            status.connected = !status.connected;
            status.connecting = false;
            info!(connected = status.connected, "Bracelet link toggled");
            status.connected
        });
        flip.await
            .map_err(|e| AppError::internal("bracelet toggle task failed").with_source(e))
    }
}

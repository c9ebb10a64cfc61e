// ABOUTME: Tests for the simulated bracelet link
// ABOUTME: Uses paused tokio time to check toggle delay, status text, and overlapping toggles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::time::Duration;

use dreamband::device::DeviceLink;
use dreamband_core::errors::ErrorCode;
use tokio::time::{sleep, Instant};

#[tokio::test(start_paused = true)]
async fn test_initial_status() {
    let link = DeviceLink::default();
    let status = link.status().await;
    assert!(status.connected);
    assert!(!status.connecting);
    assert_eq!(status.battery_level, 92);
    assert_eq!(status.status_text(), "Подключено");
}

#[tokio::test(start_paused = true)]
async fn test_toggle_takes_delay() {
    let link = DeviceLink::default();
    let started = Instant::now();
    assert!(!link.toggle().await.unwrap());
    assert_eq!(started.elapsed(), Duration::from_millis(1500));

    let status = link.status().await;
    assert!(!status.connected);
    assert!(!status.connecting);
    assert_eq!(status.status_text(), "Не подключено");

    assert!(link.toggle().await.unwrap());
    assert!(link.status().await.connected);
}

#[tokio::test(start_paused = true)]
async fn test_status_while_toggling() {
    let link = DeviceLink::default();
    let background = link.clone();
    let pending = tokio::spawn(async move { background.toggle().await });

    sleep(Duration::from_millis(500)).await;
    let status = link.status().await;
    assert!(status.connecting);
    assert_eq!(status.status_text(), "Отключение...");

    let error = link.toggle().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceLocked);

    assert!(!pending.await.unwrap().unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_dropped_toggle_still_completes() {
    let link = DeviceLink::new(Duration::from_millis(100));
    let background = link.clone();
    let pending = tokio::spawn(async move { background.toggle().await });
    sleep(Duration::from_millis(10)).await;
    pending.abort();

    sleep(Duration::from_millis(200)).await;
    let status = link.status().await;
    assert!(!status.connecting);
    assert!(!status.connected);
}

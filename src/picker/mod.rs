// ABOUTME: Inertial wheel picker: spring physics, gesture state machine, and display helpers
// ABOUTME: Used by the alarm setup flow for hour and minute selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

/// Render window and per-item fade
pub mod presentation;
/// Damped spring integrator
pub mod spring;
/// Picker state machine
pub mod wheel;

pub use presentation::{item_label, item_opacity, item_scale, visible_window, WheelItemView};
pub use spring::{SpringConfig, SpringIntegrator};
pub use wheel::{PickerEvent, PickerPhase, WheelGeometry, WheelPicker};

// ABOUTME: Derived display properties of the wheel picker: render window, item fade, and scale
// ABOUTME: Pure functions of the current offset; nothing here feeds back into picker state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use std::ops::Range;

use dreamband_core::constants::picker;
use serde::Serialize;

use super::wheel::{WheelGeometry, WheelPicker};

/// One rendered wheel item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WheelItemView {
    /// Index in the tripled list
    pub index: usize,
    /// Displayed value
    pub value: i32,
    /// Two-digit label
    pub label: String,
    /// Top edge relative to the viewport
    pub top: f64,
    /// 0.0 (invisible) ..= 1.0 (centred)
    pub opacity: f64,
    /// `MIN_ITEM_SCALE` ..= 1.0
    pub scale: f64,
}

/// Indices to render for `offset`, as a half-open range within `0..extended_len`
#[must_use]
pub fn visible_window(geometry: &WheelGeometry, offset: f64, extended_len: usize) -> Range<usize> {
    let top = -offset + geometry.centering_offset();
    let first = (top / geometry.item_extent()).floor() as i64 - picker::OVERSCAN_BEFORE;
    let last = first + picker::RENDER_WINDOW;
    let max_index = extended_len.saturating_sub(1) as i64;
    let start = first.clamp(0, max_index) as usize;
    let end = last.clamp(0, max_index) as usize;
    start..end.max(start)
}

/// Squared linear fade by distance from the viewport centre
#[must_use]
pub fn item_opacity(geometry: &WheelGeometry, offset: f64, index: usize) -> f64 {
    let item_extent = geometry.item_extent();
    let centre = (index as f64).mul_add(item_extent, offset) + item_extent / 2.0;
    let distance = (geometry.viewport_extent() / 2.0 - centre).abs();
    let fade_distance = geometry.viewport_extent() / picker::FADE_DISTANCE_DIVISOR;
    let linear = (1.0 - distance / fade_distance).max(0.0);
    linear * linear
}

/// Scale interpolated linearly from `MIN_ITEM_SCALE` at opacity 0 to 1.0 at opacity 1
#[must_use]
pub fn item_scale(opacity: f64) -> f64 {
    (1.0 - picker::MIN_ITEM_SCALE).mul_add(opacity, picker::MIN_ITEM_SCALE)
}

/// Zero-padded two-digit label
#[must_use]
pub fn item_label(value: i32) -> String {
    format!("{value:02}")
}

impl WheelPicker {
    /// Items to render at the current offset
    #[must_use]
    pub fn visible_items(&self) -> Vec<WheelItemView> {
        let geometry = self.geometry();
        let offset = self.offset();
        visible_window(geometry, offset, self.extended_len())
            .map(|index| {
                let opacity = item_opacity(geometry, offset, index);
                let value = self.value_at(index);
                WheelItemView {
                    index,
                    value,
                    label: item_label(value),
                    top: (index as f64).mul_add(geometry.item_extent(), offset),
                    opacity,
                    scale: item_scale(opacity),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centred_item_is_fully_opaque() {
        let geometry = WheelGeometry::default();
        let offset = geometry.offset_for_index(31);
        assert!((item_opacity(&geometry, offset, 31) - 1.0).abs() < 1e-12);
        assert!((item_scale(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_far_items_fade_out() {
        let geometry = WheelGeometry::default();
        let offset = geometry.offset_for_index(31);
        // 128px = one fade distance away
        assert!(item_opacity(&geometry, offset, 33).abs() < 1e-12);
        assert!((item_scale(0.0) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_window_around_selection() {
        let geometry = WheelGeometry::default();
        let offset = geometry.offset_for_index(31);
        assert_eq!(visible_window(&geometry, offset, 72), 26..41);
        assert_eq!(visible_window(&geometry, geometry.offset_for_index(0), 72), 0..10);
    }

    #[test]
    fn test_labels_are_two_digits() {
        assert_eq!(item_label(7), "07");
        assert_eq!(item_label(45), "45");
    }
}

// ABOUTME: Tests for the wheel picker gesture and settle state machine
// ABOUTME: Covers snapping, wrap-around, settle cancellation, and the visible window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::time::Duration;

use dreamband::picker::{PickerEvent, PickerPhase, WheelPicker};
use dreamband_core::errors::PickerError;

const ITEM: f64 = 64.0;

fn minutes(value: i32) -> WheelPicker {
    WheelPicker::inclusive(0, 59, value).unwrap()
}

#[test]
fn test_snap_is_monotonic_in_offset_and_velocity() {
    let picker = minutes(0);
    let mut previous = 0;
    let mut offset = 200.0;
    while offset > -12_000.0 {
        let index = picker.snap_index(offset, 0.0);
        assert!(index >= previous, "offset {offset} snapped backwards");
        previous = index;
        offset -= 7.0;
    }

    let slow = picker.snap_index(-3000.0, 0.0);
    let fast = picker.snap_index(-3000.0, -1000.0);
    assert!(fast > slow);
}

#[test]
fn test_drag_release_settles_on_dragged_value() {
    let mut picker = minutes(0);
    picker.drag_by(-5.0 * ITEM);
    assert_eq!(picker.phase(), PickerPhase::Dragging);

    assert_eq!(picker.release(0.0), PickerEvent::Selected { value: 5, index: 65 });
    assert_eq!(picker.phase(), PickerPhase::Settling);

    let mut settled = None;
    for _ in 0..500 {
        if let Some(event) = picker.step(Duration::from_millis(16)) {
            settled = Some(event);
            break;
        }
    }
    assert_eq!(settled, Some(PickerEvent::Settled { value: 5, index: 65 }));
    assert_eq!(picker.phase(), PickerPhase::Idle);
    assert!((picker.offset() - picker.geometry().offset_for_index(65)).abs() < f64::EPSILON);
}

#[test]
fn test_release_at_rest_is_idempotent() {
    let mut picker = minutes(42);
    let before = picker.offset();
    for _ in 0..3 {
        picker.begin_drag();
        picker.release(0.0);
        assert_eq!(picker.run_to_rest(), 42);
    }
    assert!((picker.offset() - before).abs() < f64::EPSILON);
}

#[test]
fn test_settle_recentres_into_middle_copy() {
    let mut picker = minutes(58);
    picker.drag_by(-4.0 * ITEM);
    picker.release(0.0);
    let value = picker.run_to_rest();
    assert_eq!(value, 2);
    // 2 + 60 in the tripled list
    assert!((picker.offset() - picker.geometry().offset_for_index(62)).abs() < f64::EPSILON);
}

#[test]
fn test_selection_is_reported_before_settle_finishes() {
    let mut picker = minutes(10);
    picker.drag_by(-3.0 * ITEM);
    let PickerEvent::Selected { value, .. } = picker.release(0.0) else {
        panic!("release must report a selection");
    };
    assert_eq!(value, 13);
    assert_eq!(picker.selected_value(), 13);
    assert_eq!(picker.phase(), PickerPhase::Settling);
}

#[test]
fn test_flick_projects_further() {
    let mut picker = minutes(0);
    picker.drag_by(-ITEM);
    picker.release(-2000.0);
    // 600 px of projection is roughly nine items past the drag
    assert_eq!(picker.run_to_rest(), 10);
}

#[test]
fn test_new_drag_cancels_settle_in_place() {
    let mut picker = minutes(0);
    picker.drag_by(-2.0 * ITEM);
    picker.release(-1500.0);
    picker.step(Duration::from_millis(16));
    picker.step(Duration::from_millis(16));
    let mid_flight = picker.offset();

    picker.begin_drag();
    assert_eq!(picker.phase(), PickerPhase::Dragging);
    assert!((picker.offset() - mid_flight).abs() < f64::EPSILON);
    assert_eq!(picker.step(Duration::from_millis(16)), None);

    picker.release(0.0);
    let expected = picker.value_at(picker.snap_index(mid_flight, 0.0));
    assert_eq!(picker.run_to_rest(), expected);
}

#[test]
fn test_set_value_blocked_during_gesture() {
    let mut picker = minutes(0);
    picker.begin_drag();
    assert!(matches!(picker.set_value(30), Err(PickerError::GestureInFlight)));

    picker.release(0.0);
    picker.run_to_rest();
    picker.set_value(30).unwrap();
    assert_eq!(picker.selected_value(), 30);
    assert!(matches!(
        picker.set_value(75),
        Err(PickerError::ValueNotInRange { value: 75 })
    ));
}

#[test]
fn test_construction_errors() {
    assert!(matches!(WheelPicker::new(Vec::new(), 0), Err(PickerError::EmptyRange)));
    assert!(matches!(
        WheelPicker::inclusive(0, 23, 24),
        Err(PickerError::ValueNotInRange { value: 24 })
    ));
}

#[test]
fn test_custom_range_keeps_order() {
    let mut picker = WheelPicker::new(vec![5, 10, 15, 20], 15).unwrap();
    assert_eq!(picker.extended_len(), 12);
    picker.drag_by(-ITEM);
    picker.release(0.0);
    assert_eq!(picker.run_to_rest(), 20);
    picker.drag_by(-ITEM);
    picker.release(0.0);
    assert_eq!(picker.run_to_rest(), 5);
}

#[test]
fn test_visible_items_centre_on_selection() {
    let picker = WheelPicker::inclusive(0, 23, 7).unwrap();
    let items = picker.visible_items();
    assert_eq!(items.len(), 15);
    let centre = items.iter().find(|item| item.index == 31).unwrap();
    assert_eq!(centre.label, "07");
    assert!((centre.opacity - 1.0).abs() < 1e-9);
    assert!((centre.scale - 1.0).abs() < 1e-9);
    assert!(items.iter().all(|item| item.opacity <= centre.opacity));
}

#[test]
fn test_extreme_drags_stay_in_middle_band() {
    let mut picker = WheelPicker::inclusive(0, 23, 7).unwrap();
    for delta in [1e20, -1e20, f64::INFINITY, f64::NEG_INFINITY, f64::NAN, 1e6 * ITEM] {
        picker.drag_by(delta);
        let offset = picker.offset();
        assert!(offset.is_finite(), "drag by {delta} left offset {offset}");
        let index = picker.geometry().fractional_index(offset);
        assert!((12.0..60.0).contains(&index), "drag by {delta} left index {index}");
    }
    picker.release(0.0);
    assert!((0..24).contains(&picker.run_to_rest()));
}

#[test]
fn test_long_drag_wraps_to_same_value_as_short_drag() {
    let mut short = WheelPicker::inclusive(0, 23, 7).unwrap();
    short.drag_by(-3.0 * ITEM);
    short.release(0.0);

    let mut long = WheelPicker::inclusive(0, 23, 7).unwrap();
    long.drag_by(-(3.0 + 24.0 * 50.0) * ITEM);
    long.release(0.0);

    assert_eq!(short.run_to_rest(), 10);
    assert_eq!(long.run_to_rest(), 10);
}

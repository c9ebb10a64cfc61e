// ABOUTME: Inertial wheel picker over a cyclically tripled integer range
// ABOUTME: Maps drags to a continuous offset, snaps on release with velocity projection, and springs to rest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

//! Wheel picker state machine.
//!
//! ```text
//! Idle --begin_drag--> Dragging --release--> Settling --rest--> Idle
//!                         ^                     |
//!                         +-----begin_drag------+
//! ```
//!
//! The logical list is the value range laid out three times end to end. The
//! offset `y` is the position of the list's top edge relative to the
//! viewport; item `i` sits at `y + i * item_extent`. At rest the offset always
//! points at an item of the middle copy.

use std::time::Duration;

use dreamband_core::constants::picker;
use dreamband_core::errors::PickerError;
use tracing::debug;

use super::spring::{SpringConfig, SpringIntegrator};

/// Frame step used by [`WheelPicker::run_to_rest`]
const FRAME: Duration = Duration::from_millis(16);
/// Frames after which [`WheelPicker::run_to_rest`] snaps directly to the target
const MAX_SETTLE_FRAMES: usize = 2_000;

/// Viewport and item sizes
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WheelGeometry {
    viewport_extent: f64,
    item_extent: f64,
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self {
            viewport_extent: picker::VIEWPORT_EXTENT,
            item_extent: picker::ITEM_EXTENT,
        }
    }
}

impl WheelGeometry {
    /// Validate and build a geometry
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidGeometry`] if either extent is not a
    /// positive finite number
    pub fn new(viewport_extent: f64, item_extent: f64) -> Result<Self, PickerError> {
        for (field, value) in [
            ("viewport_extent", viewport_extent),
            ("item_extent", item_extent),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PickerError::InvalidGeometry { field, value });
            }
        }
        Ok(Self {
            viewport_extent,
            item_extent,
        })
    }

    /// Viewport height
    #[must_use]
    pub const fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    /// Item height
    #[must_use]
    pub const fn item_extent(&self) -> f64 {
        self.item_extent
    }

    /// Offset that centres item 0 in the viewport
    #[must_use]
    pub fn centering_offset(&self) -> f64 {
        (self.viewport_extent - self.item_extent) / 2.0
    }

    /// Offset at which item `index` is centred
    #[must_use]
    pub fn offset_for_index(&self, index: usize) -> f64 {
        (index as f64).mul_add(-self.item_extent, self.centering_offset())
    }

    /// Offset at which the continuous `index` is centred
    #[must_use]
    pub fn offset_for_fractional_index(&self, index: f64) -> f64 {
        index.mul_add(-self.item_extent, self.centering_offset())
    }

    /// Continuous item index centred at `offset`
    #[must_use]
    pub fn fractional_index(&self, offset: f64) -> f64 {
        -(offset - self.centering_offset()) / self.item_extent
    }
}

/// Coarse picker state
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PickerPhase {
    /// At rest on a middle-copy item
    Idle,
    /// Following a drag gesture
    Dragging,
    /// Spring animation toward a snapped item
    Settling,
}

/// Value notifications raised by the picker
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    /// A release snapped to a new value; reported before the settle animation
    Selected {
        /// Chosen value
        value: i32,
        /// Snapped index in the tripled list
        index: usize,
    },
    /// The settle animation finished and the offset was re-centred
    Settled {
        /// Value at rest
        value: i32,
        /// Middle-copy index the offset now points at
        index: usize,
    },
}

#[derive(Debug, Clone)]
enum Motion {
    Idle,
    Dragging,
    Settling {
        spring: SpringIntegrator,
        target_index: usize,
    },
}

/// Drag-to-select integer input with inertial settling
#[derive(Debug, Clone)]
pub struct WheelPicker {
    range: Vec<i32>,
    geometry: WheelGeometry,
    spring: SpringConfig,
    offset: f64,
    selected: i32,
    motion: Motion,
}

impl WheelPicker {
    /// Picker over `range` showing `value`, with default geometry and spring
    ///
    /// # Errors
    ///
    /// Returns an error if the range is empty or `value` is not in it
    pub fn new(range: Vec<i32>, value: i32) -> Result<Self, PickerError> {
        Self::with_geometry(range, value, WheelGeometry::default(), SpringConfig::default())
    }

    /// Picker with explicit geometry and spring parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the range is empty or `value` is not in it
    pub fn with_geometry(
        range: Vec<i32>,
        value: i32,
        geometry: WheelGeometry,
        spring: SpringConfig,
    ) -> Result<Self, PickerError> {
        if range.is_empty() {
            return Err(PickerError::EmptyRange);
        }
        let position = range
            .iter()
            .position(|&v| v == value)
            .ok_or(PickerError::ValueNotInRange { value })?;
        let offset = geometry.offset_for_index(position + range.len());
        Ok(Self {
            range,
            geometry,
            spring,
            offset,
            selected: value,
            motion: Motion::Idle,
        })
    }

    /// Picker over `start..=end` showing `value`
    ///
    /// # Errors
    ///
    /// Returns an error if the range is empty or `value` is outside it
    pub fn inclusive(start: i32, end: i32, value: i32) -> Result<Self, PickerError> {
        Self::new((start..=end).collect(), value)
    }

    /// Logical values
    #[must_use]
    pub fn range(&self) -> &[i32] {
        &self.range
    }

    /// Geometry in use
    #[must_use]
    pub const fn geometry(&self) -> &WheelGeometry {
        &self.geometry
    }

    /// Current continuous offset
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Last resolved value
    #[must_use]
    pub const fn selected_value(&self) -> i32 {
        self.selected
    }

    /// Coarse state
    #[must_use]
    pub const fn phase(&self) -> PickerPhase {
        match self.motion {
            Motion::Idle => PickerPhase::Idle,
            Motion::Dragging => PickerPhase::Dragging,
            Motion::Settling { .. } => PickerPhase::Settling,
        }
    }

    /// Length of the tripled list
    #[must_use]
    pub fn extended_len(&self) -> usize {
        self.range.len() * picker::RANGE_COPIES
    }

    /// Value displayed at `index` of the tripled list
    #[must_use]
    pub fn value_at(&self, index: usize) -> i32 {
        self.range[index % self.range.len()]
    }

    /// Snapped index a release at `offset` with `velocity` would settle on
    ///
    /// Non-decreasing in `-(offset + velocity * 0.3)` and clamped to the
    /// tripled list.
    #[must_use]
    pub fn snap_index(&self, offset: f64, velocity: f64) -> usize {
        let projected = velocity.mul_add(picker::VELOCITY_PROJECTION, offset);
        let raw = self.geometry.fractional_index(projected).round();
        let last = self.extended_len().saturating_sub(1) as f64;
        raw.clamp(0.0, last) as usize
    }

    /// Start following a drag; cancels any in-flight settle at its current offset
    pub fn begin_drag(&mut self) {
        if let Motion::Settling { target_index, .. } = self.motion {
            debug!(target_index, offset = self.offset, "Picker settle cancelled by new drag");
        }
        self.motion = Motion::Dragging;
    }

    /// Move the list by `delta` pixels, starting a drag if none is active
    ///
    /// When the gesture drifts into the outer half of the first or last copy
    /// the offset shifts by whole copies, which leaves the visible items
    /// unchanged. Deltas that would leave the offset non-finite are ignored.
    pub fn drag_by(&mut self, delta: f64) {
        if !matches!(self.motion, Motion::Dragging) {
            self.begin_drag();
        }
        let next = self.offset + delta;
        if !next.is_finite() {
            debug!(delta, offset = self.offset, "Picker ignored non-finite drag");
            return;
        }

        let len = self.range.len() as f64;
        let index = self.geometry.fractional_index(next);
        self.offset = if index < 0.5 * len {
            let wrapped = Self::wrap_into_copy(index, 0.5 * len, len);
            self.geometry.offset_for_fractional_index(wrapped)
        } else if index >= 2.5 * len {
            let wrapped = Self::wrap_into_copy(index, 1.5 * len, len);
            self.geometry.offset_for_fractional_index(wrapped)
        } else {
            next
        };
    }

    /// Shift `index` by whole copies of `len` into `[floor, floor + len)`
    fn wrap_into_copy(index: f64, floor: f64, len: f64) -> f64 {
        let shifted = (index - floor).rem_euclid(len);
        // rem_euclid may round up to `len` for huge inputs
        if shifted < len {
            floor + shifted
        } else {
            floor
        }
    }

    /// Finish the drag with `velocity` (px/s) and start settling
    ///
    /// The snapped target is computed once here and never recomputed during
    /// the animation.
    pub fn release(&mut self, velocity: f64) -> PickerEvent {
        let index = self.snap_index(self.offset, velocity);
        self.selected = self.value_at(index);
        let target = self.geometry.offset_for_index(index);
        self.motion = Motion::Settling {
            spring: SpringIntegrator::new(self.spring, self.offset, velocity, target),
            target_index: index,
        };
        debug!(index, value = self.selected, velocity, "Picker released");
        PickerEvent::Selected {
            value: self.selected,
            index,
        }
    }

    /// Advance the settle animation by `dt`
    ///
    /// Returns [`PickerEvent::Settled`] on the step that reaches rest.
    pub fn step(&mut self, dt: Duration) -> Option<PickerEvent> {
        let Motion::Settling {
            ref mut spring,
            target_index,
        } = self.motion
        else {
            return None;
        };
        let done = spring.step(dt);
        self.offset = spring.position();
        done.then(|| self.finish_settle(target_index))
    }

    /// Drive any settle animation to completion and return the value at rest
    pub fn run_to_rest(&mut self) -> i32 {
        for _ in 0..MAX_SETTLE_FRAMES {
            if !matches!(self.motion, Motion::Settling { .. }) {
                break;
            }
            self.step(FRAME);
        }
        if let Motion::Settling { target_index, .. } = self.motion {
            self.finish_settle(target_index);
        }
        self.selected
    }

    /// Jump to `value` without animation
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::GestureInFlight`] while dragging or settling, or
    /// [`PickerError::ValueNotInRange`] for an unknown value
    pub fn set_value(&mut self, value: i32) -> Result<(), PickerError> {
        if !matches!(self.motion, Motion::Idle) {
            return Err(PickerError::GestureInFlight);
        }
        let position = self
            .range
            .iter()
            .position(|&v| v == value)
            .ok_or(PickerError::ValueNotInRange { value })?;
        self.offset = self.geometry.offset_for_index(position + self.range.len());
        self.selected = value;
        Ok(())
    }

    fn finish_settle(&mut self, target_index: usize) -> PickerEvent {
        let len = self.range.len();
        let index = target_index % len + len;
        self.offset = self.geometry.offset_for_index(index);
        self.motion = Motion::Idle;
        debug!(index, value = self.selected, "Picker settled");
        PickerEvent::Settled {
            value: self.selected,
            index,
        }
    }
}

// ABOUTME: Wheel picker error types for value-range and gesture validation
// ABOUTME: Converts into AppError so callers can propagate with the ? operator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Errors raised while building or driving a wheel picker
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PickerError {
    /// The value range has no items
    #[error("picker range must contain at least one value")]
    EmptyRange,

    /// Item extent or viewport extent is zero, negative, or not finite
    #[error("picker geometry is invalid: {field} = {value}")]
    InvalidGeometry {
        /// Name of the offending geometry field
        field: &'static str,
        /// Supplied value
        value: f64,
    },

    /// Requested value is not part of the picker range
    #[error("value {value} is not in the picker range")]
    ValueNotInRange {
        /// Value that was requested
        value: i32,
    },

    /// A drag or settle is in flight; the wheel cannot be repositioned now
    #[error("picker is busy with a gesture or settle animation")]
    GestureInFlight,
}

impl From<PickerError> for AppError {
    fn from(error: PickerError) -> Self {
        let code = match error {
            PickerError::EmptyRange | PickerError::InvalidGeometry { .. } => {
                ErrorCode::InvalidInput
            }
            PickerError::ValueNotInRange { .. } => ErrorCode::ValueOutOfRange,
            PickerError::GestureInFlight => ErrorCode::ResourceLocked,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

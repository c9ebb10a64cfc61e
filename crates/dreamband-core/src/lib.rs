// ABOUTME: Core types and constants for the dreamband sleep companion engine
// ABOUTME: Foundation crate with error handling, domain models, and timing constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

#![deny(unsafe_code)]

//! # Dreamband Core
//!
//! Foundation crate providing shared types and constants for the dreamband
//! engine. Nothing in here owns a timer or a random source; those live in the
//! engine crate so that this crate changes rarely.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `PickerError`
//! - **constants**: Timer periods, phase timeline, picker geometry, history bounds
//! - **models**: Tracking phases, sensor samples, sleep sessions, alarms

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (phases, samples, sessions, alarms)
pub mod models;

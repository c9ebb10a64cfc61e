// ABOUTME: Command implementations for dreamband-cli
// ABOUTME: One module per subcommand group
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

pub mod alarm;
pub mod history;
pub mod noise;
pub mod settings;
pub mod simulate;

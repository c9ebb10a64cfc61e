// ABOUTME: Helper modules for dreamband-cli
// ABOUTME: Terminal output formatting shared by the subcommands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

pub mod display;

// ABOUTME: dreamband-cli - command-line front end for the dreamband session engine
// ABOUTME: Runs simulated sessions and inspects history, alarms, settings, and noise buffers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors
//!
//! Usage:
//! ```bash
//! # Run a live session for a minute, printing every 5 seconds
//! dreamband-cli simulate --seconds 60 --every 5
//!
//! # Step one full phase cycle in virtual time
//! dreamband-cli simulate --virtual-time --seconds 55
//!
//! # Show last nights and one night in detail
//! dreamband-cli history
//! dreamband-cli history --date 2025-03-09
//!
//! # Smart wake window for a 07:00 alarm
//! dreamband-cli alarm 07:00 --window 30
//!
//! # Read and change settings
//! dreamband-cli settings get
//! dreamband-cli settings set selectedSound rain
//! dreamband-cli settings reset
//!
//! # Synthesize an ambient buffer
//! dreamband-cli noise rain
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dreamband::config::EngineConfig;
use dreamband::logging::LoggingConfig;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "dreamband-cli",
    about = "Dreamband sleep session engine CLI",
    long_about = "Simulate bracelet sleep sessions and inspect history, alarms, settings, and ambient sounds."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Settings file override
    #[arg(long, global = true)]
    settings_path: Option<PathBuf>,

    /// RNG seed override for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run a simulated tracking session
    Simulate {
        /// Session length in seconds
        #[arg(long, default_value = "60")]
        seconds: u64,

        /// Seconds between printed snapshots
        #[arg(long, default_value = "5")]
        every: u64,

        /// Step virtual time instead of waiting on real timers
        #[arg(long)]
        virtual_time: bool,
    },

    /// Show synthetic sleep history
    History {
        /// Number of past nights (defaults to the configured lookback)
        #[arg(long)]
        days: Option<u32>,

        /// Show one night in detail (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Show the month calendar containing this date (YYYY-MM-DD)
        #[arg(long)]
        calendar: Option<String>,
    },

    /// Compute the smart wake window of an alarm
    Alarm {
        /// Alarm time as HH:MM
        time: String,

        /// Window width in minutes
        #[arg(long, default_value = "30")]
        window: u32,
    },

    /// Read or change persisted settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },

    /// Synthesize an ambient noise buffer and report its statistics
    Noise {
        /// rain, white-noise, or ocean
        kind: String,

        /// Sample rate override (Hz)
        #[arg(long)]
        sample_rate: Option<u32>,
    },
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print all settings, or one key
    Get {
        /// Stored key, e.g. selectedSound
        key: Option<String>,
    },

    /// Change one setting
    Set {
        /// Stored key, e.g. selectedSound
        key: String,

        /// New value
        value: String,
    },

    /// Restore defaults
    Reset,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.verbose();
    }
    logging.init().context("initializing logging")?;

    let mut config = EngineConfig::from_env().context("loading configuration")?;
    if let Some(path) = cli.settings_path {
        config.settings_path = path;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    debug!(settings = %config.settings_path.display(), seed = ?config.seed, "Configuration loaded");

    match cli.command {
        Command::Simulate {
            seconds,
            every,
            virtual_time,
        } => {
            if virtual_time {
                commands::simulate::run_virtual(&config, seconds, every, cli.json)?;
            } else {
                commands::simulate::run_live(&config, seconds, every, cli.json).await?;
            }
        }
        Command::History {
            days,
            date,
            calendar,
        } => commands::history::run(&config, days, date.as_deref(), calendar.as_deref(), cli.json)?,
        Command::Alarm { time, window } => commands::alarm::run(&time, window, cli.json)?,
        Command::Settings { action } => match action {
            SettingsCommand::Get { key } => {
                commands::settings::get(&config, key.as_deref(), cli.json)?;
            }
            SettingsCommand::Set { key, value } => commands::settings::set(&config, &key, &value)?,
            SettingsCommand::Reset => commands::settings::reset(&config)?,
        },
        Command::Noise { kind, sample_rate } => {
            commands::noise::run(&config, &kind, sample_rate, cli.json)?;
        }
    }

    Ok(())
}

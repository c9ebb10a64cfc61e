// ABOUTME: Simulate command - runs a tracking session on real timers or virtual time
// ABOUTME: Prints periodic snapshots and a closing summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use std::time::Duration;

use anyhow::Context;
use dreamband::config::{EngineConfig, PhaseBaselineTable};
use dreamband::simulation::{LiveSession, PhaseTimeline, SensorSynthesizer, SessionDriver};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::info;

use crate::helpers::display::{
    display_events, display_session_summary, display_snapshot, print_json,
};

/// Run a live session for `seconds`, printing a snapshot every `every` seconds
///
/// Ctrl-C stops the session early.
pub async fn run_live(
    config: &EngineConfig,
    seconds: u64,
    every: u64,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = LiveSession::from_config(config).context("creating live session")?;
    session.start().await;
    info!(seconds, "Live session started");

    let deadline = sleep(Duration::from_secs(seconds));
    tokio::pin!(deadline);
    let mut ticker = interval(Duration::from_secs(every.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            () = &mut deadline => break,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping session");
                break;
            }
            _ = ticker.tick() => {
                let snapshot = session.snapshot().await;
                if json {
                    println!("{}", serde_json::to_string(&snapshot)?);
                } else {
                    display_snapshot(&snapshot);
                }
            }
        }
    }

    session.stop().await;
    let snapshot = session.snapshot().await;
    if json {
        print_json(&snapshot)?;
    } else {
        display_session_summary(&snapshot);
    }
    Ok(())
}

/// Step a session through `seconds` of virtual time in `every`-second increments
pub fn run_virtual(
    config: &EngineConfig,
    seconds: u64,
    every: u64,
    json: bool,
) -> anyhow::Result<()> {
    let rng = config
        .seed
        .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
    let mut driver = SessionDriver::new(
        PhaseTimeline::standard(),
        SensorSynthesizer::new(PhaseBaselineTable::default()),
        config.timings,
        rng,
    )
    .context("creating session driver")?;

    let step = every.max(1);
    let mut elapsed = 0;
    while elapsed < seconds {
        let dt = step.min(seconds - elapsed);
        let events = driver.advance_by(Duration::from_secs(dt));
        elapsed += dt;
        let snapshot = driver.snapshot();
        if json {
            println!("{}", serde_json::to_string(&snapshot)?);
        } else {
            display_events(&events);
            display_snapshot(&snapshot);
        }
    }

    if !json {
        display_session_summary(&driver.snapshot());
    }
    Ok(())
}

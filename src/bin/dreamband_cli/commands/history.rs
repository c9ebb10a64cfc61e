// ABOUTME: History command - generates synthetic nights and renders them
// ABOUTME: Lists recent nights, shows one night in detail, or draws a month calendar
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use dreamband::config::EngineConfig;
use dreamband::history::{MonthCalendar, SessionIndex, SleepHistoryGenerator};

use crate::helpers::display::{display_calendar, display_history, display_session, print_json};

fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{value}', expected YYYY-MM-DD"))
}

/// Generate the history and print the requested view
pub fn run(
    config: &EngineConfig,
    days: Option<u32>,
    date: Option<&str>,
    calendar: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let days = days.unwrap_or(config.history_days);
    let sessions =
        SleepHistoryGenerator::from_seed_or_entropy(config.seed).nights_before(today, days);

    if let Some(raw) = date {
        let date = parse_date(raw)?;
        let index = SessionIndex::new(sessions);
        let Some(session) = index.get(date) else {
            bail!("no data for {date}");
        };
        return if json {
            print_json(session)
        } else {
            display_session(session);
            Ok(())
        };
    }

    if let Some(raw) = calendar {
        let month = MonthCalendar::containing(parse_date(raw)?);
        let index = SessionIndex::new(sessions);
        if json {
            return print_json(&month.cells(&index, today));
        }
        display_calendar(&month, &index, today);
        return Ok(());
    }

    if json {
        print_json(&sessions)
    } else {
        display_history(&sessions);
        Ok(())
    }
}

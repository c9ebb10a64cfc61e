// ABOUTME: Monday-first month calendar over the sleep history with per-day data markers
// ABOUTME: Supports month navigation and looking a day up to its recorded session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};
use dreamband_core::errors::{AppError, AppResult};
use dreamband_core::models::SleepSession;
use serde::Serialize;

/// Weekday column headers, Monday first
pub const WEEKDAY_HEADERS: [&str; 7] = ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"];

const MONTH_NAMES: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

/// Sessions keyed by night
#[derive(Debug, Clone, Default)]
pub struct SessionIndex {
    by_date: HashMap<NaiveDate, SleepSession>,
}

impl SessionIndex {
    /// Index `sessions`; a later session for the same date replaces an earlier one
    #[must_use]
    pub fn new(sessions: impl IntoIterator<Item = SleepSession>) -> Self {
        Self {
            by_date: sessions.into_iter().map(|s| (s.date, s)).collect(),
        }
    }

    /// Session recorded for `date`
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&SleepSession> {
        self.by_date.get(&date)
    }

    /// Session recorded for an ISO `YYYY-MM-DD` id
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not an ISO date or no session exists for it
    pub fn by_id(&self, id: &str) -> AppResult<&SleepSession> {
        let date = NaiveDate::parse_from_str(id, "%Y-%m-%d")
            .map_err(|e| {
                AppError::invalid_input(format!("invalid session id '{id}'")).with_source(e)
            })?;
        self.get(date)
            .ok_or_else(|| AppError::not_found(format!("sleep session {id}")))
    }

    /// Whether `date` has a session
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.by_date.contains_key(&date)
    }

    /// Number of indexed sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    /// Whether nothing is indexed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

/// One cell of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    /// Date of the cell
    pub date: NaiveDate,
    /// Day of month
    pub day: u32,
    /// A session exists for this night
    pub has_data: bool,
    /// The cell is today
    pub is_today: bool,
}

/// Month currently shown by the history screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCalendar {
    first: NaiveDate,
}

impl MonthCalendar {
    /// Calendar for the month containing `date`
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// First day of the month
    #[must_use]
    pub const fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Year and month number
    #[must_use]
    pub fn year_month(&self) -> (i32, u32) {
        (self.first.year(), self.first.month())
    }

    /// Header such as `"Март 2025"`
    #[must_use]
    pub fn title(&self) -> String {
        let name = MONTH_NAMES[self.first.month0() as usize];
        format!("{name} {}", self.first.year())
    }

    /// Previous month
    #[must_use]
    pub fn previous(&self) -> Self {
        Self {
            first: self.first.checked_sub_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    /// Next month
    #[must_use]
    pub fn next(&self) -> Self {
        Self {
            first: self.first.checked_add_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    /// Empty cells before the 1st in a Monday-first grid
    #[must_use]
    pub fn leading_blanks(&self) -> usize {
        self.first.weekday().num_days_from_monday() as usize
    }

    /// Days in the month
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        let next = self.next().first;
        if next == self.first {
            // December of the last representable year
            return 31;
        }
        next.signed_duration_since(self.first).num_days() as u32
    }

    /// Grid cells, `None` for leading blanks
    #[must_use]
    pub fn cells(&self, index: &SessionIndex, today: NaiveDate) -> Vec<Option<CalendarDay>> {
        let blanks = std::iter::repeat_n(None, self.leading_blanks());
        let days = (1..=self.days_in_month()).filter_map(|day| {
            let date = self.first.with_day(day)?;
            Some(Some(CalendarDay {
                date,
                day,
                has_data: index.contains(date),
                is_today: date == today,
            }))
        });
        blanks.chain(days).collect()
    }

    /// Session for `day` of this month, if one exists
    #[must_use]
    pub fn select_day<'a>(&self, index: &'a SessionIndex, day: u32) -> Option<&'a SleepSession> {
        self.first.with_day(day).and_then(|date| index.get(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monday_first_offsets() {
        // 2025-09-01 is a Monday, 2025-06-01 a Sunday
        let sept = MonthCalendar::containing(NaiveDate::from_ymd_opt(2025, 9, 17).unwrap());
        assert_eq!(sept.leading_blanks(), 0);
        let june = MonthCalendar::containing(NaiveDate::from_ymd_opt(2025, 6, 5).unwrap());
        assert_eq!(june.leading_blanks(), 6);
    }

    #[test]
    fn test_month_lengths_and_navigation() {
        let feb = MonthCalendar::containing(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        assert_eq!(feb.days_in_month(), 29);
        assert_eq!(feb.previous().year_month(), (2024, 1));
        assert_eq!(feb.next().year_month(), (2024, 3));
        let dec = MonthCalendar::containing(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(dec.next().year_month(), (2025, 1));
        assert_eq!(dec.title(), "Декабрь 2024");
    }
}

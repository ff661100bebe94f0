// --- File: crates/agenda_booking/src/calendar.rs ---
//! Month grids for the date picker.
//!
//! Columns run Sunday (0) through Saturday (6). Cells outside the month are
//! `None` so that every week row has exactly seven entries.

use chrono::{Datelike, Months, NaiveDate};
use thiserror::Error;

/// One row of the month grid.
pub type Week = [Option<NaiveDate>; 7];

pub const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Short weekday headers, Sunday first.
pub const DAY_NAMES: [&str; 7] = ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Month index out of range: {0} (expected 0-11)")]
    InvalidMonth(u32),
    #[error("Year out of supported range: {0}")]
    InvalidYear(i32),
}

/// A displayed month. Months are zero-indexed (0 = January).
///
/// Ordering follows the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if month > 11 {
            return Err(CalendarError::InvalidMonth(month));
        }
        let first =
            NaiveDate::from_ymd_opt(year, month + 1, 1).ok_or(CalendarError::InvalidYear(year))?;
        Ok(Self { first })
    }

    /// The month that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Zero-indexed month.
    pub fn month(&self) -> u32 {
        self.first.month0()
    }

    /// "Octubre 2026"
    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month() as usize], self.year())
    }

    /// The following month. Saturates at the last representable month.
    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    /// The preceding month, never earlier than the month containing `today`.
    pub fn previous(&self, today: NaiveDate) -> Self {
        let floor = Self::containing(today);
        let candidate = self
            .first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self);
        candidate.max(floor)
    }

    pub fn can_go_previous(&self, today: NaiveDate) -> bool {
        *self > Self::containing(today)
    }

    /// Moves a month that lies before today's month up to today's month.
    pub fn clamp_to(&self, today: NaiveDate) -> Self {
        (*self).max(Self::containing(today))
    }

    fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.first.month();
        self.first.iter_days().take_while(move |d| d.month() == month)
    }

    /// Week rows for this month.
    pub fn grid(&self) -> Vec<Week> {
        let mut weeks = Vec::with_capacity(6);
        let mut week: Week = [None; 7];
        let mut column = self.first.weekday().num_days_from_sunday() as usize;

        for date in self.days() {
            week[column] = Some(date);
            column += 1;
            if column == 7 {
                weeks.push(week);
                week = [None; 7];
                column = 0;
            }
        }
        if column > 0 {
            weeks.push(week);
        }
        weeks
    }
}

/// Week rows for `year` / zero-indexed `month`.
pub fn month_grid(year: i32, month: u32) -> Result<Vec<Week>, CalendarError> {
    Ok(CalendarMonth::new(year, month)?.grid())
}

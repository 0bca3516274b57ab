//! Month keys and the day cursor fed to the streak engine.
//!
//! Habits are stored and loaded one calendar month at a time, so every streak
//! computation is scoped to a [`MonthKey`].

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Years accepted by [`MonthKey::new`], the range `YYYY` can spell.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// A calendar month, `month` being 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidValue {
                field: "month".into(),
                message: format!("{month} is not between 1 and 12"),
            });
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ValidationError::InvalidValue {
                field: "year".into(),
                message: format!("{year} is not between {MIN_YEAR} and {MAX_YEAR}"),
            });
        }
        Ok(Self { year, month })
    }

    /// Month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Month containing today's local date.
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    /// Number of days in this month, or 0 for an unrepresentable date.
    pub fn days_in_month(&self) -> u32 {
        let next = self.next();
        match (
            NaiveDate::from_ymd_opt(self.year, self.month, 1),
            NaiveDate::from_ymd_opt(next.year, next.month, 1),
        ) {
            (Some(first), Some(next_first)) => (next_first - first).num_days() as u32,
            _ => 0,
        }
    }

    /// Following month. Saturates at `i32::MAX` for keys built by hand.
    pub fn next(&self) -> Self {
        if self.month >= 12 {
            Self { year: self.year.saturating_add(1), month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month <= 1 {
            Self { year: self.year.saturating_sub(1), month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = ValidationError;

    /// Parse `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidValue {
            field: "month".into(),
            message: format!("'{s}' is not in YYYY-MM form"),
        };
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

/// Day cursor and month length for one streak computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayContext {
    /// Today's day number, 0 when the displayed month is not the present one.
    pub current_day: u32,
    pub days_in_month: u32,
}

impl DayContext {
    /// Context for displaying `month` on `today`.
    pub fn for_month(month: MonthKey, today: NaiveDate) -> Self {
        let current_day = if MonthKey::of(today) == month {
            today.day()
        } else {
            0
        };
        Self {
            current_day,
            days_in_month: month.days_in_month(),
        }
    }

    /// Context for `month` using the local clock.
    pub fn now(month: MonthKey) -> Self {
        Self::for_month(month, Local::now().date_naive())
    }
}

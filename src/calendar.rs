use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::dates::days_in_month;
use crate::repository::SessionRepository;

/// A calendar month, `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                month: self.month + 1,
                ..self
            }
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                month: self.month - 1,
                ..self
            }
        }
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn day(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// e.g. `May 2024`
    pub fn title(self) -> String {
        self.first_day()
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| self.to_string())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got {s:?}"))?;
        let year: i32 = year.parse().map_err(|_| format!("invalid year in {s:?}"))?;
        let month: u32 = month.parse().map_err(|_| format!("invalid month in {s:?}"))?;
        YearMonth::new(year, month).ok_or_else(|| format!("month out of range in {s:?}"))
    }
}

/// Everything the renderer needs to lay out one month without doing date math.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    /// empty cells before day 1, 0 = Sunday .. 6 = Saturday
    pub leading_blanks: u32,
    pub days_in_month: u32,
    pub class_days: BTreeSet<u32>,
}

impl MonthGrid {
    pub fn has_class(&self, day: u32) -> bool {
        self.class_days.contains(&day)
    }

    /// Number of week rows the grid occupies.
    pub fn weeks(&self) -> u32 {
        (self.leading_blanks + self.days_in_month).div_ceil(7)
    }
}

pub fn days_with_classes(repo: &SessionRepository, month: YearMonth) -> BTreeSet<u32> {
    repo.session_days_in(month.year, month.month)
}

pub fn leading_blanks(month: YearMonth) -> u32 {
    month
        .first_day()
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

pub fn project(repo: &SessionRepository, month: YearMonth) -> MonthGrid {
    MonthGrid {
        month,
        leading_blanks: leading_blanks(month),
        days_in_month: days_in_month(month.year, month.month),
        class_days: days_with_classes(repo, month),
    }
}

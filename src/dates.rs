use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Order of the day and month fields in numeric `a/b/yyyy` dates.
///
/// ISO dates (`yyyy-mm-dd`, `yyyy/mm/dd`) are unambiguous and parse the same
/// way regardless of this setting.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    #[default]
    #[strum(serialize = "month-first")]
    MonthFirst,
    #[strum(serialize = "day-first")]
    DayFirst,
}

/// Parse a date cell from the sheet export.
///
/// Accepted forms, with `/`, `-` or `.` as separator:
/// - `2024-05-01` (four-digit year first, always year-month-day)
/// - `5/1/2024` (four-digit year last, field order given by `order`)
///
/// Anything else, including two-digit years and out-of-range days, yields `None`.
pub fn parse_date(raw: &str, order: DateOrder) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.trim().split(['/', '-', '.']).map(str::trim).collect();
    let numeric = |p: &&str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    if parts.len() != 3 || !parts.iter().all(numeric) {
        return None;
    }

    let num = |idx: usize| parts[idx].parse::<u32>().ok();

    let (year, month, day) = if parts[0].len() == 4 {
        (num(0)?, num(1)?, num(2)?)
    } else if parts[2].len() == 4 {
        match order {
            DateOrder::MonthFirst => (num(2)?, num(0)?, num(1)?),
            DateOrder::DayFirst => (num(2)?, num(1)?, num(0)?),
        }
    } else {
        return None;
    };

    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// Number of days in `month` (1-12) of `year`, leap years included.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    // day 0 of the following month
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

pub fn format_long(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

pub fn format_short(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

//! Date arithmetic: request day counts, holiday lookups, and month grids.

use chrono::{Datelike, NaiveDate};

use crate::models::Holiday;

/// Stored date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Short month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Cells in a six-week month grid.
pub const GRID_CELLS: usize = 42;

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse date input flexibly, accepting multiple formats.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    for fmt in &[DATE_FORMAT, "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(input, fmt) {
            return Some(date);
        }
    }
    None
}

/// Days covered by an inclusive `start..=end` range.
///
/// Unparseable dates count as zero days. A reversed range is negative.
pub fn inclusive_day_count(start: &str, end: &str) -> i64 {
    match (parse_date(start), parse_date(end)) {
        (Some(s), Some(e)) => (e - s).num_days() + 1,
        _ => 0,
    }
}

/// Displayed duration of a request: the absolute gap plus one day.
pub fn duration_days(start: &str, end: &str) -> i64 {
    match (parse_date(start), parse_date(end)) {
        (Some(s), Some(e)) => (e - s).num_days().abs() + 1,
        _ => 0,
    }
}

/// Whether `date` (text form) falls in the same month and year as `reference`.
pub fn in_month_of(date: &str, reference: NaiveDate) -> bool {
    parse_date(date).is_some_and(|d| d.year() == reference.year() && d.month() == reference.month())
}

/// Holidays on or after `today`, soonest first.
pub fn upcoming_holidays(today: NaiveDate, limit: Option<usize>) -> Vec<Holiday> {
    let mut upcoming: Vec<Holiday> = Holiday::all().into_iter().filter(|h| h.date >= today).collect();
    upcoming.sort_by_key(|h| h.date);
    if let Some(limit) = limit {
        upcoming.truncate(limit);
    }
    upcoming
}

/// Holidays before `today`, most recent first.
pub fn past_holidays(today: NaiveDate) -> Vec<Holiday> {
    let mut past: Vec<Holiday> = Holiday::all().into_iter().filter(|h| h.date < today).collect();
    past.sort_by(|a, b| b.date.cmp(&a.date));
    past
}

pub fn holidays_in_month(year: i32, month: u32) -> Vec<Holiday> {
    Holiday::all()
        .into_iter()
        .filter(|h| h.date.year() == year && h.date.month() == month)
        .collect()
}

/// Whole days from `today` until `date`; negative once it has passed.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// A date is "soon" when it is today or within the next `window_days`.
pub fn is_soon(date: NaiveDate, today: NaiveDate, window_days: i64) -> bool {
    (0..=window_days).contains(&days_until(date, today))
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = shift_month(year, month, 1);
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

/// Move a (year, month) pair by `offset` months.
pub fn shift_month(year: i32, month: u32, offset: i32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) + offset;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// Sunday-first six-week grid for a month; `None` cells are padding.
pub fn month_grid(year: i32, month: u32) -> [Option<u32>; GRID_CELLS] {
    let mut grid = [None; GRID_CELLS];
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return grid;
    };
    let offset = first.weekday().num_days_from_sunday() as usize;
    let days = days_in_month(year, month);

    for (cell, day) in grid.iter_mut().skip(offset).zip(1..=days) {
        *cell = Some(day);
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2026-07-01"), Some(date(2026, 7, 1)));
        assert_eq!(parse_date(" 2026/07/01 "), Some(date(2026, 7, 1)));
        assert_eq!(parse_date("2026.07.01"), Some(date(2026, 7, 1)));
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("next week"), None);
    }

    #[test]
    fn test_inclusive_day_count() {
        assert_eq!(inclusive_day_count("2026-07-01", "2026-07-01"), 1);
        assert_eq!(inclusive_day_count("2026-07-01", "2026-07-05"), 5);
        assert_eq!(inclusive_day_count("2026-02-27", "2026-03-02"), 4);
    }

    #[test]
    fn test_inclusive_day_count_unparseable_is_zero() {
        assert_eq!(inclusive_day_count("", "2026-07-01"), 0);
        assert_eq!(inclusive_day_count("2026-13-01", "2026-07-01"), 0);
    }

    #[test]
    fn test_inclusive_day_count_reversed_is_negative() {
        assert_eq!(inclusive_day_count("2026-07-05", "2026-07-01"), -3);
        assert_eq!(inclusive_day_count("2026-07-02", "2026-07-01"), 0);
    }

    #[test]
    fn test_duration_days_uses_absolute_gap() {
        assert_eq!(duration_days("2026-07-05", "2026-07-01"), 5);
        assert_eq!(duration_days("2026-07-01", "2026-07-03"), 3);
        assert_eq!(duration_days("bad", "2026-07-03"), 0);
    }

    #[test]
    fn test_in_month_of() {
        let reference = date(2026, 10, 18);
        assert!(in_month_of("2026-10-01", reference));
        assert!(!in_month_of("2025-10-01", reference));
        assert!(!in_month_of("garbage", reference));
    }

    #[test]
    fn test_upcoming_and_past_holidays() {
        let today = date(2026, 7, 1);
        let upcoming = upcoming_holidays(today, Some(3));
        let names: Vec<_> = upcoming.iter().map(|h| h.name).collect();
        assert_eq!(names, ["Independence Day", "Liberation Day", "Umuganura (Harvest Day)"]);

        let past = past_holidays(today);
        assert_eq!(past.first().map(|h| h.name), Some("Eid al-Adha"));
        assert_eq!(past.len() + upcoming_holidays(today, None).len(), Holiday::all().len());
    }

    #[test]
    fn test_holidays_in_month() {
        let april = holidays_in_month(2026, 4);
        assert_eq!(april.len(), 3);
        assert!(holidays_in_month(2026, 6).is_empty());
    }

    #[test]
    fn test_is_soon() {
        let today = date(2026, 12, 20);
        assert!(is_soon(date(2026, 12, 25), today, 14));
        assert!(is_soon(today, today, 14));
        assert!(!is_soon(date(2026, 12, 19), today, 14));
        assert!(!is_soon(date(2027, 1, 10), today, 14));
    }

    #[test]
    fn test_shift_month_wraps_years() {
        assert_eq!(shift_month(2026, 12, 1), (2027, 1));
        assert_eq!(shift_month(2026, 1, -1), (2025, 12));
        assert_eq!(shift_month(2026, 5, 0), (2026, 5));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2026, 2), 28);
        assert_eq!(days_in_month(2028, 2), 29);
        assert_eq!(days_in_month(2026, 12), 31);
    }

    #[test]
    fn test_month_grid() {
        // 2026-07-01 is a Wednesday.
        let grid = month_grid(2026, 7);
        assert_eq!(&grid[..3], &[None, None, None]);
        assert_eq!(grid[3], Some(1));
        assert_eq!(grid[3 + 30], Some(31));
        assert_eq!(grid[3 + 31], None);
        assert_eq!(grid.iter().flatten().count(), 31);
    }
}

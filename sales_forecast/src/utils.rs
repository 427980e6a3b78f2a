//! Calendar-month helpers and rounding used across the crate

use crate::error::{ForecastError, Result};
use chrono::{Datelike, Months, NaiveDate};

/// Roll a date forward to the first day of a month.
///
/// Dates already on the 1st are returned unchanged; anything later in the
/// month moves to the 1st of the following month.
pub fn month_start_on_or_after(date: NaiveDate) -> Result<NaiveDate> {
    if date.day() == 1 {
        return Ok(date);
    }

    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .ok_or_else(|| ForecastError::validation(format!("Date out of range: {}", date)))
}

/// `count` consecutive month starts beginning at `start` (which must be a month start)
pub fn month_sequence(start: NaiveDate, count: usize) -> Result<Vec<NaiveDate>> {
    (0..count)
        .map(|offset| add_months(start, offset))
        .collect()
}

/// The `count` month starts following `last`
pub fn months_after(last: NaiveDate, count: usize) -> Result<Vec<NaiveDate>> {
    (1..=count).map(|offset| add_months(last, offset)).collect()
}

/// `date` advanced by `months` calendar months
pub fn add_months(date: NaiveDate, months: usize) -> Result<NaiveDate> {
    u32::try_from(months)
        .ok()
        .and_then(|m| date.checked_add_months(Months::new(m)))
        .ok_or_else(|| {
            ForecastError::validation(format!("Date out of range: {} + {} months", date, months))
        })
}

/// Months elapsed since January 1970; the model's time axis
pub fn month_index(date: NaiveDate) -> i64 {
    (date.year() as i64 - 1970) * 12 + date.month0() as i64
}

/// Whole months from `earlier` to `later`, ignoring the day of month
pub fn months_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    month_index(later) - month_index(earlier)
}

/// Round to the nearest integer, ties to even
pub fn round_sales(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// ISO `YYYY-MM-DD` rendering used by the table, plots and export
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

//! Calendar arithmetic on naive dates.
//!
//! Everything here works on whole calendar days and leaves the time of day to
//! the caller, so a reference time survives any number of steps unchanged.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

use crate::error::CoreError;

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Longest possible length of each month, i.e. February in a leap year.
const MAX_MONTH_DAYS: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Weekday number in the 1 = Monday .. 7 = Sunday scheme.
#[inline]
pub fn weekday_number(weekday: Weekday) -> u32 {
    weekday.number_from_monday()
}

pub fn weekday_from_number(number: u32) -> Option<Weekday> {
    match number {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_monday() as usize]
}

pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month.checked_sub(1)? as usize).copied()
}

/// Largest day number `month` can ever have (29 for February).
pub fn max_days_in_month(month: u32) -> Option<u32> {
    MAX_MONTH_DAYS.get(month.checked_sub(1)? as usize).copied()
}

/// Sorts Monday first and drops duplicates.
pub fn normalize_weekdays(mut weekdays: Vec<Weekday>) -> Vec<Weekday> {
    weekdays.sort_by_key(|day| day.number_from_monday());
    weekdays.dedup();
    weekdays
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Builds `year-month-day`, falling back to the month's last day when the
/// month is too short (day 31 in April becomes April 30).
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let last = last_day_of_month(year, month)?;
    if day >= last.day() {
        Some(last)
    } else {
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Advances a year/month pair by `months`, carrying into the year.
pub fn add_months(year: i32, month: u32, months: u32) -> Result<(i32, u32), CoreError> {
    let index = i64::from(year) * 12 + i64::from(month) - 1 + i64::from(months);
    let target_year = i32::try_from(index.div_euclid(12)).map_err(|_| out_of_range())?;
    let target_month = (index.rem_euclid(12) + 1) as u32;
    Ok((target_year, target_month))
}

/// The `week`-th `weekday` of a month. When the month has fewer occurrences
/// the result steps back a week so it stays inside the month.
pub fn nth_weekday_of_month(year: i32, month: u32, week: u32, weekday: Weekday) -> Option<NaiveDate> {
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = (7 + weekday.num_days_from_monday() - first_of_month.weekday().num_days_from_monday()) % 7;
    let first = first_of_month.checked_add_signed(Duration::days(i64::from(offset)))?;
    let candidate = first.checked_add_signed(Duration::days(7 * i64::from(week.saturating_sub(1))))?;
    if candidate.month() == month {
        Some(candidate)
    } else {
        candidate.checked_sub_signed(Duration::days(7))
    }
}

/// Last `weekday` of a month, found by walking back from its last day.
pub fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let last = last_day_of_month(year, month)?;
    let back = (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    last.checked_sub_signed(Duration::days(i64::from(back)))
}

pub fn add_days(reference: NaiveDateTime, days: i64) -> Result<NaiveDateTime, CoreError> {
    reference
        .checked_add_signed(Duration::days(days))
        .ok_or_else(out_of_range)
}

pub(crate) fn out_of_range() -> CoreError {
    CoreError::InvalidInput("date is outside the supported calendar range".to_string())
}

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, Weekday};
use tracing::trace;

use super::calendar::{self, out_of_range, weekday_number};
use super::pattern::{Frequency, MonthlyRule, RecurrencePattern, YearlyDate};
use crate::error::{CoreError, EndReason};

/// Computes the occurrence that follows `reference`.
///
/// Only the date moves; the reference time of day is carried over unchanged.
///
/// # Errors
/// * `AmbiguousRule` for a monthly rule without a day or week detail
/// * `RecurrenceEnded` when the result falls after the pattern's `until` day
/// * `InvalidInput` for a zero interval or a result outside chrono's range
///
/// The count limit is not checked here; it needs the running instance number,
/// see [`super::state::RecurrenceState::has_reached_limit`].
pub fn next_occurrence(
    pattern: &RecurrencePattern,
    reference: NaiveDateTime,
) -> Result<NaiveDateTime, CoreError> {
    if pattern.interval == 0 {
        return Err(CoreError::InvalidInput("interval must be at least 1".to_string()));
    }
    let interval = pattern.interval;

    let next = match &pattern.frequency {
        Frequency::Daily => calendar::add_days(reference, i64::from(interval))?,
        Frequency::Weekly { weekdays } if weekdays.is_empty() => {
            calendar::add_days(reference, 7 * i64::from(interval))?
        }
        Frequency::Weekly { weekdays } => next_listed_weekday(reference, weekdays, interval)?,
        Frequency::Monthly { rule: Some(rule) } => {
            let (year, month) = calendar::add_months(reference.year(), reference.month(), interval)?;
            let date = monthly_date(year, month, rule).ok_or_else(out_of_range)?;
            date.and_time(reference.time())
        }
        Frequency::Monthly { rule: None } => {
            return Err(CoreError::AmbiguousRule(
                "monthly recurrence requires a day or week specification".to_string(),
            ))
        }
        Frequency::Yearly { date: Some(date) } => {
            yearly_on_date(reference.date(), *date, interval)?.and_time(reference.time())
        }
        Frequency::Yearly { date: None } => {
            same_day_years_later(reference.date(), interval)?.and_time(reference.time())
        }
    };

    if let Some(until) = pattern.until {
        if next.date() > until {
            return Err(CoreError::RecurrenceEnded(EndReason::Until(until)));
        }
    }

    trace!(pattern = %pattern, %reference, %next, "computed next occurrence");
    Ok(next)
}

/// Lists up to `limit` occurrences after `reference`, stopping quietly once
/// the series ends through `until` or through the count limit. `instance_num`
/// is the number of instances that already exist, the one at `reference`
/// included.
pub fn upcoming(
    pattern: &RecurrencePattern,
    reference: NaiveDateTime,
    instance_num: u32,
    limit: usize,
) -> Result<Vec<NaiveDateTime>, CoreError> {
    let mut occurrences = Vec::with_capacity(limit.min(64));
    let mut current = reference;
    let mut instance = instance_num;

    while occurrences.len() < limit {
        if pattern.count > 0 && instance >= pattern.count {
            break;
        }
        match next_occurrence(pattern, current) {
            Ok(next) => {
                occurrences.push(next);
                current = next;
                instance = instance.saturating_add(1);
            }
            Err(CoreError::RecurrenceEnded(_)) => break,
            Err(e) => return Err(e),
        }
    }

    Ok(occurrences)
}

/// Nearest listed weekday later in the reference week, or else the first
/// listed weekday `interval` weeks on.
fn next_listed_weekday(
    reference: NaiveDateTime,
    weekdays: &[Weekday],
    interval: u32,
) -> Result<NaiveDateTime, CoreError> {
    let current = i64::from(weekday_number(reference.weekday()));
    let mut days: Vec<i64> = weekdays.iter().map(|d| i64::from(weekday_number(*d))).collect();
    days.sort_unstable();

    let days_to_add = match days.iter().find(|day| **day > current) {
        Some(day) => day - current,
        None => days[0] - current + 7 * i64::from(interval),
    };

    calendar::add_days(reference, days_to_add)
}

fn monthly_date(year: i32, month: u32, rule: &MonthlyRule) -> Option<NaiveDate> {
    match *rule {
        MonthlyRule::DayOfMonth(day) => calendar::clamped_date(year, month, day),
        MonthlyRule::LastDayOfMonth => calendar::last_day_of_month(year, month),
        MonthlyRule::NthWeekday { week, weekday } => {
            calendar::nth_weekday_of_month(year, month, week, weekday)
        }
        MonthlyRule::LastWeekday(weekday) => calendar::last_weekday_of_month(year, month, weekday),
    }
}

/// Fixed month/day `interval` years after the reference year. February 29
/// clamps to the 28th in common years.
fn yearly_on_date(reference: NaiveDate, date: YearlyDate, interval: u32) -> Result<NaiveDate, CoreError> {
    let year = i32::try_from(interval)
        .ok()
        .and_then(|years| reference.year().checked_add(years))
        .ok_or_else(out_of_range)?;
    calendar::clamped_date(year, date.month(), date.day()).ok_or_else(out_of_range)
}

/// Same month and day `interval` years later. A February 29 reference lands on
/// February 28 when the target year is not a leap year.
fn same_day_years_later(reference: NaiveDate, interval: u32) -> Result<NaiveDate, CoreError> {
    interval
        .checked_mul(12)
        .and_then(|months| reference.checked_add_months(Months::new(months)))
        .ok_or_else(out_of_range)
}

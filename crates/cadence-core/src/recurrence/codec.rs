//! The persisted recurrence string.
//!
//! ```text
//! <type>:<interval>:<type-detail>[:until:<YYYY-MM-DD>][:count:<N>]
//! ```
//!
//! | type    | detail                                           |
//! |---------|--------------------------------------------------|
//! | daily   | ignored                                          |
//! | weekly  | `1,3,5` (1 = Monday .. 7 = Sunday)               |
//! | monthly | `15`, `last`, or `<week>w<weekday>` (`5w5` = last Friday) |
//! | yearly  | `MMDD`                                           |
//!
//! Empty positions are allowed everywhere: `weekly:2:` repeats every other
//! week on the reference weekday, and `monthly::` decodes fine but cannot be
//! computed. This layout is shared with every other reader of the task table,
//! so it must stay byte-compatible.

use chrono::NaiveDate;
use std::fmt::Write as _;
use std::str::FromStr;

use super::calendar::{weekday_from_number, weekday_number};
use super::pattern::{
    Frequency, MonthlyRule, RecurrencePattern, RecurrenceType, YearlyDate, LAST_WEEK,
};
use crate::error::CoreError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a recurrence string into a [`RecurrencePattern`].
pub fn decode(input: &str) -> Result<RecurrencePattern, CoreError> {
    let parts: Vec<&str> = input.trim().split(':').collect();

    let kind: RecurrenceType = parts[0]
        .parse()
        .map_err(|e: super::pattern::ParseRecurrenceTypeError| CoreError::invalid_format(e.to_string()))?;

    let interval = match parts.get(1).copied().unwrap_or_default() {
        "" => 1,
        raw => decode_interval(raw)?,
    };

    let detail = parts.get(2).copied().unwrap_or_default();
    let frequency = decode_detail(kind, detail)?;

    let mut pattern = RecurrencePattern {
        frequency,
        interval,
        until: None,
        count: 0,
    };

    for pair in parts.get(3..).unwrap_or_default().chunks(2) {
        let [keyword, value] = pair else {
            return Err(CoreError::invalid_format("incomplete until/count specification"));
        };
        match keyword.to_lowercase().as_str() {
            "until" => pattern.until = Some(decode_until(value)?),
            "count" => pattern.count = decode_count(value)?,
            other => {
                return Err(CoreError::invalid_format(format!("unknown specifier: {}", other)))
            }
        }
    }

    Ok(pattern)
}

/// Renders a pattern in the persisted layout. Always emits the detail
/// segment, even when it is empty.
pub fn encode(pattern: &RecurrencePattern) -> String {
    let mut encoded = format!(
        "{}:{}:{}",
        pattern.recurrence_type(),
        pattern.interval,
        encode_detail(&pattern.frequency)
    );

    // Writing into a String cannot fail.
    if let Some(until) = pattern.until {
        let _ = write!(encoded, ":until:{}", until.format(DATE_FORMAT));
    }
    if pattern.count > 0 {
        let _ = write!(encoded, ":count:{}", pattern.count);
    }

    encoded
}

impl FromStr for RecurrencePattern {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl std::fmt::Display for RecurrencePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&encode(self))
    }
}

fn decode_interval(raw: &str) -> Result<u32, CoreError> {
    let interval: i64 = raw
        .parse()
        .map_err(|_| CoreError::invalid_format(format!("invalid interval: {}", raw)))?;
    if interval < 1 {
        return Err(CoreError::invalid_format("interval must be at least 1"));
    }
    u32::try_from(interval)
        .map_err(|_| CoreError::invalid_format(format!("interval too large: {}", raw)))
}

fn decode_detail(kind: RecurrenceType, detail: &str) -> Result<Frequency, CoreError> {
    if detail.is_empty() {
        return Ok(match kind {
            RecurrenceType::Daily => Frequency::Daily,
            RecurrenceType::Weekly => Frequency::Weekly { weekdays: Vec::new() },
            RecurrenceType::Monthly => Frequency::Monthly { rule: None },
            RecurrenceType::Yearly => Frequency::Yearly { date: None },
        });
    }

    match kind {
        RecurrenceType::Daily => Ok(Frequency::Daily),
        RecurrenceType::Weekly => {
            let weekdays = detail
                .split(',')
                .map(decode_weekday)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Frequency::weekly(weekdays))
        }
        RecurrenceType::Monthly => decode_monthly(detail).map(|rule| Frequency::Monthly { rule: Some(rule) }),
        RecurrenceType::Yearly => decode_yearly(detail).map(|date| Frequency::Yearly { date: Some(date) }),
    }
}

fn decode_weekday(raw: &str) -> Result<chrono::Weekday, CoreError> {
    let number: u32 = raw
        .parse()
        .map_err(|_| CoreError::invalid_format(format!("invalid weekday: {}", raw)))?;
    weekday_from_number(number)
        .ok_or_else(|| CoreError::invalid_format("weekday must be between 1 and 7"))
}

fn decode_monthly(detail: &str) -> Result<MonthlyRule, CoreError> {
    if detail.eq_ignore_ascii_case("last") {
        return Ok(MonthlyRule::LastDayOfMonth);
    }

    if let Some((week, weekday)) = detail.split_once(['w', 'W']) {
        let week: u32 = week
            .parse()
            .map_err(|_| CoreError::invalid_format(format!("invalid month week pattern: {}", detail)))?;
        let weekday = decode_weekday(weekday)?;
        return MonthlyRule::from_week(week, weekday)
            .ok_or_else(|| CoreError::invalid_format(format!("week must be between 1 and {}", LAST_WEEK)));
    }

    let day: u32 = detail
        .parse()
        .map_err(|_| CoreError::invalid_format(format!("invalid day of month: {}", detail)))?;
    if !(1..=31).contains(&day) {
        return Err(CoreError::invalid_format("day must be between 1 and 31"));
    }
    Ok(MonthlyRule::DayOfMonth(day))
}

fn decode_yearly(detail: &str) -> Result<YearlyDate, CoreError> {
    if detail.len() != 4 || !detail.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::invalid_format("yearly date must be in MMDD format"));
    }
    // Four ASCII digits, so both halves parse.
    let month: u32 = detail[..2].parse().unwrap_or_default();
    let day: u32 = detail[2..].parse().unwrap_or_default();
    YearlyDate::new(month, day)
        .ok_or_else(|| CoreError::invalid_format(format!("invalid yearly date: {}", detail)))
}

fn decode_until(raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| CoreError::invalid_format(format!("invalid until date format: {}", raw)))
}

fn decode_count(raw: &str) -> Result<u32, CoreError> {
    raw.parse::<u32>()
        .ok()
        .filter(|count| *count >= 1)
        .ok_or_else(|| CoreError::invalid_format("count must be a positive integer"))
}

fn encode_detail(frequency: &Frequency) -> String {
    match frequency {
        Frequency::Daily => String::new(),
        Frequency::Weekly { weekdays } => weekdays
            .iter()
            .map(|day| weekday_number(*day).to_string())
            .collect::<Vec<_>>()
            .join(","),
        Frequency::Monthly { rule: None } => String::new(),
        Frequency::Monthly { rule: Some(rule) } => match rule {
            MonthlyRule::DayOfMonth(day) => day.to_string(),
            MonthlyRule::LastDayOfMonth => "last".to_string(),
            MonthlyRule::NthWeekday { week, weekday } => {
                format!("{}w{}", week, weekday_number(*weekday))
            }
            MonthlyRule::LastWeekday(weekday) => {
                format!("{}w{}", LAST_WEEK, weekday_number(*weekday))
            }
        },
        Frequency::Yearly { date: None } => String::new(),
        Frequency::Yearly { date: Some(date) } => format!("{:02}{:02}", date.month(), date.day()),
    }
}

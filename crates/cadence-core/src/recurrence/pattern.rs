use chrono::{NaiveDate, Weekday};
use std::str::FromStr;
use thiserror::Error;

use super::calendar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecurrenceType {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown frequency: {0}")]
pub struct ParseRecurrenceTypeError(String);

impl FromStr for RecurrenceType {
    type Err = ParseRecurrenceTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(RecurrenceType::Daily),
            "weekly" => Ok(RecurrenceType::Weekly),
            "monthly" => Ok(RecurrenceType::Monthly),
            "yearly" => Ok(RecurrenceType::Yearly),
            _ => Err(ParseRecurrenceTypeError(s.to_string())),
        }
    }
}

impl std::fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecurrenceType::Daily => write!(f, "daily"),
            RecurrenceType::Weekly => write!(f, "weekly"),
            RecurrenceType::Monthly => write!(f, "monthly"),
            RecurrenceType::Yearly => write!(f, "yearly"),
        }
    }
}

impl RecurrenceType {
    /// Singular calendar unit one interval step counts in.
    pub fn unit(&self) -> &'static str {
        match self {
            RecurrenceType::Daily => "day",
            RecurrenceType::Weekly => "week",
            RecurrenceType::Monthly => "month",
            RecurrenceType::Yearly => "year",
        }
    }
}

/// Which day of the target month a monthly rule lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthlyRule {
    /// Day 1..=31, clamped to the month's last day when the month is shorter.
    DayOfMonth(u32),
    /// Encoded as `last`.
    LastDayOfMonth,
    /// The `week`-th (1..=4) `weekday`, e.g. the second Wednesday.
    NthWeekday { week: u32, weekday: Weekday },
    /// The last `weekday` of the month, encoded with week `5`.
    LastWeekday(Weekday),
}

/// Week number that means "last" in the `<week>w<weekday>` encoding.
pub const LAST_WEEK: u32 = 5;

impl MonthlyRule {
    /// Maps an encoded week (1..=5) to the matching rule.
    pub fn from_week(week: u32, weekday: Weekday) -> Option<Self> {
        match week {
            1..=4 => Some(MonthlyRule::NthWeekday { week, weekday }),
            LAST_WEEK => Some(MonthlyRule::LastWeekday(weekday)),
            _ => None,
        }
    }
}

/// Fixed month/day of a yearly rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearlyDate {
    month: u32,
    day: u32,
}

impl YearlyDate {
    /// Accepts any day that exists in `month` in at least one year, so
    /// February 29 is valid and April 31 is not.
    pub fn new(month: u32, day: u32) -> Option<Self> {
        let max = calendar::max_days_in_month(month)?;
        (1..=max).contains(&day).then_some(Self { month, day })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

/// Recurrence type together with its type-specific detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    /// Empty `weekdays` repeats on the reference date's own weekday.
    Weekly { weekdays: Vec<Weekday> },
    /// `None` is a well-formed but unresolved rule; computing with it fails.
    Monthly { rule: Option<MonthlyRule> },
    /// `None` repeats on the reference date's month and day.
    Yearly { date: Option<YearlyDate> },
}

impl Frequency {
    pub fn weekly(weekdays: Vec<Weekday>) -> Self {
        Frequency::Weekly {
            weekdays: calendar::normalize_weekdays(weekdays),
        }
    }

    pub fn recurrence_type(&self) -> RecurrenceType {
        match self {
            Frequency::Daily => RecurrenceType::Daily,
            Frequency::Weekly { .. } => RecurrenceType::Weekly,
            Frequency::Monthly { .. } => RecurrenceType::Monthly,
            Frequency::Yearly { .. } => RecurrenceType::Yearly,
        }
    }
}

/// Parsed form of a task's recurrence string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrencePattern {
    pub frequency: Frequency,
    /// Every N units, at least 1
    pub interval: u32,
    /// Inclusive last day an occurrence may fall on
    pub until: Option<NaiveDate>,
    /// Maximum number of instances including the original; 0 is unlimited
    pub count: u32,
}

impl RecurrencePattern {
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: 1,
            until: None,
            count: 0,
        }
    }

    pub fn daily() -> Self {
        Self::new(Frequency::Daily)
    }

    pub fn weekly(weekdays: Vec<Weekday>) -> Self {
        Self::new(Frequency::weekly(weekdays))
    }

    pub fn monthly(rule: MonthlyRule) -> Self {
        Self::new(Frequency::Monthly { rule: Some(rule) })
    }

    pub fn yearly(date: Option<YearlyDate>) -> Self {
        Self::new(Frequency::Yearly { date })
    }

    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn recurrence_type(&self) -> RecurrenceType {
        self.frequency.recurrence_type()
    }

    pub fn is_unlimited(&self) -> bool {
        self.count == 0 && self.until.is_none()
    }
}

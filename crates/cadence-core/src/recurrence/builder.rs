//! Assembling a rule from user-facing options such as `--weekdays mon,fri`.

use chrono::{NaiveDate, Weekday};

use super::calendar::weekday_from_number;
use super::pattern::{
    Frequency, MonthlyRule, RecurrencePattern, RecurrenceType, YearlyDate, LAST_WEEK,
};
use crate::error::CoreError;

/// Parses a weekday given as an English name (`mon`, `Monday`) or as a number
/// from 1 (Monday) to 7 (Sunday).
pub fn parse_weekday(input: &str) -> Result<Weekday, CoreError> {
    let input = input.trim();
    if let Ok(number) = input.parse::<u32>() {
        return weekday_from_number(number)
            .ok_or_else(|| CoreError::InvalidInput(format!("weekday must be between 1 and 7, got {}", number)));
    }
    input
        .parse::<Weekday>()
        .map_err(|_| CoreError::InvalidInput(format!("invalid weekday: {}", input)))
}

#[derive(Debug, Clone)]
pub struct RecurrenceBuilder {
    kind: RecurrenceType,
    interval: u32,
    weekdays: Vec<Weekday>,
    monthly: Option<MonthlyRule>,
    yearly: Option<YearlyDate>,
    until: Option<NaiveDate>,
    count: u32,
}

impl RecurrenceBuilder {
    pub fn new(kind: RecurrenceType) -> Self {
        Self {
            kind,
            interval: 1,
            weekdays: Vec::new(),
            monthly: None,
            yearly: None,
            until: None,
            count: 0,
        }
    }

    pub fn interval(mut self, interval: u32) -> Result<Self, CoreError> {
        if interval < 1 {
            return Err(CoreError::InvalidInput("interval must be at least 1".to_string()));
        }
        self.interval = interval;
        Ok(self)
    }

    pub fn weekdays<S: AsRef<str>>(mut self, names: &[S]) -> Result<Self, CoreError> {
        self.expect_kind(RecurrenceType::Weekly, "weekdays")?;
        for name in names {
            self.weekdays.push(parse_weekday(name.as_ref())?);
        }
        Ok(self)
    }

    pub fn month_day(self, day: u32) -> Result<Self, CoreError> {
        if !(1..=31).contains(&day) {
            return Err(CoreError::InvalidInput("month day must be between 1 and 31".to_string()));
        }
        self.monthly_rule(MonthlyRule::DayOfMonth(day), "month day")
    }

    pub fn last_day(self) -> Result<Self, CoreError> {
        self.monthly_rule(MonthlyRule::LastDayOfMonth, "last day")
    }

    /// `week` 1..=4 picks that occurrence, 5 picks the last one.
    pub fn nth_weekday(self, week: u32, weekday: &str) -> Result<Self, CoreError> {
        let weekday = parse_weekday(weekday)?;
        let rule = MonthlyRule::from_week(week, weekday).ok_or_else(|| {
            CoreError::InvalidInput(format!("week must be between 1 and {}", LAST_WEEK))
        })?;
        self.monthly_rule(rule, "week of month")
    }

    pub fn yearly_date(mut self, month: u32, day: u32) -> Result<Self, CoreError> {
        self.expect_kind(RecurrenceType::Yearly, "yearly date")?;
        let date = YearlyDate::new(month, day).ok_or_else(|| {
            CoreError::InvalidInput(format!("invalid month/day: {:02}/{:02}", month, day))
        })?;
        self.yearly = Some(date);
        Ok(self)
    }

    pub fn until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    pub fn count(mut self, count: u32) -> Result<Self, CoreError> {
        if count < 1 {
            return Err(CoreError::InvalidInput("count must be at least 1".to_string()));
        }
        self.count = count;
        Ok(self)
    }

    pub fn build(self) -> Result<RecurrencePattern, CoreError> {
        let frequency = match self.kind {
            RecurrenceType::Daily => Frequency::Daily,
            RecurrenceType::Weekly => Frequency::weekly(self.weekdays),
            RecurrenceType::Monthly => Frequency::Monthly { rule: self.monthly },
            RecurrenceType::Yearly => Frequency::Yearly { date: self.yearly },
        };

        Ok(RecurrencePattern {
            frequency,
            interval: self.interval,
            until: self.until,
            count: self.count,
        })
    }

    fn monthly_rule(mut self, rule: MonthlyRule, what: &str) -> Result<Self, CoreError> {
        self.expect_kind(RecurrenceType::Monthly, what)?;
        if self.monthly.is_some() {
            return Err(CoreError::InvalidInput(
                "a monthly rule takes only one of month day, last day or week of month".to_string(),
            ));
        }
        self.monthly = Some(rule);
        Ok(self)
    }

    fn expect_kind(&self, expected: RecurrenceType, what: &str) -> Result<(), CoreError> {
        if self.kind != expected {
            return Err(CoreError::InvalidInput(format!(
                "{} only applies to {} recurrence, not {}",
                what, expected, self.kind
            )));
        }
        Ok(())
    }
}

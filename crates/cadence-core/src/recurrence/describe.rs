use super::calendar::{month_name, weekday_name};
use super::pattern::{Frequency, MonthlyRule, RecurrencePattern, RecurrenceType};

const ORDINALS: [&str; 4] = ["first", "second", "third", "fourth"];

impl RecurrencePattern {
    /// Short label for list views, e.g. `Weekly` or `Every 3 days`.
    pub fn summary(&self) -> String {
        let kind = self.recurrence_type();
        if self.interval == 1 {
            match kind {
                RecurrenceType::Daily => "Daily",
                RecurrenceType::Weekly => "Weekly",
                RecurrenceType::Monthly => "Monthly",
                RecurrenceType::Yearly => "Yearly",
            }
            .to_string()
        } else {
            format!("Every {} {}s", self.interval, kind.unit())
        }
    }

    /// Full sentence for detail views, e.g.
    /// `Every 2 weeks on Monday, Wednesday, until 2025-06-30`.
    pub fn describe(&self) -> String {
        let mut text = self.summary();

        match &self.frequency {
            Frequency::Daily => {}
            Frequency::Weekly { weekdays } => {
                if !weekdays.is_empty() {
                    let names: Vec<&str> = weekdays.iter().map(|d| weekday_name(*d)).collect();
                    text.push_str(&format!(" on {}", names.join(", ")));
                }
            }
            Frequency::Monthly { rule } => match rule {
                Some(MonthlyRule::DayOfMonth(day)) => text.push_str(&format!(" on day {}", day)),
                Some(MonthlyRule::LastDayOfMonth) => text.push_str(" on the last day"),
                Some(MonthlyRule::NthWeekday { week, weekday }) => {
                    let ordinal = ORDINALS
                        .get(week.saturating_sub(1) as usize)
                        .copied()
                        .unwrap_or("last");
                    text.push_str(&format!(" on the {} {}", ordinal, weekday_name(*weekday)));
                }
                Some(MonthlyRule::LastWeekday(weekday)) => {
                    text.push_str(&format!(" on the last {}", weekday_name(*weekday)))
                }
                None => text.push_str(" (day not specified)"),
            },
            Frequency::Yearly { date } => {
                if let Some(date) = date {
                    if let Some(month) = month_name(date.month()) {
                        text.push_str(&format!(" on {} {}", month, date.day()));
                    }
                }
            }
        }

        if let Some(until) = self.until {
            text.push_str(&format!(", until {}", until.format("%Y-%m-%d")));
        }
        match self.count {
            0 => {}
            1 => text.push_str(", 1 time"),
            n => text.push_str(&format!(", {} times", n)),
        }

        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::codec::decode;
    use rstest::rstest;

    #[rstest]
    #[case("daily:1:", "Daily")]
    #[case("daily:3:", "Every 3 days")]
    #[case("weekly:1:", "Weekly")]
    #[case("weekly:2:1,3", "Every 2 weeks")]
    #[case("monthly:1:15", "Monthly")]
    #[case("yearly:5:", "Every 5 years")]
    fn test_summary(#[case] rule: &str, #[case] expected: &str) {
        assert_eq!(decode(rule).unwrap().summary(), expected);
    }

    #[rstest]
    #[case("daily:1:", "Daily")]
    #[case("weekly:2:1,3", "Every 2 weeks on Monday, Wednesday")]
    #[case("monthly:1:15", "Monthly on day 15")]
    #[case("monthly:1:last", "Monthly on the last day")]
    #[case("monthly:1:2w3", "Monthly on the second Wednesday")]
    #[case("monthly:1:5w5", "Monthly on the last Friday")]
    #[case("monthly:1:", "Monthly (day not specified)")]
    #[case("yearly:1:0315", "Yearly on March 15")]
    #[case("yearly:1:", "Yearly")]
    #[case("daily:1::until:2025-06-30", "Daily, until 2025-06-30")]
    #[case("weekly:1:7:count:10", "Weekly on Sunday, 10 times")]
    #[case("daily:2::until:2025-01-01:count:1", "Every 2 days, until 2025-01-01, 1 time")]
    fn test_describe(#[case] rule: &str, #[case] expected: &str) {
        assert_eq!(decode(rule).unwrap().describe(), expected);
    }
}

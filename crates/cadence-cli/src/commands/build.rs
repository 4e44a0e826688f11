use anyhow::Result;
use cadence_core::error::CoreError;
use cadence_core::recurrence::{encode, next_occurrence, RecurrenceBuilder};
use chrono::NaiveDateTime;
use owo_colors::OwoColorize;

use crate::cli::BuildCommand;
use crate::config::Config;
use crate::parser::{parse_date, parse_date_time, parse_month_day};

pub fn build_rule(command: BuildCommand, config: &Config, now: NaiveDateTime) -> Result<()> {
    let mut builder = RecurrenceBuilder::new(command.every.recurrence_type());

    if let Some(interval) = command.interval {
        builder = builder.interval(interval)?;
    }

    let implied = command.every.implied_weekdays();
    if !implied.is_empty() {
        builder = builder.weekdays(implied)?;
    }
    if !command.weekdays.is_empty() {
        builder = builder.weekdays(&command.weekdays)?;
    }

    if let Some(day) = command.monthday {
        builder = builder.month_day(day)?;
    }
    if command.last_day {
        builder = builder.last_day()?;
    }
    if let (Some(week), Some(weekday)) = (command.week, command.weekday.as_deref()) {
        builder = builder.nth_weekday(week, weekday)?;
    }

    if let Some(date) = command.date.as_deref() {
        let (month, day) = parse_month_day(date)?;
        builder = builder.yearly_date(month, day)?;
    }

    if let Some(until) = command.until.as_deref() {
        builder = builder.until(parse_date(until, now)?);
    }
    if let Some(count) = command.count {
        builder = builder.count(count)?;
    }

    let pattern = builder.build()?;
    let from = match command.from.as_deref() {
        Some(input) => parse_date_time(input, now)?,
        None => now,
    };

    println!("{}", encode(&pattern));
    println!("{} {}", "Meaning:".bold(), pattern.describe());

    match next_occurrence(&pattern, from) {
        Ok(next) => println!(
            "{} {}",
            "Next occurrence:".bold(),
            next.format(&config.date_format).green()
        ),
        Err(CoreError::RecurrenceEnded(reason)) => {
            println!("{} none, {}", "Next occurrence:".bold(), reason)
        }
        Err(CoreError::AmbiguousRule(msg)) => {
            println!("{} {}", "Warning:".yellow().bold(), msg)
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

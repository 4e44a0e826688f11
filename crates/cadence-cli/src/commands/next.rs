use anyhow::Result;
use cadence_core::recurrence::{decode, upcoming};
use chrono::NaiveDateTime;
use owo_colors::OwoColorize;

use crate::cli::NextCommand;
use crate::config::Config;
use crate::parser::parse_date_time;
use crate::views::table::display_occurrences;

pub fn next_occurrences(command: NextCommand, config: &Config, now: NaiveDateTime) -> Result<()> {
    let pattern = decode(&command.rule)?;
    let from = match command.from.as_deref() {
        Some(input) => parse_date_time(input, now)?,
        None => now,
    };
    let limit = command.count.unwrap_or(config.preview_count);

    let occurrences = upcoming(&pattern, from, command.instance, limit)?;

    println!("{} {}", "Rule:".bold(), pattern.describe());
    println!("{} {}", "From:".bold(), from.format(&config.date_format));
    display_occurrences(&occurrences, now, &config.date_format);

    if occurrences.len() < limit {
        println!("{}", "The series ends here.".dimmed());
    }

    Ok(())
}

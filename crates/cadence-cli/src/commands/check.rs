use anyhow::Result;
use cadence_core::recurrence::{decode, encode, Frequency};
use owo_colors::OwoColorize;

use crate::cli::CheckCommand;

pub fn check_rule(command: CheckCommand) -> Result<()> {
    let pattern = decode(&command.rule)?;

    println!("{} {}", "Rule:".bold(), encode(&pattern).green());
    println!("{} {}", "Meaning:".bold(), pattern.describe());
    if pattern.is_unlimited() {
        println!("{} never", "Ends:".bold());
    }

    if matches!(pattern.frequency, Frequency::Monthly { rule: None }) {
        println!(
            "{} no day of the month is set, so no occurrence can be computed",
            "Warning:".yellow().bold()
        );
    }

    Ok(())
}

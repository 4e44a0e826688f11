use anyhow::{Context, Result};
use cadence_core::models::{CompletionResult, Task};
use cadence_core::recurrence::complete_task;
use chrono::NaiveDateTime;
use owo_colors::OwoColorize;
use std::fs;
use tracing::debug;

use crate::cli::CompleteCommand;
use crate::config::Config;
use crate::parser::parse_date_time;
use crate::views::table::{display_tasks, ViewTask};

pub fn complete(command: CompleteCommand, config: &Config, now: NaiveDateTime) -> Result<()> {
    let completed_at = match command.at.as_deref() {
        Some(input) => parse_date_time(input, now)?,
        None => now,
    };

    let json = fs::read_to_string(&command.task)
        .with_context(|| format!("Failed to read task file '{}'", command.task.display()))?;
    let task = Task::from_json(&json)
        .with_context(|| format!("Failed to parse task from '{}'", command.task.display()))?;
    debug!(task_id = %task.id, %completed_at, "completing task");

    let result = complete_task(&task, completed_at)?;

    if command.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match &result {
        CompletionResult::Single { completed } => {
            println!("Completed task: '{}'", completed.description);
        }
        CompletionResult::Recurring { completed, next } => {
            println!("Completed task: '{}'", completed.description);
            if let Some(due) = next.due_date {
                println!(
                    "Created recurring task '{}' for {}",
                    next.description,
                    due.format(&config.date_format).green()
                );
            }
        }
        CompletionResult::SeriesEnded { completed, reason } => {
            println!("Completed task: '{}'", completed.description);
            println!("{} {}", "Recurring series has ended:".yellow(), reason);
        }
    }

    let mut rows = vec![ViewTask::from_task("Completed", result.completed())];
    if let Some(next) = result.next() {
        rows.push(ViewTask::from_new_task("Next", next));
    }
    display_tasks(&rows, now, &config.date_format);

    Ok(())
}

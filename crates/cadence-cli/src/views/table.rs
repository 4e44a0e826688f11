use chrono::{Datelike, NaiveDateTime};
use chrono_humanize::Humanize;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use cadence_core::models::{NewTaskData, Task, TaskPriority, TaskStatus};
use cadence_core::recurrence::{calendar::weekday_name, RecurrencePattern};

/// A task row, whether it already exists or is only a payload.
#[derive(Debug, Clone)]
pub struct ViewTask {
    pub role: &'static str,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDateTime>,
    pub start_date: Option<NaiveDateTime>,
    pub recurrence: Option<String>,
    pub tags: Vec<String>,
}

impl ViewTask {
    pub fn from_task(role: &'static str, task: &Task) -> Self {
        Self {
            role,
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            due_date: task.due_date,
            start_date: task.start_date,
            recurrence: task.recurrence.clone(),
            tags: task.tags.clone(),
        }
    }

    pub fn from_new_task(role: &'static str, task: &NewTaskData) -> Self {
        Self {
            role,
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            due_date: task.due_date,
            start_date: task.start_date,
            recurrence: task.recurrence.clone(),
            tags: task.tags.clone(),
        }
    }
}

pub fn display_tasks(tasks: &[ViewTask], now: NaiveDateTime, date_format: &str) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["", "Description", "Status", "Due Date", "Start", "Repeats", "Tags"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.role).add_attribute(Attribute::Bold));

        let mut name_cell = Cell::new(&task.description);
        match task.status {
            TaskStatus::Completed | TaskStatus::Cancelled => {
                name_cell = name_cell
                    .add_attribute(Attribute::CrossedOut)
                    .fg(Color::DarkGrey);
            }
            _ => {
                name_cell = match task.priority {
                    Some(TaskPriority::High) => name_cell.fg(Color::Red).add_attribute(Attribute::Bold),
                    Some(TaskPriority::Medium) => name_cell.fg(Color::Yellow),
                    Some(TaskPriority::Low) => name_cell.fg(Color::Green),
                    None => name_cell,
                };
            }
        };
        row.add_cell(name_cell);

        let status_cell = Cell::new(task.status.to_string());
        row.add_cell(match task.status {
            TaskStatus::Completed => status_cell.fg(Color::Green),
            TaskStatus::Cancelled => status_cell.fg(Color::DarkGrey),
            _ => status_cell,
        });

        let due_date_cell = match task.due_date {
            Some(due) => {
                let text = format!("{} ({})", due.format(date_format), (due - now).humanize());
                if task.status == TaskStatus::Pending && due < now {
                    Cell::new(text).fg(Color::Red) // Overdue
                } else if due.date() == now.date() {
                    Cell::new(text).fg(Color::Yellow) // Due today
                } else {
                    Cell::new(text)
                }
            }
            None => Cell::new("None"),
        };
        row.add_cell(due_date_cell);

        row.add_cell(Cell::new(
            task.start_date
                .map(|start| start.format(date_format).to_string())
                .unwrap_or_else(|| "None".to_string()),
        ));

        // Stored rules are shown as written if they no longer decode
        let repeats = task.recurrence.as_deref().map(|rule| {
            rule.parse::<RecurrencePattern>()
                .map(|pattern| pattern.describe())
                .unwrap_or_else(|_| rule.to_string())
        });
        row.add_cell(Cell::new(repeats.as_deref().unwrap_or("None")));

        row.add_cell(Cell::new(if task.tags.is_empty() {
            "None".to_string()
        } else {
            task.tags.join(", ")
        }));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_occurrences(occurrences: &[NaiveDateTime], now: NaiveDateTime, date_format: &str) {
    if occurrences.is_empty() {
        println!("No upcoming occurrences.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Date", "Day", "When"]);

    for (i, occurrence) in occurrences.iter().enumerate() {
        let mut row = Row::new();
        row.add_cell(Cell::new(i + 1));
        row.add_cell(Cell::new(occurrence.format(date_format)));
        row.add_cell(Cell::new(weekday_name(occurrence.weekday())));
        row.add_cell(Cell::new((*occurrence - now).humanize()).fg(Color::Cyan));
        table.add_row(row);
    }

    println!("{table}");
}

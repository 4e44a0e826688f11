use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::error::{CoreError, EndReason};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Active,
    Paused,
    Completed,
    Cancelled,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task status: {0}")]
pub struct ParseTaskStatusError(String);

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "active" => Ok(TaskStatus::Active),
            "paused" => Ok(TaskStatus::Paused),
            "completed" => Ok(TaskStatus::Completed),
            "cancelled" => Ok(TaskStatus::Cancelled),
            _ => Err(ParseTaskStatusError(s.to_string())),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Active => write!(f, "active"),
            TaskStatus::Paused => write!(f, "paused"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    #[serde(alias = "H")]
    High,
    #[serde(alias = "M")]
    Medium,
    #[serde(alias = "L")]
    Low,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task priority: {0}")]
pub struct ParseTaskPriorityError(String);

impl FromStr for TaskPriority {
    type Err = ParseTaskPriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "h" | "high" => Ok(TaskPriority::High),
            "m" | "medium" => Ok(TaskPriority::Medium),
            "l" | "low" => Ok(TaskPriority::Low),
            _ => Err(ParseTaskPriorityError(s.to_string())),
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskPriority::High => write!(f, "H"),
            TaskPriority::Medium => write!(f, "M"),
            TaskPriority::Low => write!(f, "L"),
        }
    }
}

/// A task record as handed over by the task store.
///
/// Dates are naive: they are interpreted in the single reference location the
/// caller works in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub project_id: Option<Uuid>,
    /// Encoded recurrence rule, see [`crate::recurrence::codec`]
    #[serde(default)]
    pub recurrence: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Task this one depends on
    #[serde(default)]
    pub dependent_id: Option<Uuid>,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7(),
            description: String::new(),
            status: TaskStatus::Pending,
            priority: None,
            due_date: None,
            start_date: None,
            completed_at: None,
            project_id: None,
            recurrence: None,
            tags: Vec::new(),
            notes: None,
            dependent_id: None,
        }
    }
}

impl Task {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// True when the task carries a non-blank recurrence rule.
    pub fn is_recurring(&self) -> bool {
        self.recurrence
            .as_deref()
            .is_some_and(|rule| !rule.trim().is_empty())
    }
}

/// Payload for a task the store should insert. The store assigns the id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewTaskData {
    pub description: String,
    pub status: TaskStatus,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDateTime>,
    pub start_date: Option<NaiveDateTime>,
    pub project_id: Option<Uuid>,
    pub recurrence: Option<String>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub dependent_id: Option<Uuid>,
}

impl NewTaskData {
    /// Materializes the payload with a fresh id, the way a store would.
    pub fn into_task(self) -> Task {
        Task {
            id: Uuid::now_v7(),
            description: self.description,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            start_date: self.start_date,
            completed_at: None,
            project_id: self.project_id,
            recurrence: self.recurrence,
            tags: self.tags,
            notes: self.notes,
            dependent_id: self.dependent_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompletionResult {
    Single {
        completed: Task,
    },
    Recurring {
        completed: Task,
        next: NewTaskData,
    },
    /// The task recurred but its series is over, so there is no successor.
    SeriesEnded {
        completed: Task,
        reason: EndReason,
    },
}

impl CompletionResult {
    pub fn completed(&self) -> &Task {
        match self {
            CompletionResult::Single { completed }
            | CompletionResult::Recurring { completed, .. }
            | CompletionResult::SeriesEnded { completed, .. } => completed,
        }
    }

    pub fn next(&self) -> Option<&NewTaskData> {
        match self {
            CompletionResult::Recurring { next, .. } => Some(next),
            _ => None,
        }
    }
}

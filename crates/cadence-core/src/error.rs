use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid recurrence format: {0}")]
    InvalidFormat(String),

    #[error("Ambiguous recurrence rule: {0}")]
    AmbiguousRule(String),

    #[error("Recurrence has ended ({0})")]
    RecurrenceEnded(EndReason),

    #[error("Task does not have a recurrence pattern")]
    NotRecurring,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

/// Why a series stopped producing instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum EndReason {
    /// The next occurrence would fall after this inclusive bound.
    Until(NaiveDate),
    /// This many instances already exist.
    Count(u32),
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndReason::Until(date) => write!(f, "until date {} reached", date.format("%Y-%m-%d")),
            EndReason::Count(count) => write!(f, "count limit of {} reached", count),
        }
    }
}

impl CoreError {
    pub(crate) fn invalid_format(msg: impl Into<String>) -> Self {
        CoreError::InvalidFormat(msg.into())
    }

    /// True when the error only says the series is over.
    pub fn is_recurrence_ended(&self) -> bool {
        matches!(self, CoreError::RecurrenceEnded(_))
    }
}

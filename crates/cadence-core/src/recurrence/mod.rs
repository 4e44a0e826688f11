//! Recurrence engine: rule codec, occurrence arithmetic, and successor
//! generation for completed tasks.

pub mod builder;
pub mod calendar;
pub mod codec;
mod describe;
pub mod generator;
pub mod occurrence;
pub mod pattern;
pub mod state;

pub use builder::{parse_weekday, RecurrenceBuilder};
pub use codec::{decode, encode};
pub use generator::{complete_task, generate_next, NextInstance};
pub use occurrence::{next_occurrence, upcoming};
pub use pattern::{
    Frequency, MonthlyRule, ParseRecurrenceTypeError, RecurrencePattern, RecurrenceType,
    YearlyDate, LAST_WEEK,
};
pub use state::RecurrenceState;

//! # Cadence Core Library
//!
//! A recurrence engine for task lists. Rules are stored as compact strings
//! such as `weekly:2:1,3` or `monthly:1:last:count:12`, and completing a
//! recurring task yields the payload of its successor.
//!
//! ## Core Modules
//!
//! - [`recurrence`]: Rule codec, occurrence calculation, and instance generation
//! - [`models`]: Task data and completion results
//! - [`error`]: Error types shared by every operation
//!
//! ## Example Usage
//!
//! ```rust
//! use cadence_core::{models::Task, recurrence::complete_task};
//! use chrono::NaiveDate;
//!
//! # fn main() -> Result<(), cadence_core::error::CoreError> {
//! let due = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let task = Task {
//!     description: "Pay rent".to_string(),
//!     due_date: Some(due),
//!     recurrence: Some("monthly:1:last".to_string()),
//!     ..Default::default()
//! };
//!
//! let result = complete_task(&task, due)?;
//! let next = result.next().unwrap();
//! assert_eq!(next.due_date.unwrap().date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod recurrence;

pub use error::{CoreError, EndReason};
pub use recurrence::{RecurrencePattern, RecurrenceType};

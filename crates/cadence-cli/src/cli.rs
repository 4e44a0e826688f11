use clap::{Parser, Subcommand, ValueEnum};
use cadence_core::recurrence::RecurrenceType;
use std::path::PathBuf;

/// Check, preview and build task recurrence rules
#[derive(Parser, Debug)]
#[command(name = "cadence", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate a recurrence rule and explain it
    Check(CheckCommand),
    /// Show the next occurrences of a rule
    Next(NextCommand),
    /// Assemble a rule from options
    Build(BuildCommand),
    /// Complete a task read from a JSON file and produce its successor
    Complete(CompleteCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct CheckCommand {
    /// The encoded rule, e.g. "weekly:2:1,3"
    pub rule: String,
}

#[derive(Parser, Debug, Clone)]
pub struct NextCommand {
    /// The encoded rule, e.g. "monthly:1:last"
    pub rule: String,
    /// Date to count from (defaults to now)
    #[arg(long, help = "Reference date, e.g. '2025-03-01', '2025-03-01 09:00' or 'next friday'")]
    pub from: Option<String>,
    /// Number of occurrences to show
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
    /// How many instances of the series already exist
    #[arg(long, default_value_t = 1)]
    pub instance: u32,
}

/// Human-friendly recurrence patterns
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceShortcut {
    /// Every day
    Daily,
    /// Every week
    Weekly,
    /// Every month
    Monthly,
    /// Every year
    Yearly,
    /// Monday to Friday
    Weekdays,
    /// Saturday and Sunday
    Weekends,
}

impl RecurrenceShortcut {
    pub fn recurrence_type(&self) -> RecurrenceType {
        match self {
            RecurrenceShortcut::Daily => RecurrenceType::Daily,
            RecurrenceShortcut::Weekly
            | RecurrenceShortcut::Weekdays
            | RecurrenceShortcut::Weekends => RecurrenceType::Weekly,
            RecurrenceShortcut::Monthly => RecurrenceType::Monthly,
            RecurrenceShortcut::Yearly => RecurrenceType::Yearly,
        }
    }

    /// Weekdays implied by the shortcut itself
    pub fn implied_weekdays(&self) -> &'static [&'static str] {
        match self {
            RecurrenceShortcut::Weekdays => &["mon", "tue", "wed", "thu", "fri"],
            RecurrenceShortcut::Weekends => &["sat", "sun"],
            _ => &[],
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct BuildCommand {
    /// How often the task repeats
    #[arg(long, value_enum)]
    pub every: RecurrenceShortcut,
    /// Repeat every N units instead of every one
    #[arg(long)]
    pub interval: Option<u32>,
    /// Days of week for weekly recurrence
    #[arg(long, value_delimiter = ',', help = "Days of week (mon,tue,wed,thu,fri,sat,sun or 1-7)")]
    pub weekdays: Vec<String>,
    /// Day of the month for monthly recurrence
    #[arg(long, conflicts_with_all = ["last_day", "week"])]
    pub monthday: Option<u32>,
    /// Last day of the month for monthly recurrence
    #[arg(long, conflicts_with = "week")]
    pub last_day: bool,
    /// Week of the month (1-4, 5 for the last one)
    #[arg(long, requires = "weekday")]
    pub week: Option<u32>,
    /// Weekday used together with --week
    #[arg(long, requires = "week")]
    pub weekday: Option<String>,
    /// Month and day for yearly recurrence
    #[arg(long, help = "Month and day as MMDD, e.g. '0315'")]
    pub date: Option<String>,
    /// End date for recurrence
    #[arg(long, help = "End date for recurrence (e.g., '2025-12-31')")]
    pub until: Option<String>,
    /// Maximum number of occurrences
    #[arg(long)]
    pub count: Option<u32>,
    /// Date the first occurrence is computed from (defaults to now)
    #[arg(long)]
    pub from: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompleteCommand {
    /// Path to a JSON file holding the task
    pub task: PathBuf,
    /// Completion time (defaults to now)
    #[arg(long)]
    pub at: Option<String>,
    /// Print the completion result as JSON
    #[arg(long)]
    pub json: bool,
}

use cadence_core::error::CoreError;
use chrono::Local;
use clap::Parser;
use owo_colors::{OwoColorize, Style};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod parser;
mod views;

fn main() {
    init_tracing();

    let config = config::Config::new()
        .unwrap_or_else(|e| {
            warn!(error = %e, "failed to load configuration, using defaults");
            config::Config::default()
        })
        .sanitized();

    let cli = cli::Cli::parse();
    let now = Local::now().naive_local();

    let result = match cli.command {
        cli::Commands::Check(command) => commands::check::check_rule(command),
        cli::Commands::Next(command) => commands::next::next_occurrences(command, &config, now),
        cli::Commands::Build(command) => commands::build::build_rule(command, &config, now),
        cli::Commands::Complete(command) => commands::complete::complete(command, &config, now),
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output stays clean. `RUST_LOG` overrides the
/// default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();
    let core_error = err.chain().find_map(|e| e.downcast_ref::<CoreError>());

    match core_error {
        Some(CoreError::InvalidFormat(s)) => {
            eprintln!("{} Invalid recurrence rule: {}", "Error:".style(error_style), s);
            eprintln!(
                "Expected {}",
                "<type>:<interval>:<detail>[:until:YYYY-MM-DD][:count:N]".yellow()
            );
        }
        Some(CoreError::AmbiguousRule(s)) => {
            eprintln!("{} {}", "Error:".style(error_style), s);
            eprintln!(
                "Add a day such as {} or {} to the rule",
                "monthly:1:15".yellow(),
                "monthly:1:last".yellow()
            );
        }
        Some(CoreError::RecurrenceEnded(reason)) => {
            eprintln!("{} Recurring series has ended: {}", "Error:".style(error_style), reason);
        }
        Some(CoreError::InvalidInput(s)) => {
            eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
        }
        _ => eprintln!("{} {:#}", "Error:".style(error_style), err),
    }
}

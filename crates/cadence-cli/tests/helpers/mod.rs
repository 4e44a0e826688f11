use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test harness running the binary inside a scratch directory, so config
/// files and task files never leak between tests
pub struct CliTestHarness {
    temp_dir: TempDir,
}

impl CliTestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("cadence").expect("Failed to find cadence binary");
        cmd.current_dir(self.temp_dir.path())
            .env("CADENCE_CONFIG", self.temp_dir.path().join("cadence.toml"))
            .env_remove("CADENCE_PREVIEW_COUNT")
            .env_remove("CADENCE_DATE_FORMAT")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn write_config(&self, contents: &str) {
        fs::write(self.temp_dir.path().join("cadence.toml"), contents)
            .expect("Failed to write config");
    }

    /// Writes a task file and returns its path
    pub fn write_task(&self, name: &str, json: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, json).expect("Failed to write task file");
        path
    }

    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }
}

/// Common test fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub fn recurring_task_json(rule: &str) -> String {
        format!(
            r#"{{
                "id": "0190a8e2-5b7c-7d4e-9f00-3c2b1a000042",
                "description": "Water the plants",
                "status": "pending",
                "priority": "M",
                "due_date": "2024-03-10T09:00:00",
                "start_date": "2024-03-08T09:00:00",
                "recurrence": "{}",
                "tags": ["home"]
            }}"#,
            rule
        )
    }

    pub fn single_task_json() -> &'static str {
        r#"{
            "id": "0190a8e2-5b7c-7d4e-9f00-3c2b1a000043",
            "description": "Renew passport"
        }"#
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use predicates::prelude::*;

    pub fn has_occurrence_table_headers() -> impl Predicate<str> {
        predicate::str::contains("Date")
            .and(predicate::str::contains("Day"))
            .and(predicate::str::contains("When"))
    }

    pub fn task_completed_successfully() -> impl Predicate<str> {
        predicate::str::contains("Completed task")
    }

    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error")
    }
}

//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing: an isolated
//! test environment with its own data directory and command builders
//! with the ambient environment scrubbed.

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Environment variables that would leak host state into tests.
const SCRUBBED_VARS: [&str; 6] = [
    "PANTRY_DATA_DIR",
    "PANTRY_USER",
    "PANTRY_USER_NAME",
    "PANTRY_BUSY_TIMEOUT",
    "PANTRY_OUTPUT_FORMAT",
    "PANTRY_DISABLE_AUTOINIT",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the pantry data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("pantry-data");
        Self { temp_dir, data_dir }
    }

    /// Get a bare command builder without pre-configured flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("pantry").expect("Failed to find pantry binary");
        for var in SCRUBBED_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get a command builder acting as the given user.
    pub fn command_as(&self, user: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("--user").arg(user);
        cmd
    }

    /// Add an item as the given user and return its id.
    ///
    /// # Panics
    /// Panics if the add command fails.
    pub fn add_item(&self, user: &str, name: &str, quantity: u32) -> String {
        let output = self
            .command_as(user)
            .arg("add")
            .arg(name)
            .arg("--quantity")
            .arg(quantity.to_string())
            .output()
            .expect("Failed to run add command");

        assert!(
            output.status.success(),
            "Add failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_string()
    }

    /// Run `list --format json` and parse the output.
    pub fn list_json(&self) -> serde_json::Value {
        let output = self
            .command()
            .arg("list")
            .arg("--format")
            .arg("json")
            .output()
            .expect("Failed to run list command");
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).expect("list output is not valid JSON")
    }
}

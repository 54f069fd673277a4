//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing:
//! - Test environment setup with temporary directories
//! - Command builder helpers isolated from the caller's environment
//! - Configuration file fixtures

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// A catalogue with one broker-only alias and one profile-scoped group.
#[allow(dead_code)]
pub const SMALL_CATALOGUE: &str = "\
mappings:
  - unified: camunda.cluster.node-id
    legacy:
      - key: zeebe.broker.cluster.nodeId
        profiles: [broker]
  - unified: camunda.api.long-polling.enabled
    legacy:
      - - key: zeebe.gateway.longPolling.enabled
          profiles: [gateway]
        - key: zeebe.broker.gateway.longPolling.enabled
          profiles: [broker]
";

/// Test environment with an isolated working directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder for the unicfg binary.
    ///
    /// Variables the CLI reads are cleared so the caller's environment
    /// cannot leak into the test.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("unicfg").expect("Failed to find unicfg binary");
        cmd.current_dir(&self.temp_path)
            .env_remove("UNICFG_PROFILES")
            .env_remove("UNICFG_CATALOGUE")
            .env_remove("UNICFG_LOG_MODE");
        cmd
    }

    /// Write a file into the test environment and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }
}

//! Shared integration-test harness for running the `cmdtree` binary.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Environment variables the binary reads; cleared so the host cannot leak in.
const CMDTREE_ENV: &[&str] = &[
    "CMDTREE_ROOT",
    "CMDTREE_PROG",
    "CMDTREE_INDEX_MARKER",
    "CMDTREE_EXTENSION",
    "CMDTREE_MAX_MANIFEST_SIZE",
    "CMDTREE_COLOR",
    "CMDTREE_LOG_FORMAT",
    "CMDTREE_LOG_LEVEL",
];

/// Runs the `cmdtree` binary to completion.
pub struct CmdTreeProcess;

impl CmdTreeProcess {
    /// Runs `cmdtree` with the given arguments and captures its output.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command(args: &[&str]) -> Output {
        let mut command = Command::new(env!("CARGO_BIN_EXE_cmdtree"));
        for var in CMDTREE_ENV {
            command.env_remove(var);
        }
        command
            .env("NO_COLOR", "1")
            .args(args)
            .output()
            .expect("failed to run cmdtree")
    }

    /// Runs `cmdtree run` against `root`, passing `args` to the dispatcher.
    pub fn run_in(root: &Path, prog: &str, args: &[&str]) -> Output {
        let root = root.to_string_lossy();
        let mut full = vec!["run", "--root", &*root, "--prog", prog, "--format", "json", "--"];
        full.extend_from_slice(args);
        Self::spawn_command(&full)
    }

    /// Returns the path to a test fixture.
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }
}

/// Stdout of a process as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a process as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

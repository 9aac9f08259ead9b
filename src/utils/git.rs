//! Git command wrappers
//!
//! Thin helpers over [`CommandRunner`] for the handful of git operations
//! publishing needs. Failures keep git's own exit code.

use crate::{
    error::{Result, ShipError},
    utils::process::{CommandRunner, command_line},
};
use tracing::{debug, warn};

/// Runs git subcommands through a [`CommandRunner`]
pub struct Git<'a, R: CommandRunner> {
    runner: &'a R,
}

impl<'a, R: CommandRunner> Git<'a, R> {
    pub const fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    pub fn add(&self, path: &str) -> Result<()> {
        self.runner.run_command("git", &["add", path])
    }

    /// Whether the index differs from `HEAD`.
    ///
    /// `git diff --cached --quiet` exits 1 for a difference; any other
    /// non-zero status is a git failure.
    pub fn has_staged_changes(&self) -> Result<bool> {
        let args = ["diff", "--cached", "--quiet"];
        let result = self.runner.capture("git", &args)?;
        debug!("Staged diff exit code: {:?}", result.exit_code);

        match result.exit_code {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            exit_code => {
                warn!("git diff failed: {}", result.stderr.trim());
                Err(ShipError::process(
                    command_line("git", &args),
                    exit_code,
                    result.stdout,
                    result.stderr,
                ))
            }
        }
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        self.runner.run_command("git", &["commit", "-m", message])
    }

    /// Push the current branch to `branch` on `remote`
    pub fn push(&self, remote: &str, branch: &str) -> Result<()> {
        let refspec = format!("HEAD:{branch}");
        self.runner.run_command("git", &["push", remote, &refspec])
    }

    pub fn remote_url(&self, remote: &str) -> Result<String> {
        let result = self
            .runner
            .run_command_with_output("git", &["remote", "get-url", remote])?;
        Ok(result.stdout.trim().to_string())
    }
}

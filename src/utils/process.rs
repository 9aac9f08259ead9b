//! Process execution utilities
//!
//! Provides process execution with proper error handling and logging, behind
//! the [`CommandRunner`] trait so the workflows can be driven by a scripted
//! runner in tests.

use crate::error::{Result, ShipError};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, info, instrument};

/// Result of a process execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessResult {
    /// Exit status code (`None` when terminated by a signal)
    pub exit_code: Option<i32>,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// Whether the process was successful
    pub success: bool,
}

impl ProcessResult {
    /// A successful result with the given stdout
    #[must_use]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
        }
    }

    /// A failed result with the given exit code
    #[must_use]
    pub fn failed(exit_code: i32) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: String::new(),
            success: false,
        }
    }
}

/// Formats a command line for logs and error messages
pub(crate) fn command_line(command: &str, args: &[&str]) -> String {
    if args.is_empty() {
        command.to_string()
    } else {
        format!("{} {}", command, args.join(" "))
    }
}

/// External command execution used by the workflows
pub trait CommandRunner {
    /// Run a command with stdout/stderr inherited and return its exit code
    /// without judging it. Only a failure to spawn is an error.
    fn run_inherited(&self, command: &str, args: &[&str]) -> Result<Option<i32>>;

    /// Run a command capturing its output. A non-zero exit is not an error.
    fn capture(&self, command: &str, args: &[&str]) -> Result<ProcessResult>;

    /// Check whether a command can be located as an executable
    fn command_exists(&self, command: &str) -> bool;

    /// Run a command with inherited stdio, failing on a non-zero exit
    fn run_command(&self, command: &str, args: &[&str]) -> Result<()> {
        let exit_code = self.run_inherited(command, args)?;
        if exit_code == Some(0) {
            Ok(())
        } else {
            Err(ShipError::process(
                command_line(command, args),
                exit_code,
                String::new(),
                format!("Command failed with exit code: {exit_code:?}"),
            ))
        }
    }

    /// Run a command capturing its output, failing on a non-zero exit
    fn run_command_with_output(&self, command: &str, args: &[&str]) -> Result<ProcessResult> {
        let result = self.capture(command, args)?;
        if !result.success {
            debug!("Command stderr: {}", result.stderr);
            return Err(ShipError::process(
                command_line(command, args),
                result.exit_code,
                result.stdout,
                result.stderr,
            ));
        }
        Ok(result)
    }
}

/// Utility for running external processes in a working directory
#[derive(Debug)]
pub struct ProcessRunner {
    debug: bool,
    work_dir: PathBuf,
}

impl ProcessRunner {
    /// Create a new process runner operating in `work_dir`
    #[must_use]
    pub fn new(debug: bool, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            debug,
            work_dir: work_dir.into(),
        }
    }

    fn spawn_error(cmd_str: String, e: &std::io::Error) -> ShipError {
        ShipError::process(
            cmd_str,
            None,
            String::new(),
            format!("Failed to execute command: {e}"),
        )
    }
}

impl CommandRunner for ProcessRunner {
    #[instrument(skip(self))]
    fn run_inherited(&self, command: &str, args: &[&str]) -> Result<Option<i32>> {
        let cmd_str = command_line(command, args);

        if self.debug {
            debug!("Running command: {} (in {})", cmd_str, self.work_dir.display());
        } else {
            info!("+ {}", cmd_str);
        }

        let status = Command::new(command)
            .args(args)
            .current_dir(&self.work_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Self::spawn_error(cmd_str.clone(), &e))?;

        debug!("Command finished: {} -> {:?}", cmd_str, status.code());
        Ok(status.code())
    }

    #[instrument(skip(self))]
    fn capture(&self, command: &str, args: &[&str]) -> Result<ProcessResult> {
        let cmd_str = command_line(command, args);

        debug!("Running command with output capture: {}", cmd_str);

        let output = Command::new(command)
            .args(args)
            .current_dir(&self.work_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Self::spawn_error(cmd_str.clone(), &e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let success = output.status.success();
        let exit_code = output.status.code();

        debug!(
            "Command finished: success={}, exit_code={:?}, stdout_len={}, stderr_len={}",
            success,
            exit_code,
            stdout.len(),
            stderr.len()
        );

        Ok(ProcessResult {
            exit_code,
            stdout,
            stderr,
            success,
        })
    }

    #[instrument(skip(self))]
    fn command_exists(&self, command: &str) -> bool {
        match which::which(command) {
            Ok(path) => {
                debug!("Command '{}' found at {}", command, path.display());
                true
            }
            Err(e) => {
                debug!("Command '{}' not found: {}", command, e);
                false
            }
        }
    }
}

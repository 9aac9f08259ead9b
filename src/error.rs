//! Error types for shipkit
//!
//! Provides structured error handling with context and proper error chains.
//! Every variant knows which process exit status it maps to.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for shipkit
#[derive(Error, Debug)]
pub enum ShipError {
    /// Nothing matched the publish extension in the working directory
    #[error("No *.{extension} files found in {}", .dir.display())]
    NoEligibleFiles { extension: String, dir: PathBuf },

    /// The package manager could not be located
    #[error("{name} is not installed. Install it with:\n  {hint}")]
    PackageManagerMissing { name: String, hint: String },

    /// File system operation errors
    #[error("File system error: {operation} failed on {}", .path.display())]
    FileSystem {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Process execution errors
    #[error("Process error: {command} failed")]
    Process {
        command: String,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl ShipError {
    /// Create a new no-eligible-files error
    pub fn no_eligible_files<P: Into<PathBuf>>(extension: impl Into<String>, dir: P) -> Self {
        Self::NoEligibleFiles {
            extension: extension.into(),
            dir: dir.into(),
        }
    }

    /// Create a new missing package manager error
    pub fn package_manager_missing(name: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::PackageManagerMissing {
            name: name.into(),
            hint: hint.into(),
        }
    }

    /// Create a new file system error
    pub fn file_system<P: Into<PathBuf>>(
        operation: impl Into<String>,
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a new process error
    pub fn process(
        command: impl Into<String>,
        exit_code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::Process {
            command: command.into(),
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error wrapping its cause
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Process exit status this error terminates shipkit with.
    ///
    /// A failed external command hands its own non-zero status through;
    /// everything else, including commands killed by a signal, is `1`.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Process {
                exit_code: Some(code),
                ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ShipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_error_passes_exit_code_through() {
        let err = ShipError::process("git push origin HEAD:main", Some(128), "", "rejected");
        assert_eq!(err.exit_code(), 128);
    }

    #[test]
    fn test_process_error_without_code_exits_one() {
        let err = ShipError::process("python3 contar_lineas.py", None, "", "killed");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_precondition_errors_exit_one() {
        assert_eq!(ShipError::no_eligible_files("html", ".").exit_code(), 1);
        assert_eq!(
            ShipError::package_manager_missing("brew", "install brew").exit_code(),
            1
        );
        assert_eq!(ShipError::validation("bad").exit_code(), 1);
    }

    #[test]
    fn test_messages() {
        let err = ShipError::no_eligible_files("html", "/srv/site");
        assert_eq!(err.to_string(), "No *.html files found in /srv/site");

        let err = ShipError::package_manager_missing("brew", "curl | bash");
        assert!(err.to_string().starts_with("brew is not installed."));
        assert!(err.to_string().contains("curl | bash"));
    }
}

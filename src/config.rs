//! Configuration management for shipkit
//!
//! Centralizes configuration options and provides validation. Values come
//! from built-in defaults, then an optional TOML file, then command-line
//! flags.

use crate::{
    cli::{Args, Command},
    error::ShipError,
    utils::fs::FileSystemUtils,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file picked up from the working directory when present
pub const CONFIG_FILE_NAME: &str = "shipkit.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Enable debug logging
    #[serde(skip)]
    pub debug: bool,
    /// Working directory for operations
    #[serde(skip)]
    pub work_dir: PathBuf,
    /// Publisher configuration
    pub publish: PublishConfig,
    /// Installer configuration
    pub install: InstallConfig,
    /// Line counter configuration
    pub count: CountConfig,
}

/// Publisher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Extension of eligible files, without the dot
    pub extension: String,
    /// Output directory, relative to the working directory
    pub output_dir: PathBuf,
    /// Message of the publish commit
    pub commit_message: String,
    /// Remote to push to
    pub remote: String,
    /// Remote branch to push to
    pub branch: String,
    /// Site URL reported after a push; derived from the remote when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
}

/// Installer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Package manager binary
    pub package_manager: String,
    /// Command shown when the package manager is missing
    pub install_hint: String,
    /// Formula installed when no accepted version is present
    pub runtime_formula: String,
    /// Accepted `major.minor` versions, checked in order
    pub accepted_versions: Vec<String>,
    /// Runtime binary asked for its version
    pub runtime_binary: String,
    /// Downstream helper command line
    pub helper: Vec<String>,
}

/// Line counter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CountConfig {
    /// File counted when none is given on the command line
    pub file: PathBuf,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            extension: "html".to_string(),
            output_dir: PathBuf::from("docs"),
            commit_message: "Publish HTML files to docs".to_string(),
            remote: "origin".to_string(),
            branch: "main".to_string(),
            site_url: None,
        }
    }
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            package_manager: "brew".to_string(),
            install_hint: r#"/bin/bash -c "$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)""#
                .to_string(),
            runtime_formula: "python".to_string(),
            accepted_versions: vec![
                "3.12".to_string(),
                "3.11".to_string(),
                "3.10".to_string(),
            ],
            runtime_binary: "python3".to_string(),
            helper: vec!["python3".to_string(), "contar_lineas.py".to_string()],
        }
    }
}

impl Default for CountConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("este_TCIM_195_scored_final.csv"),
        }
    }
}

impl Config {
    /// Create configuration from command line arguments
    pub fn from_args(args: &Args) -> Result<Self, ShipError> {
        let work_dir = args.work_dir.clone().unwrap_or_else(|| PathBuf::from("."));

        let config_path = match &args.config {
            Some(path) if !path.is_file() => {
                return Err(ShipError::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => Some(path.clone()),
            None => Some(work_dir.join(CONFIG_FILE_NAME)).filter(|p| p.is_file()),
        };

        let mut config = match config_path {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        config.debug = args.debug;
        config.work_dir = work_dir;

        // Override with command-specific options
        match &args.command {
            Command::Publish {
                output_dir: Some(output_dir),
            } => {
                config.publish.output_dir = output_dir.clone();
            }
            Command::CountLines { file: Some(file) } => {
                config.count.file = file.clone();
            }
            _ => {}
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ShipError> {
        debug!("Loading configuration from {}", path.display());

        let content = FileSystemUtils::new()
            .read_file_to_string(path)
            .map_err(|e| ShipError::file_system("read", path, e))?;

        toml::from_str(&content).map_err(|e| {
            ShipError::config_with_source(format!("Invalid config file {}", path.display()), e)
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ShipError> {
        if !self.work_dir.is_dir() {
            return Err(ShipError::validation(format!(
                "Working directory not found: {}",
                self.work_dir.display()
            )));
        }

        if self.publish.extension.trim().is_empty() {
            return Err(ShipError::validation("Publish extension must not be empty"));
        }

        if self.install.accepted_versions.is_empty() {
            return Err(ShipError::validation(
                "At least one accepted runtime version is required",
            ));
        }

        if self.install.helper.is_empty() {
            return Err(ShipError::validation("Helper command must not be empty"));
        }

        Ok(())
    }

    /// Output directory resolved against the working directory
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.work_dir.join(&self.publish.output_dir)
    }

    /// Line-count target resolved against the working directory
    #[must_use]
    pub fn count_file(&self) -> PathBuf {
        self.work_dir.join(&self.count.file)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, ShipError> {
        toml::to_string_pretty(self)
            .map_err(|e| ShipError::config_with_source("Failed to render configuration", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn args(dir: &Path, rest: &[&str]) -> Args {
        let mut argv = vec![
            "shipkit".to_string(),
            "--work-dir".to_string(),
            dir.display().to_string(),
        ];
        argv.extend(rest.iter().map(|s| (*s).to_string()));
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.publish.extension, "html");
        assert_eq!(config.publish.output_dir, PathBuf::from("docs"));
        assert_eq!(config.publish.remote, "origin");
        assert_eq!(config.publish.branch, "main");
        assert_eq!(config.install.package_manager, "brew");
        assert_eq!(config.install.accepted_versions, vec!["3.12", "3.11", "3.10"]);
        assert_eq!(config.install.helper, vec!["python3", "contar_lineas.py"]);
    }

    #[test]
    fn test_from_args_without_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::from_args(&args(temp_dir.path(), &["--debug", "publish"])).unwrap();

        assert!(config.debug);
        assert_eq!(config.work_dir, temp_dir.path());
        assert_eq!(config.output_dir(), temp_dir.path().join("docs"));
    }

    #[test]
    fn test_config_file_in_work_dir_is_loaded() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"
[publish]
output_dir = "site"

[install]
accepted_versions = ["3.13"]
"#,
        )
        .unwrap();

        let config = Config::from_args(&args(temp_dir.path(), &["publish"])).unwrap();
        assert_eq!(config.publish.output_dir, PathBuf::from("site"));
        assert_eq!(config.publish.extension, "html");
        assert_eq!(config.install.accepted_versions, vec!["3.13"]);
        assert_eq!(config.install.package_manager, "brew");
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "[publish]\noutput_dir = \"site\"\n",
        )
        .unwrap();

        let config =
            Config::from_args(&args(temp_dir.path(), &["publish", "--output-dir", "public"]))
                .unwrap();
        assert_eq!(config.publish.output_dir, PathBuf::from("public"));

        let config =
            Config::from_args(&args(temp_dir.path(), &["count-lines", "data.csv"])).unwrap();
        assert_eq!(config.count_file(), temp_dir.path().join("data.csv"));
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        let result = Config::from_args(&args(
            temp_dir.path(),
            &["--config", &missing.display().to_string(), "install"],
        ));
        assert!(matches!(result, Err(ShipError::Config { .. })));
    }

    #[test]
    fn test_invalid_config_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "[publish\n").unwrap();

        let result = Config::from_args(&args(temp_dir.path(), &["install"]));
        assert!(matches!(result, Err(ShipError::Config { .. })));
    }

    #[test]
    fn test_validate() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config {
            work_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        };
        assert!(config.validate().is_ok());

        config.install.helper.clear();
        assert!(config.validate().is_err());

        config = Config {
            work_dir: temp_dir.path().join("missing"),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        config = Config {
            work_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        };
        config.install.accepted_versions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = Config::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[publish]"));
        assert!(rendered.contains("package_manager = \"brew\""));

        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.install.helper, config.install.helper);
    }
}

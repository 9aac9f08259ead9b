//! Runtime installation
//!
//! Makes sure an accepted Python version is installed through Homebrew,
//! then hands off to the downstream line-counting helper.

use crate::{
    config::InstallConfig,
    error::{Result, ShipError},
    utils::process::CommandRunner,
};
use tracing::{debug, info, instrument};

/// Where the runtime came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeSource {
    /// An accepted version was already installed
    AlreadyInstalled {
        /// The first accepted version found
        version: String,
    },
    /// The default formula was installed by this run
    FreshlyInstalled,
}

/// Summary of an install run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub source: RuntimeSource,
    /// Version string reported by the runtime itself
    pub runtime_version: String,
    /// Exit code of the downstream helper (`None` when killed by a signal)
    pub helper_exit_code: Option<i32>,
}

/// Installer that ensures the runtime and runs the helper
pub struct RuntimeInstaller<'a, R: CommandRunner> {
    config: &'a InstallConfig,
    runner: &'a R,
}

impl<'a, R: CommandRunner> RuntimeInstaller<'a, R> {
    pub const fn new(config: &'a InstallConfig, runner: &'a R) -> Self {
        Self { config, runner }
    }

    /// Run the whole installer workflow
    #[instrument(skip(self))]
    pub fn run(&self) -> Result<InstallReport> {
        self.ensure_package_manager()?;

        let source = match self.installed_version()? {
            Some(version) => {
                info!(
                    "{}@{} is already installed",
                    self.config.runtime_formula, version
                );
                RuntimeSource::AlreadyInstalled { version }
            }
            None => {
                info!(
                    "No accepted {} version installed ({}), installing {}",
                    self.config.runtime_formula,
                    self.config.accepted_versions.join(", "),
                    self.config.runtime_formula
                );
                self.runner.run_command(
                    &self.config.package_manager,
                    &["install", &self.config.runtime_formula],
                )?;
                RuntimeSource::FreshlyInstalled
            }
        };

        let runtime_version = self.runtime_version()?;
        info!("Runtime version: {runtime_version}");

        let helper_exit_code = self.run_helper()?;

        Ok(InstallReport {
            source,
            runtime_version,
            helper_exit_code,
        })
    }

    fn ensure_package_manager(&self) -> Result<()> {
        if self.runner.command_exists(&self.config.package_manager) {
            debug!("Found package manager {}", self.config.package_manager);
            return Ok(());
        }

        debug!("Package manager {} not found in PATH", self.config.package_manager);
        Err(ShipError::package_manager_missing(
            &self.config.package_manager,
            &self.config.install_hint,
        ))
    }

    /// First accepted version the package manager reports as installed
    fn installed_version(&self) -> Result<Option<String>> {
        for version in &self.config.accepted_versions {
            let formula = format!("{}@{}", self.config.runtime_formula, version);
            let result = self
                .runner
                .capture(&self.config.package_manager, &["list", "--versions", &formula])?;

            if result.success && !result.stdout.trim().is_empty() {
                debug!("Found {}", result.stdout.trim());
                return Ok(Some(version.clone()));
            }
            debug!("{} is not installed", formula);
        }

        Ok(None)
    }

    fn runtime_version(&self) -> Result<String> {
        let result = self
            .runner
            .run_command_with_output(&self.config.runtime_binary, &["--version"])?;

        let reported = if result.stdout.trim().is_empty() {
            result.stderr.trim()
        } else {
            result.stdout.trim()
        };
        Ok(reported.to_string())
    }

    fn run_helper(&self) -> Result<Option<i32>> {
        let Some((program, args)) = self.config.helper.split_first() else {
            return Err(ShipError::validation("Helper command must not be empty"));
        };
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let exit_code = self.runner.run_inherited(program, &args)?;
        debug!("Helper exited with {exit_code:?}");
        Ok(exit_code)
    }
}

//! Command implementations for the CLI

use crate::{
    cli::Command,
    config::Config,
    core::{installer::RuntimeInstaller, line_count::count_lines, publisher::Publisher},
    error::ShipError,
    utils::process::ProcessRunner,
};
use anyhow::Context;
use std::process::ExitCode;
use tracing::{info, instrument};

/// Execute the appropriate command based on CLI arguments
#[instrument(skip(config))]
pub fn execute_command(config: &Config, command: &Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Publish { .. } => execute_publish_command(config),
        Command::Install => execute_install_command(config),
        Command::CountLines { .. } => execute_count_lines_command(config),
        Command::Config => execute_config_command(config),
    }
}

/// Exit status for an error that ended a command
#[must_use]
pub fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    let code = error.downcast_ref::<ShipError>().map_or(1, ShipError::exit_code);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

/// Execute the publish command
#[instrument(skip(config))]
fn execute_publish_command(config: &Config) -> anyhow::Result<ExitCode> {
    info!(
        "Publishing *.{} files to {}",
        config.publish.extension,
        config.publish.output_dir.display()
    );

    let runner = ProcessRunner::new(config.debug, &config.work_dir);
    Publisher::new(config, &runner)
        .publish()
        .context("Failed to publish")?;

    Ok(ExitCode::SUCCESS)
}

/// Execute the install command
#[instrument(skip(config))]
fn execute_install_command(config: &Config) -> anyhow::Result<ExitCode> {
    info!("Checking for {}...", config.install.package_manager);

    let runner = ProcessRunner::new(config.debug, &config.work_dir);
    let report = RuntimeInstaller::new(&config.install, &runner)
        .run()
        .context("Failed to prepare the runtime")?;

    let code = report.helper_exit_code.unwrap_or(1);
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}

/// Execute the count-lines command
#[instrument(skip(config))]
fn execute_count_lines_command(config: &Config) -> anyhow::Result<ExitCode> {
    let path = config.count_file();
    let count = count_lines(&path).context("Failed to count lines")?;

    info!(
        "The file '{}' contains {} lines in total",
        config.count.file.display(),
        count.total
    );
    info!("(Including the header line: {} data rows)", count.data_rows);

    Ok(ExitCode::SUCCESS)
}

/// Execute the config command
fn execute_config_command(config: &Config) -> anyhow::Result<ExitCode> {
    let rendered = config.to_toml().context("Failed to render configuration")?;
    print!("{rendered}");
    Ok(ExitCode::SUCCESS)
}

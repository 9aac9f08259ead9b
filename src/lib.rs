//! # shipkit
//!
//! Two small operator workflows behind one binary:
//!
//! - `publish` copies the `*.html` files of the working directory into
//!   `docs/`, stages them, and commits and pushes to `origin`/`main` only
//!   when something changed.
//! - `install` makes sure Homebrew and an accepted Python version are
//!   present, then runs the line-counting helper and passes its exit
//!   status through.
//!
//! `count-lines` is a native line counter for CSV files and `config` prints
//! the effective configuration.
//!
//! ## Example
//!
//! ```no_run
//! use shipkit::{config::Config, core::Publisher, utils::ProcessRunner};
//!
//! let config = Config { work_dir: ".".into(), ..Config::default() };
//! let runner = ProcessRunner::new(false, &config.work_dir);
//! let outcome = Publisher::new(&config, &runner).publish()?;
//! println!("Copied {} files", outcome.copied().len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

//! Command-line argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// shipkit - publish static HTML and keep the Python runtime installed
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "shipkit")]
pub struct Args {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Directory to operate in (defaults to the current directory)
    #[arg(short = 'C', long = "work-dir", global = true)]
    pub work_dir: Option<PathBuf>,

    /// Config file (defaults to shipkit.toml in the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copy HTML files into docs/, then commit and push them if they changed
    Publish {
        /// Output directory, relative to the working directory
        #[arg(short = 'o', long = "output-dir")]
        output_dir: Option<PathBuf>,
    },

    /// Make sure Python is installed through Homebrew, then run the line counter
    Install,

    /// Count the lines of a CSV file
    CountLines {
        /// File to count
        file: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config,
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    Args::parse()
}

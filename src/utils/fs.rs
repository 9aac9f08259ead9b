//! File system utility functions
//!
//! Provides file operations with proper error handling.

use crate::error::{Result, ShipError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// Utility struct for file system operations
#[derive(Debug, Default)]
pub struct FileSystemUtils;

impl FileSystemUtils {
    /// Create a new file system utilities instance
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Copy a file from source to destination, overwriting the destination
    /// and preserving permissions
    #[instrument(skip(self))]
    pub fn copy_file<P: AsRef<Path> + std::fmt::Debug, Q: AsRef<Path> + std::fmt::Debug>(
        &self,
        src: P,
        dst: Q,
    ) -> io::Result<u64> {
        let src = src.as_ref();
        let dst = dst.as_ref();

        debug!("Copying file: {} -> {}", src.display(), dst.display());

        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }

        let bytes_copied = fs::copy(src, dst)?;

        let metadata = fs::metadata(src)?;
        fs::set_permissions(dst, metadata.permissions())?;

        debug!("Successfully copied {} bytes", bytes_copied);
        Ok(bytes_copied)
    }

    /// Create directories recursively. Succeeds when the directory exists.
    #[instrument(skip(self))]
    pub fn create_dir_all<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        debug!("Creating directory: {}", path.display());
        fs::create_dir_all(path)
    }

    /// Regular files directly inside `dir` whose extension is `extension`,
    /// sorted by path. Subdirectories are not descended into and hidden
    /// files are skipped.
    #[instrument(skip(self))]
    pub fn files_with_extension(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        let pattern = format!(
            "{}/*.{}",
            glob::Pattern::escape(&dir.to_string_lossy()),
            glob::Pattern::escape(extension)
        );
        debug!("Searching for files matching: {}", pattern);

        let options = glob::MatchOptions {
            require_literal_leading_dot: true,
            ..glob::MatchOptions::new()
        };
        let paths = glob::glob_with(&pattern, options).map_err(|e| {
            ShipError::validation(format!("Invalid file pattern {pattern}: {e}"))
        })?;

        let mut files = Vec::new();
        for path_result in paths {
            match path_result {
                Ok(path) if path.is_file() => files.push(path),
                Ok(path) => debug!("Skipping non-file: {}", path.display()),
                Err(e) => warn!("Error reading path for pattern {}: {}", pattern, e),
            }
        }

        files.sort();
        Ok(files)
    }

    /// Read file contents as string
    #[instrument(skip(self))]
    pub fn read_file_to_string<P: AsRef<Path> + std::fmt::Debug>(
        &self,
        path: P,
    ) -> io::Result<String> {
        let path = path.as_ref();
        debug!("Reading file: {}", path.display());
        fs::read_to_string(path)
    }
}

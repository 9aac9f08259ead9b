//! Static site publishing
//!
//! Copies the eligible files of the working directory into the output
//! directory and pushes them when the copy changed something.

use crate::{
    config::Config,
    core::site::SiteUrlResolver,
    error::{Result, ShipError},
    utils::{fs::FileSystemUtils, git::Git, process::CommandRunner},
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// How a publish run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Files were copied but the staged tree matched the last commit
    NothingToCommit {
        /// Files copied into the output directory
        copied: Vec<PathBuf>,
    },
    /// A commit was created and pushed
    Published {
        /// Files copied into the output directory
        copied: Vec<PathBuf>,
        /// Address of the published site, when known
        site_url: Option<String>,
    },
}

impl PublishOutcome {
    /// Files copied into the output directory
    #[must_use]
    pub fn copied(&self) -> &[PathBuf] {
        match self {
            Self::NothingToCommit { copied } | Self::Published { copied, .. } => copied,
        }
    }
}

/// Publisher that mirrors eligible files into the output directory
pub struct Publisher<'a, R: CommandRunner> {
    config: &'a Config,
    runner: &'a R,
    fs_utils: FileSystemUtils,
}

impl<'a, R: CommandRunner> Publisher<'a, R> {
    /// Create a new publisher
    pub const fn new(config: &'a Config, runner: &'a R) -> Self {
        Self {
            config,
            runner,
            fs_utils: FileSystemUtils::new(),
        }
    }

    /// Copy, stage, and commit and push when something changed
    #[instrument(skip(self))]
    pub fn publish(&self) -> Result<PublishOutcome> {
        let output_dir = self.config.output_dir();
        self.fs_utils
            .create_dir_all(&output_dir)
            .map_err(|e| ShipError::file_system("create directory", &output_dir, e))?;

        let copied = self.copy_eligible_files(&output_dir)?;
        if copied.is_empty() {
            warn!(
                "No *.{} files found in {}",
                self.config.publish.extension,
                self.config.work_dir.display()
            );
            return Err(ShipError::no_eligible_files(
                &self.config.publish.extension,
                &self.config.work_dir,
            ));
        }
        info!(
            "Copied {} file(s) to {}",
            copied.len(),
            self.config.publish.output_dir.display()
        );

        let git = Git::new(self.runner);
        git.add(&self.config.publish.output_dir.to_string_lossy())?;

        if !git.has_staged_changes()? {
            info!("No changes to publish, nothing to commit");
            return Ok(PublishOutcome::NothingToCommit { copied });
        }

        git.commit(&self.config.publish.commit_message)?;
        git.push(&self.config.publish.remote, &self.config.publish.branch)?;

        let site_url = self.site_url(&git);
        match &site_url {
            Some(url) => info!("Published successfully. Site: {url}"),
            None => info!("Published successfully"),
        }

        Ok(PublishOutcome::Published { copied, site_url })
    }

    /// Copy every eligible file into `output_dir`, returning the copies
    fn copy_eligible_files(&self, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let sources = self
            .fs_utils
            .files_with_extension(&self.config.work_dir, &self.config.publish.extension)?;

        let mut copied = Vec::with_capacity(sources.len());
        for source in sources {
            let Some(file_name) = source.file_name() else {
                continue;
            };
            let destination = output_dir.join(file_name);

            self.fs_utils
                .copy_file(&source, &destination)
                .map_err(|e| ShipError::file_system("copy", &source, e))?;
            info!("Copied {}", Path::new(file_name).display());
            copied.push(destination);
        }

        Ok(copied)
    }

    fn site_url(&self, git: &Git<'_, R>) -> Option<String> {
        if let Some(url) = &self.config.publish.site_url {
            return Some(url.clone());
        }

        let remote_url = match git.remote_url(&self.config.publish.remote) {
            Ok(url) => url,
            Err(e) => {
                debug!("Could not read remote URL: {e}");
                return None;
            }
        };

        match SiteUrlResolver::new() {
            Ok(resolver) => resolver.pages_url(&remote_url),
            Err(e) => {
                debug!("Site URL resolution unavailable: {e}");
                None
            }
        }
    }
}

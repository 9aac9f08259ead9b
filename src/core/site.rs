//! Site URL resolution
//!
//! Maps a git remote URL to the GitHub Pages address it publishes to.

use crate::error::{Result, ShipError};
use regex::Regex;
use tracing::debug;

/// Derives GitHub Pages URLs from remote URLs
pub struct SiteUrlResolver {
    /// Matches https, ssh and scp-style GitHub remotes
    re_github: Regex,
}

impl SiteUrlResolver {
    /// Create a new resolver
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_github: Regex::new(
                r"^(?:https?://(?:[^@/]+@)?|ssh://git@|git@)github\.com[:/]([A-Za-z0-9-]+)/([A-Za-z0-9._-]+?)(?:\.git)?/?$",
            )
            .map_err(|e| ShipError::config(format!("Failed to compile regex: {e}")))?,
        })
    }

    /// Pages URL for `remote_url`, or `None` for non-GitHub remotes
    #[must_use]
    pub fn pages_url(&self, remote_url: &str) -> Option<String> {
        let captures = self.re_github.captures(remote_url.trim())?;
        let owner = captures[1].to_lowercase();
        let repo = &captures[2];
        debug!("Remote {} -> owner={}, repo={}", remote_url, owner, repo);

        if repo.eq_ignore_ascii_case(&format!("{owner}.github.io")) {
            Some(format!("https://{owner}.github.io/"))
        } else {
            Some(format!("https://{owner}.github.io/{repo}/"))
        }
    }
}

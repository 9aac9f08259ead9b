//! Core workflows
//!
//! Contains the publish and install workflows, the site URL resolution
//! used after a push, and the line counter.

pub mod installer;
pub mod line_count;
pub mod publisher;
pub mod site;

pub use installer::{InstallReport, RuntimeInstaller, RuntimeSource};
pub use line_count::{LineCount, count_lines};
pub use publisher::{PublishOutcome, Publisher};
pub use site::SiteUrlResolver;

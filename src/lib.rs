pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod services;
pub mod utils;

pub use app::{LabelRun, Runner};
pub use config::{AddLabelsConfig, GenerateConfig};
pub use data::{Changelog, ChangelogFormat, IssueReference, IssueSummary, RepoTarget};
pub use error::{Error, Result, TrackerError};
pub use services::{extract_issue_ids, extract_references, GitHubTracker, IssueTracker};
pub use utils::commit_messages;

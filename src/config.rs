use std::path::PathBuf;

use crate::data::{ChangelogFormat, RepoTarget};
use crate::error::{Error, Result};

pub const DEFAULT_ORG: &str = "camunda";
pub const DEFAULT_REPO: &str = "camunda";
pub const DEFAULT_WORKERS: i64 = 10;

/// Settings of the `add-labels` command.
#[derive(Debug, Clone)]
pub struct AddLabelsConfig {
    pub git_dir: PathBuf,
    pub label: String,
    pub from: String,
    pub target: String,
    pub repo: RepoTarget,
    pub workers: usize,
    pub dry_run: bool,
}

impl AddLabelsConfig {
    /// Build the config, rejecting a non-positive worker count.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        git_dir: PathBuf,
        label: String,
        from: String,
        target: String,
        repo: RepoTarget,
        workers: i64,
        dry_run: bool,
    ) -> Result<Self> {
        let workers = validate_workers(workers)?;
        Ok(Self {
            git_dir,
            label,
            from,
            target,
            repo,
            workers,
            dry_run,
        })
    }
}

/// Settings of the `generate` command.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub label: String,
    pub repo: RepoTarget,
    pub format: ChangelogFormat,
}

pub fn validate_workers(workers: i64) -> Result<usize> {
    match usize::try_from(workers) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::InvalidConcurrency(workers)),
    }
}

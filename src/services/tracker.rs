//! Remote operations the label workflows need from the ticket tracker.

use async_trait::async_trait;

use crate::data::{IssuePage, Label, RepoTarget, StateFilter};
use crate::error::TrackerError;

/// The primitive calls made against the tracking service.
///
/// Not-found conditions are reported as [`TrackerError::NotFound`]; callers
/// decide whether that is recoverable for the operation at hand.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Look up a label by name. `Ok(false)` when the label does not exist.
    async fn label_exists(&self, repo: &RepoTarget, label: &str) -> Result<bool, TrackerError>;

    async fn create_label(&self, repo: &RepoTarget, label: &Label) -> Result<(), TrackerError>;

    async fn add_label(
        &self,
        repo: &RepoTarget,
        issue: u64,
        label: &str,
    ) -> Result<(), TrackerError>;

    /// Fetch one page (1-based) of issues carrying `label`.
    async fn search_issues(
        &self,
        repo: &RepoTarget,
        state: StateFilter,
        label: &str,
        page: u32,
    ) -> Result<IssuePage, TrackerError>;
}

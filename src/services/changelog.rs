//! Changelog collection: every issue carrying a label, in the order the
//! tracker pages through them.

use std::sync::Arc;

use crate::data::{Changelog, RepoTarget, StateFilter};
use crate::error::{Error, Result};

use super::tracker::IssueTracker;

/// Collect every issue (open or closed) carrying `label`, page by page.
pub async fn collect_changelog(
    tracker: &Arc<dyn IssueTracker>,
    repo: &RepoTarget,
    label: &str,
) -> Result<Changelog> {
    let mut changelog = Changelog::new(label);
    let mut page = 1;

    loop {
        let response = tracker
            .search_issues(repo, StateFilter::All, label, page)
            .await
            .map_err(|e| Error::remote("issue search", repo, e))?;

        tracing::debug!(page, issues = response.issues.len(), "Fetched issue page");
        for issue in response.issues {
            changelog.add_issue(issue);
        }

        if !response.has_next_page {
            break;
        }
        page += 1;
    }

    Ok(changelog)
}

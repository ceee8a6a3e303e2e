use std::io::Write;
use std::sync::Arc;

use crate::config::AddLabelsConfig;
use crate::error::Result;
use crate::services::{extract_issue_ids, LabelApplier, LabelGuarantor, Progress, ProgressSink};

use super::runner::Runner;

/// What an `add-labels` run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRun {
    pub issues: Vec<u64>,
    pub completed: usize,
    pub dry_run: bool,
}

impl Runner {
    /// Label every issue referenced by `messages`.
    ///
    /// Issue URLs are written to `out`. In dry-run mode the label is only
    /// looked up and no issue is touched. `make_progress` receives the number of
    /// issues and is only called when labels are actually applied.
    pub async fn add_labels<W, F>(
        &self,
        config: &AddLabelsConfig,
        messages: &[String],
        out: &mut W,
        make_progress: F,
    ) -> Result<LabelRun>
    where
        W: Write,
        F: FnOnce(usize) -> Arc<dyn ProgressSink>,
    {
        let repo = &config.repo;
        let label = config.label.as_str();

        tracing::info!(commits = messages.len(), "Collecting issue ids");
        let issues = extract_issue_ids(messages);

        if config.dry_run {
            tracing::info!(
                label,
                repo = %repo,
                "[dry-run] Would add label to {} issues",
                issues.len()
            );
        } else {
            tracing::info!(label, repo = %repo, "Adding label to {} issues", issues.len());
        }
        for id in &issues {
            writeln!(out, "  {}", repo.issue_url(*id))?;
        }

        let guarantor = LabelGuarantor::new(self.tracker.clone(), self.events.clone())
            .with_sleeper(self.sleeper.clone());

        if config.dry_run {
            if !guarantor.is_present(repo, label).await? {
                tracing::info!(
                    label,
                    repo = %repo,
                    "[dry-run] Label does not exist and would be created"
                );
            }
            return Ok(LabelRun {
                issues,
                completed: 0,
                dry_run: true,
            });
        }

        guarantor.ensure(repo, label).await?;

        tracing::info!(
            "Updating {} issues with {} workers",
            issues.len(),
            config.workers
        );
        let progress = Arc::new(Progress::new(issues.len(), make_progress(issues.len())));
        LabelApplier::new(self.tracker.clone(), self.events.clone())
            .apply(repo, &issues, label, config.workers, progress.clone())
            .await?;

        Ok(LabelRun {
            completed: progress.completed(),
            issues,
            dry_run: false,
        })
    }
}

use crate::config::GenerateConfig;
use crate::data::{Changelog, ChangelogFormat};
use crate::error::Result;
use crate::services::collect_changelog;

use super::runner::Runner;

impl Runner {
    pub async fn changelog(&self, config: &GenerateConfig) -> Result<Changelog> {
        tracing::info!(label = %config.label, repo = %config.repo, "Fetching issues for label");
        collect_changelog(&self.tracker, &config.repo, &config.label).await
    }

    /// Fetch and render the changelog of `config.label`.
    pub async fn generate(&self, config: &GenerateConfig) -> Result<String> {
        let changelog = self.changelog(config).await?;

        tracing::info!(
            label = %config.label,
            issues = changelog.len(),
            "Generating changelog"
        );
        Ok(match config.format {
            ChangelogFormat::Markdown => changelog.to_string(),
            ChangelogFormat::Json => changelog.to_json()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{IssuePage, IssueState, IssueSummary, RepoTarget};
    use crate::services::fake::FakeTracker;
    use std::sync::Arc;

    fn tracker() -> Arc<FakeTracker> {
        let fake = FakeTracker::default();
        *fake.pages.lock().unwrap() = vec![
            Ok(IssuePage {
                issues: vec![IssueSummary {
                    number: 2,
                    title: "Second".to_string(),
                    url: "https://github.com/camunda/camunda/issues/2".to_string(),
                    state: IssueState::Open,
                }],
                has_next_page: true,
            }),
            Ok(IssuePage {
                issues: vec![IssueSummary {
                    number: 1,
                    title: "First".to_string(),
                    url: "https://github.com/camunda/camunda/issues/1".to_string(),
                    state: IssueState::Closed,
                }],
                has_next_page: false,
            }),
        ];
        Arc::new(fake)
    }

    fn config(format: ChangelogFormat) -> GenerateConfig {
        GenerateConfig {
            label: "version:8.6.0".to_string(),
            repo: RepoTarget::new("camunda", "camunda"),
            format,
        }
    }

    #[tokio::test]
    async fn markdown_lists_issues_in_fetch_order() {
        let text = Runner::new(tracker())
            .generate(&config(ChangelogFormat::Markdown))
            .await
            .unwrap();

        let second = text.find("#2").unwrap();
        let first = text.find("#1").unwrap();
        assert!(text.starts_with("# Changelog version:8.6.0"));
        assert!(second < first);
        assert_eq!(text.lines().filter(|l| l.starts_with("* ")).count(), 2);
    }

    #[tokio::test]
    async fn json_output_is_parseable() {
        let text = Runner::new(tracker())
            .generate(&config(ChangelogFormat::Json))
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["issues"].as_array().unwrap().len(), 2);
        assert_eq!(value["issues"][0]["state"], "open");
    }
}

use anyhow::Result;
use async_trait::async_trait;
use octocrab::{models, params, Octocrab};
use std::process::Command;

use crate::data::{IssuePage, IssueState, IssueSummary, Label, RepoTarget, StateFilter};
use crate::error::TrackerError;

use super::tracker::IssueTracker;

const SEARCH_PAGE_SIZE: u8 = 100;

pub fn get_github_token() -> Result<String> {
    let output = Command::new("gh").args(["auth", "token"]).output()?;

    if !output.status.success() {
        anyhow::bail!(
            "Failed to get GitHub token. Pass --token, set GITHUB_TOKEN or run 'gh auth login'."
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// [`IssueTracker`] backed by the GitHub REST API.
pub struct GitHubTracker {
    octocrab: Octocrab,
}

impl GitHubTracker {
    pub fn new(token: String) -> Result<Self> {
        let octocrab = Octocrab::builder().personal_token(token).build()?;
        Ok(Self { octocrab })
    }
}

impl From<octocrab::Error> for TrackerError {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => {
                let status = source.status_code.as_u16();
                if status == 404 {
                    TrackerError::NotFound
                } else {
                    TrackerError::Api {
                        status,
                        message: source.message.clone(),
                    }
                }
            }
            other => TrackerError::Transport(other.to_string()),
        }
    }
}

fn to_state_param(state: StateFilter) -> params::State {
    match state {
        StateFilter::All => params::State::All,
    }
}

fn to_summary(issue: models::issues::Issue) -> IssueSummary {
    let state = match issue.state {
        models::IssueState::Open => IssueState::Open,
        models::IssueState::Closed => IssueState::Closed,
        _ => IssueState::Unknown,
    };

    IssueSummary {
        number: issue.number,
        title: issue.title,
        url: issue.html_url.to_string(),
        state,
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    async fn label_exists(&self, repo: &RepoTarget, label: &str) -> Result<bool, TrackerError> {
        match self
            .octocrab
            .issues(&repo.owner, &repo.name)
            .get_label(label)
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => match TrackerError::from(err) {
                TrackerError::NotFound => Ok(false),
                other => Err(other),
            },
        }
    }

    async fn create_label(&self, repo: &RepoTarget, label: &Label) -> Result<(), TrackerError> {
        self.octocrab
            .issues(&repo.owner, &repo.name)
            .create_label(&label.name, &label.color, "")
            .await?;
        Ok(())
    }

    async fn add_label(
        &self,
        repo: &RepoTarget,
        issue: u64,
        label: &str,
    ) -> Result<(), TrackerError> {
        self.octocrab
            .issues(&repo.owner, &repo.name)
            .add_labels(issue, &[label.to_string()])
            .await?;
        Ok(())
    }

    async fn search_issues(
        &self,
        repo: &RepoTarget,
        state: StateFilter,
        label: &str,
        page: u32,
    ) -> Result<IssuePage, TrackerError> {
        let labels = [label.to_string()];
        let response = self
            .octocrab
            .issues(&repo.owner, &repo.name)
            .list()
            .state(to_state_param(state))
            .labels(&labels)
            .per_page(SEARCH_PAGE_SIZE)
            .page(page)
            .send()
            .await?;

        let has_next_page = response.next.is_some();
        Ok(IssuePage {
            issues: response.items.into_iter().map(to_summary).collect(),
            has_next_page,
        })
    }
}

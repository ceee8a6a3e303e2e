use serde::Serialize;
use std::fmt;

use super::types::IssueState;

/// An `owner/name` pair identifying a repository on the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoTarget {
    pub owner: String,
    pub name: String,
}

impl RepoTarget {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn issue_url(&self, number: u64) -> String {
        format!(
            "https://github.com/{}/{}/issues/{}",
            self.owner, self.name, number
        )
    }
}

impl fmt::Display for RepoTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// An issue number found in a commit message, together with the repository
/// the locator pointed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReference {
    pub number: u64,
    pub owner: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    pub color: String,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: super::types::DEFAULT_LABEL_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueSummary {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub state: IssueState,
}

/// One page of an issue search.
#[derive(Debug, Clone, Default)]
pub struct IssuePage {
    pub issues: Vec<IssueSummary>,
    pub has_next_page: bool,
}

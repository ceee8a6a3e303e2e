use serde::Serialize;
use std::fmt;

use super::models::IssueSummary;

/// Issues carrying a label, in the order the tracker returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Changelog {
    pub label: String,
    pub issues: Vec<IssueSummary>,
}

impl Changelog {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            issues: Vec::new(),
        }
    }

    pub fn add_issue(&mut self, issue: IssueSummary) {
        self.issues.push(issue);
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Changelog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Changelog {}", self.label)?;
        writeln!(f)?;
        for issue in &self.issues {
            // Titles may contain newlines when edited through the API
            let title = issue.title.replace(['\r', '\n'], " ");
            writeln!(f, "* {} ([#{}]({}))", title.trim(), issue.number, issue.url)?;
        }
        Ok(())
    }
}

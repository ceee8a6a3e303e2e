use serde::Serialize;

/// Color used when a missing label has to be created.
pub const DEFAULT_LABEL_COLOR: &str = "8e8e8e";

// Issue state as reported by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
    Unknown,
}

// Search filter; the changelog always wants open and closed issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFilter {
    All,
}

/// Output format of the `generate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ChangelogFormat {
    #[default]
    Markdown,
    Json,
}

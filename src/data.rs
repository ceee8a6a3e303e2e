pub mod changelog;
pub mod models;
pub mod types;

pub use changelog::Changelog;
pub use models::{IssuePage, IssueReference, IssueSummary, Label, RepoTarget};
pub use types::{ChangelogFormat, IssueState, StateFilter, DEFAULT_LABEL_COLOR};

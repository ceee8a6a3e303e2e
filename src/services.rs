pub mod apply;
pub mod changelog;
pub mod extract;
#[cfg(test)]
pub(crate) mod fake;
pub mod github;
pub mod labels;
pub mod report;
pub mod tracker;

pub use apply::LabelApplier;
pub use changelog::collect_changelog;
pub use extract::{extract_issue_ids, extract_references, ACCEPTED_REPOSITORIES};
pub use github::{get_github_token, GitHubTracker};
pub use labels::{LabelGuarantor, Sleeper};
pub use report::{
    progress_bar, EventSink, LabelEvent, NoProgress, Progress, ProgressSink, TracingEvents,
};
pub use tracker::IssueTracker;

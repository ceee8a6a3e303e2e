use thiserror::Error;

use crate::data::RepoTarget;

/// Failure of a single remote tracker call.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("resource not found")]
    NotFound,

    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("number of workers must be positive, got: {0}")]
    InvalidConcurrency(i64),

    #[error("unable to verify creation of label {label:?} in {repo}")]
    LabelUnverified { label: String, repo: RepoTarget },

    #[error("{operation} failed for {repo}: {source}")]
    Remote {
        operation: &'static str,
        repo: RepoTarget,
        #[source]
        source: TrackerError,
    },

    #[error("labeling was aborted: {0}")]
    Aborted(String),

    #[error("git history: {0}")]
    History(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn remote(operation: &'static str, repo: &RepoTarget, source: TrackerError) -> Self {
        Error::Remote {
            operation,
            repo: repo.clone(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

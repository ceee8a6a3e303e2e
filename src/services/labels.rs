//! Making sure the label exists before issues are updated.
//!
//! GitHub does not always serve a label right after it was created, so a
//! missing label is created once, and its existence is verified again after a
//! fixed delay. If it is still not visible the run is aborted.

use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;

use crate::data::{Label, RepoTarget};
use crate::error::{Error, Result};

use super::report::{EventSink, LabelEvent};
use super::tracker::IssueTracker;

/// Wait between creating a label and checking for it again.
pub const LABEL_VERIFICATION_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Create-and-verify cycles before giving up.
pub const LABEL_CREATE_ATTEMPTS: usize = 1;

pub type Sleeper = Arc<dyn Fn(Duration) -> BoxFuture<'static, ()> + Send + Sync>;

pub fn tokio_sleeper() -> Sleeper {
    Arc::new(|delay| Box::pin(tokio::time::sleep(delay)))
}

pub struct LabelGuarantor {
    tracker: Arc<dyn IssueTracker>,
    events: Arc<dyn EventSink>,
    sleep: Sleeper,
    delay: Duration,
}

impl LabelGuarantor {
    pub fn new(tracker: Arc<dyn IssueTracker>, events: Arc<dyn EventSink>) -> Self {
        Self {
            tracker,
            events,
            sleep: tokio_sleeper(),
            delay: LABEL_VERIFICATION_RETRY_DELAY,
        }
    }

    pub fn with_sleeper(mut self, sleep: Sleeper) -> Self {
        self.sleep = sleep;
        self
    }

    /// Read-only check whether the label exists.
    pub async fn is_present(&self, repo: &RepoTarget, label: &str) -> Result<bool> {
        self.tracker
            .label_exists(repo, label)
            .await
            .map_err(|e| Error::remote("label lookup", repo, e))
    }

    /// Ensure `label` exists in `repo`, creating it if needed.
    pub async fn ensure(&self, repo: &RepoTarget, label: &str) -> Result<()> {
        if self.is_present(repo, label).await? {
            tracing::debug!(label, repo = %repo, "Label already exists");
            return Ok(());
        }

        let wanted = Label::new(label);
        for _ in 0..LABEL_CREATE_ATTEMPTS {
            self.events.emit(LabelEvent::LabelMissing {
                label: label.to_string(),
                repo: repo.clone(),
            });

            // The verification below decides whether this worked
            if let Err(e) = self.tracker.create_label(repo, &wanted).await {
                self.events.emit(LabelEvent::LabelCreateFailed {
                    label: label.to_string(),
                    repo: repo.clone(),
                    error: e.to_string(),
                });
            }

            (self.sleep)(self.delay).await;

            if self.is_present(repo, label).await? {
                tracing::info!(label, repo = %repo, "Label created");
                return Ok(());
            }
        }

        Err(Error::LabelUnverified {
            label: label.to_string(),
            repo: repo.clone(),
        })
    }
}

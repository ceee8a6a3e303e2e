//! Adding a label to many issues with a fixed pool of workers.
//!
//! Workers drain a queue that is filled before they start. A missing issue is
//! reported and skipped; any other failure cancels the whole run.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinSet;

use crate::data::RepoTarget;
use crate::error::{Error, Result, TrackerError};

use super::report::{EventSink, LabelEvent, Progress};
use super::tracker::IssueTracker;

struct WorkQueue {
    repo: RepoTarget,
    label: String,
    pending: Mutex<VecDeque<u64>>,
    cancelled: AtomicBool,
    tracker: Arc<dyn IssueTracker>,
    events: Arc<dyn EventSink>,
    progress: Arc<Progress>,
}

impl WorkQueue {
    fn next(&self) -> Option<u64> {
        if self.is_cancelled() {
            return None;
        }
        match self.pending.lock() {
            Ok(mut pending) => pending.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        }
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

async fn run_worker(queue: Arc<WorkQueue>) -> Result<()> {
    while let Some(issue) = queue.next() {
        match queue.tracker.add_label(&queue.repo, issue, &queue.label).await {
            Ok(()) => {}
            Err(TrackerError::NotFound) => {
                queue.events.emit(LabelEvent::IssueMissing {
                    issue,
                    repo: queue.repo.clone(),
                });
            }
            Err(e) => {
                queue.cancel();
                tracing::error!(issue, repo = %queue.repo, error = %e, "Adding label failed");
                return Err(Error::remote("add label", &queue.repo, e));
            }
        }

        // Another worker failed while this call was in flight
        if queue.is_cancelled() {
            break;
        }
        queue.progress.advance();
    }
    Ok(())
}

pub struct LabelApplier {
    tracker: Arc<dyn IssueTracker>,
    events: Arc<dyn EventSink>,
}

impl LabelApplier {
    pub fn new(tracker: Arc<dyn IssueTracker>, events: Arc<dyn EventSink>) -> Self {
        Self { tracker, events }
    }

    /// Add `label` to every issue using `concurrency` workers.
    ///
    /// Every issue is attempted at most once; the order in which they are
    /// processed is unspecified.
    pub async fn apply(
        &self,
        repo: &RepoTarget,
        issues: &[u64],
        label: &str,
        concurrency: usize,
        progress: Arc<Progress>,
    ) -> Result<()> {
        if concurrency == 0 {
            return Err(Error::InvalidConcurrency(0));
        }

        let queue = Arc::new(WorkQueue {
            repo: repo.clone(),
            label: label.to_string(),
            pending: Mutex::new(issues.iter().copied().collect()),
            cancelled: AtomicBool::new(false),
            tracker: self.tracker.clone(),
            events: self.events.clone(),
            progress: progress.clone(),
        });

        let mut workers = JoinSet::new();
        for _ in 0..concurrency.min(issues.len()) {
            workers.spawn(run_worker(queue.clone()));
        }

        let mut failure = None;
        while let Some(joined) = workers.join_next().await {
            let err = match joined {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e,
                Err(e) if e.is_cancelled() => continue,
                Err(e) => Error::Aborted(e.to_string()),
            };
            if failure.is_none() {
                queue.cancel();
                workers.abort_all();
                failure = Some(err);
            }
        }

        match failure {
            Some(err) => Err(err),
            None => {
                progress.finish();
                Ok(())
            }
        }
    }
}

//! Progress accounting and structured events for the label workflows.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Arc, Mutex};

use crate::data::RepoTarget;

/// Receives one tick per finished work item.
pub trait ProgressSink: Send + Sync {
    fn tick(&self);

    fn finish(&self) {}
}

impl ProgressSink for ProgressBar {
    fn tick(&self) {
        self.inc(1);
    }

    fn finish(&self) {
        ProgressBar::finish(self);
    }
}

/// Sink that drops every tick.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn tick(&self) {}
}

pub fn progress_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    let template = "{elapsed_precise} [{bar:40}] {pos}/{len} ({percent}%)";
    if let Ok(style) = ProgressStyle::with_template(template) {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

/// Completed-count shared by the label workers.
pub struct Progress {
    total: usize,
    completed: Mutex<usize>,
    sink: Arc<dyn ProgressSink>,
}

impl Progress {
    pub fn new(total: usize, sink: Arc<dyn ProgressSink>) -> Self {
        Self {
            total,
            completed: Mutex::new(0),
            sink,
        }
    }

    /// Count one finished item and forward the tick. Returns the new count.
    pub fn advance(&self) -> usize {
        let mut completed = match self.completed.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *completed += 1;
        // Tick while holding the lock so the sink sees counts in order
        self.sink.tick();
        *completed
    }

    pub fn completed(&self) -> usize {
        match self.completed.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn finish(&self) {
        tracing::debug!(
            completed = self.completed(),
            total = self.total,
            "Label updates finished"
        );
        self.sink.finish();
    }
}

/// Things worth telling the operator about while labels are reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelEvent {
    LabelMissing { label: String, repo: RepoTarget },
    LabelCreateFailed { label: String, repo: RepoTarget, error: String },
    IssueMissing { issue: u64, repo: RepoTarget },
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: LabelEvent);
}

/// Forwards events to `tracing`.
pub struct TracingEvents;

impl EventSink for TracingEvents {
    fn emit(&self, event: LabelEvent) {
        match event {
            LabelEvent::LabelMissing { label, repo } => {
                tracing::info!(label = %label, repo = %repo, "Label was not found, creating it");
            }
            LabelEvent::LabelCreateFailed { label, repo, error } => {
                tracing::warn!(
                    label = %label,
                    repo = %repo,
                    error = %error,
                    "Label creation request failed"
                );
            }
            LabelEvent::IssueMissing { issue, repo } => {
                tracing::warn!(
                    issue,
                    repo = %repo,
                    "Issue #{issue} not found in {repo}, skipping label addition"
                );
            }
        }
    }
}

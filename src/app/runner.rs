use std::sync::Arc;

use crate::services::labels::tokio_sleeper;
use crate::services::{EventSink, IssueTracker, Sleeper, TracingEvents};

/// Shared collaborators of the `add-labels` and `generate` workflows.
pub struct Runner {
    pub(super) tracker: Arc<dyn IssueTracker>,
    pub(super) events: Arc<dyn EventSink>,
    pub(super) sleeper: Sleeper,
}

impl Runner {
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self {
            tracker,
            events: Arc::new(TracingEvents),
            sleeper: tokio_sleeper(),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Sleeper) -> Self {
        self.sleeper = sleeper;
        self
    }
}

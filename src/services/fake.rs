//! Scripted in-memory tracker used by the unit tests.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::data::{IssuePage, Label, RepoTarget, StateFilter};
use crate::error::TrackerError;

use super::tracker::IssueTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    NotFound,
    Fail(u16),
}

impl Outcome {
    fn into_result(self) -> Result<(), TrackerError> {
        match self {
            Outcome::Ok => Ok(()),
            Outcome::NotFound => Err(TrackerError::NotFound),
            Outcome::Fail(status) => Err(TrackerError::Api {
                status,
                message: format!("scripted failure {status}"),
            }),
        }
    }
}

/// Label calls in the order they happened. Tests may push `Sleep` entries
/// from their sleeper to interleave waits with remote calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    LabelLookup,
    LabelCreate(String),
    Sleep(Duration),
}

#[derive(Default)]
pub struct FakeTracker {
    pub calls: Arc<Mutex<Vec<Call>>>,
    /// Answers for consecutive label lookups; `true` once exhausted.
    pub lookups: Mutex<VecDeque<Result<bool, u16>>>,
    pub lookup_calls: AtomicUsize,
    pub create_outcome: Mutex<Option<Outcome>>,
    pub created: Mutex<Vec<Label>>,
    pub add_outcomes: Mutex<HashMap<u64, Outcome>>,
    pub add_delay: Mutex<Option<Duration>>,
    pub added: Mutex<Vec<u64>>,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub pages: Mutex<Vec<Result<IssuePage, u16>>>,
    pub searched: Mutex<Vec<(StateFilter, String, u32)>>,
}

impl FakeTracker {
    pub fn with_lookups(lookups: impl IntoIterator<Item = Result<bool, u16>>) -> Self {
        Self {
            lookups: Mutex::new(lookups.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn fail_issue(&self, issue: u64, outcome: Outcome) {
        self.add_outcomes.lock().unwrap().insert(issue, outcome);
    }

    pub fn added(&self) -> Vec<u64> {
        self.added.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueTracker for FakeTracker {
    async fn label_exists(&self, _repo: &RepoTarget, _label: &str) -> Result<bool, TrackerError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(Call::LabelLookup);
        match self.lookups.lock().unwrap().pop_front() {
            Some(Ok(found)) => Ok(found),
            Some(Err(status)) => Err(TrackerError::Api {
                status,
                message: "lookup failed".to_string(),
            }),
            None => Ok(true),
        }
    }

    async fn create_label(&self, _repo: &RepoTarget, label: &Label) -> Result<(), TrackerError> {
        self.created.lock().unwrap().push(label.clone());
        self.calls
            .lock()
            .unwrap()
            .push(Call::LabelCreate(label.name.clone()));
        self.create_outcome
            .lock()
            .unwrap()
            .unwrap_or(Outcome::Ok)
            .into_result()
    }

    async fn add_label(
        &self,
        _repo: &RepoTarget,
        issue: u64,
        _label: &str,
    ) -> Result<(), TrackerError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = *self.add_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.added.lock().unwrap().push(issue);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let outcome = self
            .add_outcomes
            .lock()
            .unwrap()
            .get(&issue)
            .copied()
            .unwrap_or(Outcome::Ok);
        outcome.into_result()
    }

    async fn search_issues(
        &self,
        _repo: &RepoTarget,
        state: StateFilter,
        label: &str,
        page: u32,
    ) -> Result<IssuePage, TrackerError> {
        self.searched
            .lock()
            .unwrap()
            .push((state, label.to_string(), page));

        let pages = self.pages.lock().unwrap();
        match pages.get(page as usize - 1) {
            Some(Ok(result)) => Ok(result.clone()),
            Some(Err(status)) => Err(TrackerError::Api {
                status: *status,
                message: "search failed".to_string(),
            }),
            None => Ok(IssuePage::default()),
        }
    }
}

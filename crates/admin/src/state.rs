//! Application state shared across workflows.
//!
//! One [`AppState`] holds the accumulated deletion results for a session.
//! Both the hierarchy panel and the bulk deletion merge into it, and either
//! may complete first, so each merge is a single read-compute-replace under
//! the write lock.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::deletion::DeletionResults;
use crate::pms::DeletionReport;

/// Session state shared by all workflows. Cheap to clone.
#[derive(Clone, Default)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Default)]
struct AppStateInner {
    results: RwLock<ResultsStore>,
}

#[derive(Default)]
struct ResultsStore {
    results: DeletionResults,
    batches: usize,
    updated_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    /// Fresh state with empty results.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a deletion report into the accumulated results and return the
    /// new snapshot.
    pub async fn merge_report(&self, report: &DeletionReport) -> DeletionResults {
        let mut store = self.inner.results.write().await;
        store.results = store.results.merge(report);
        store.batches += 1;
        store.updated_at = Some(Utc::now());

        tracing::debug!(
            batches = store.batches,
            deleted = store.results.deleted.len(),
            skipped = store.results.skipped.len(),
            not_found = store.results.not_found.len(),
            blocked = store.results.blocked_managers.len(),
            "Merged deletion report"
        );

        store.results.clone()
    }

    /// Snapshot of the accumulated results.
    pub async fn results(&self) -> DeletionResults {
        self.inner.results.read().await.results.clone()
    }

    /// Number of reports merged so far.
    pub async fn batches(&self) -> usize {
        self.inner.results.read().await.batches
    }

    /// Time of the last merge, if any.
    pub async fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.inner.results.read().await.updated_at
    }

    /// Drop all accumulated results.
    pub async fn clear_results(&self) {
        *self.inner.results.write().await = ResultsStore::default();
    }
}

/// Raises a busy flag for the life of a request.
///
/// The flag is lowered on drop, so a request future that is cancelled
/// mid-flight does not leave its workflow locked.
pub(crate) struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    pub(crate) fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

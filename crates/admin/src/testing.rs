//! In-memory [`PmsApi`] for workflow tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use pms_admin_core::{Email, Identifier, TreeNode};

use crate::pms::{DeletionReport, PmsApi, PmsError};

/// A recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchHierarchy(String),
    DeleteWithReportees(String),
    DeleteMultiple(Vec<String>),
}

/// Replays queued responses and records every call.
///
/// An empty queue answers with an empty tree or an empty report. After
/// [`FakePms::stall_deletions`], delete calls are recorded and never answer.
#[derive(Default)]
pub struct FakePms {
    trees: Mutex<VecDeque<Result<Option<TreeNode>, PmsError>>>,
    deletions: Mutex<VecDeque<Result<DeletionReport, PmsError>>>,
    calls: Mutex<Vec<Call>>,
    stalled: AtomicBool,
}

#[allow(clippy::unwrap_used)]
impl FakePms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_tree(&self, response: Result<Option<TreeNode>, PmsError>) {
        self.trees.lock().unwrap().push_back(response);
    }

    pub fn push_deletion(&self, response: Result<DeletionReport, PmsError>) {
        self.deletions.lock().unwrap().push_back(response);
    }

    pub fn stall_deletions(&self) {
        self.stalled.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn api_error(status: u16, message: &str) -> PmsError {
        PmsError::Api {
            status,
            message: message.to_string(),
        }
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn next_deletion(&self) -> Result<DeletionReport, PmsError> {
        if self.stalled.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        self.deletions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(DeletionReport::default()))
    }
}

#[allow(clippy::unwrap_used)]
impl PmsApi for FakePms {
    async fn fetch_hierarchy(&self, identifier: &Identifier) -> Result<Option<TreeNode>, PmsError> {
        self.record(Call::FetchHierarchy(identifier.as_str().to_string()));
        self.trees.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }

    async fn delete_user_with_reportees(&self, email: &Email) -> Result<DeletionReport, PmsError> {
        self.record(Call::DeleteWithReportees(email.as_str().to_string()));
        self.next_deletion().await
    }

    async fn delete_multiple_users(
        &self,
        identifiers: &[String],
    ) -> Result<DeletionReport, PmsError> {
        self.record(Call::DeleteMultiple(identifiers.to_vec()));
        self.next_deletion().await
    }
}

//! Flat bulk deletion workflow.
//!
//! Rows are edited in an [`EntryList`]. Submitting freezes the normalized,
//! de-duplicated values into a pending list and opens a confirmation;
//! confirming sends exactly that list in one request.

use tracing::{info, instrument, warn};

use super::DeletionOutcome;
use super::entries::EntryList;
use crate::error::AppError;
use crate::pms::{Operation, PmsApi};
use crate::state::{AppState, InFlight};

/// State of the bulk deletion form and its confirmation dialog.
#[derive(Debug, Clone, Default)]
pub struct BulkDeletion {
    entries: EntryList,
    pending: Vec<String>,
    confirm_open: bool,
    submitting: bool,
    result_message: Option<String>,
}

impl BulkDeletion {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn entries(&self) -> &EntryList {
        &self.entries
    }

    /// Rows can only be edited while the confirmation is closed.
    pub fn entries_mut(&mut self) -> Option<&mut EntryList> {
        (!self.confirm_open).then_some(&mut self.entries)
    }

    /// Values the open confirmation will send.
    #[must_use]
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    #[must_use]
    pub const fn is_confirm_open(&self) -> bool {
        self.confirm_open
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Message from the last successful deletion: the server message, or
    /// the summary when the server sent none.
    #[must_use]
    pub fn result_message(&self) -> Option<&str> {
        self.result_message.as_deref()
    }

    /// Validate the rows and open the confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NothingToSubmit`] when no row is valid.
    pub fn submit(&mut self) -> Result<&[String], AppError> {
        if self.submitting {
            return Err(AppError::InvalidState("A deletion is already running"));
        }
        self.pending = self.entries.prepare()?;
        self.confirm_open = true;
        Ok(&self.pending)
    }

    /// Close the confirmation without sending. Ignored while submitting.
    pub fn cancel(&mut self) {
        if self.submitting {
            return;
        }
        self.confirm_open = false;
        self.pending.clear();
    }

    /// Send the pending list and merge the report into `state`.
    ///
    /// On success the rows reset to one empty row and the confirmation
    /// closes. On failure the confirmation and the pending list stay so the
    /// operator can retry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidState`] without an open confirmation, or
    /// the backend error.
    #[instrument(skip(self, api, state), fields(count = self.pending.len()))]
    pub async fn confirm<A: PmsApi>(
        &mut self,
        api: &A,
        state: &AppState,
    ) -> Result<DeletionOutcome, AppError> {
        if !self.confirm_open || self.pending.is_empty() {
            return Err(AppError::InvalidState("No deletion pending"));
        }
        if self.submitting {
            return Err(AppError::InvalidState("A deletion is already running"));
        }

        let in_flight = InFlight::start(&mut self.submitting);
        let result = api.delete_multiple_users(&self.pending).await;
        drop(in_flight);

        let report = match result {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "Bulk delete failed; keeping confirmation open");
                return Err(AppError::pms(Operation::DeleteUsers)(e));
            }
        };

        let results = state.merge_report(&report).await;
        let outcome = DeletionOutcome::new(report, results);
        info!(summary = %outcome.summary, "Bulk delete completed");

        self.result_message = Some(outcome.report.result_message());
        self.entries.reset();
        self.pending.clear();
        self.confirm_open = false;

        Ok(outcome)
    }
}

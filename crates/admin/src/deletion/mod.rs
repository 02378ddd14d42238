//! Bulk user deletion and the accumulated results of every deletion.

mod bulk;
mod entries;
mod results;

pub use bulk::BulkDeletion;
pub use entries::{Entry, EntryList};
pub use results::{
    DeletionResults, merge_unique_identifiers, merge_unique_managers, merge_unique_users,
};

use serde::Serialize;

use crate::pms::DeletionReport;

/// A completed deletion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionOutcome {
    /// `Deleted: N | Skipped: N | User Not Exist: N`, or the fallback text.
    pub summary: String,
    /// Report as returned by the backend.
    pub report: DeletionReport,
    /// Session results after merging `report`.
    pub results: DeletionResults,
}

impl DeletionOutcome {
    #[must_use]
    pub fn new(report: DeletionReport, results: DeletionResults) -> Self {
        Self {
            summary: report.summary(),
            report,
            results,
        }
    }
}

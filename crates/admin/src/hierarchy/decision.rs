//! Two-stage hierarchy delete dialog.
//!
//! Stage one offers a choice between reassigning reportees elsewhere and
//! deleting the whole hierarchy. Only the second path reaches stage two,
//! which shows the counts and asks for confirmation.

use pms_admin_core::TreeNode;
use serde::Serialize;

/// Where the delete dialog currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteStage {
    #[default]
    Closed,
    /// Reassign or delete.
    Choice,
    /// Counts shown, waiting for confirmation.
    Confirm,
}

/// Location of the reassignment screen for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReassignTarget {
    pub path: String,
    /// Trimmed, lowercased identifier.
    pub current_email: String,
}

impl ReassignTarget {
    /// Build a target from the configured route and the typed identifier.
    #[must_use]
    pub fn new(path: &str, identifier: &str) -> Self {
        Self {
            path: path.to_string(),
            current_email: identifier.trim().to_lowercase(),
        }
    }

    /// `{path}?current_email={encoded identifier}`
    #[must_use]
    pub fn location(&self) -> String {
        let bytes = self.current_email.as_bytes();
        let encoded: String = url::form_urlencoded::byte_serialize(bytes).collect();
        format!("{}?current_email={encoded}", self.path)
    }
}

impl std::fmt::Display for ReassignTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.location())
    }
}

/// What a confirmed hierarchy delete will remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletePlan {
    /// Identifier as typed.
    pub target: String,
    pub managers: usize,
    pub reportees: usize,
    pub total_nodes: usize,
}

impl DeletePlan {
    #[must_use]
    pub fn new(target: &str, root: &TreeNode) -> Self {
        let reportees = root.count_descendants();
        Self {
            target: target.trim().to_string(),
            managers: 1,
            reportees,
            total_nodes: reportees + 1,
        }
    }
}

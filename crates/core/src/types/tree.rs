//! Reporting hierarchy snapshot.
//!
//! A [`TreeNode`] is one account in a manager→reportee tree as returned by
//! the hierarchy endpoint. Children are owned exclusively by their parent and
//! the structure is acyclic by construction (it is decoded from one JSON
//! document), so every traversal here is plain recursion over `&self`.
//!
//! None of the functions below mutate the tree; expand/collapse state lives
//! elsewhere and is derived from [`TreeNode::all_ids`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::id::NodeId;
use super::lenient;

/// One account in a reporting hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Backend user id, unique within one snapshot.
    #[serde(default, deserialize_with = "lenient::node_id")]
    pub id: NodeId,
    /// Display name (may be empty).
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    /// Account email (may be empty for placeholders and phone-only users).
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    /// Direct reports, in backend order.
    #[serde(default, deserialize_with = "lenient::list")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a node without children.
    #[must_use]
    pub fn new(id: i64, name: &str, email: &str) -> Self {
        Self {
            id: NodeId::new(id),
            name: name.to_owned(),
            email: email.to_owned(),
            children: Vec::new(),
        }
    }

    /// Append a direct report (builder style).
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Decode a hierarchy payload.
    ///
    /// Returns `None` when the payload is not a JSON object; individual
    /// fields fall back to their defaults instead of failing.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// A node is empty when there is nothing to display: no name, no email
    /// and no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.children.is_empty()
    }

    /// `true` if the node has at least one direct report.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of direct reports.
    #[must_use]
    pub fn direct_reports(&self) -> usize {
        self.children.len()
    }

    /// Every id in the tree, pre-order, starting with this node.
    #[must_use]
    pub fn all_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, out: &mut Vec<NodeId>) {
        out.push(self.id);
        for child in &self.children {
            child.collect_ids(out);
        }
    }

    /// Number of direct and indirect reports.
    #[must_use]
    pub fn count_descendants(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.count_descendants())
            .sum()
    }

    /// This node plus all of its descendants.
    #[must_use]
    pub fn total_nodes(&self) -> usize {
        1 + self.count_descendants()
    }

    /// Find a node by id (pre-order, first match).
    #[must_use]
    pub fn find(&self, id: NodeId) -> Option<&Self> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

//! Hierarchy lookup, tree view and cascade delete.

mod decision;
mod panel;
mod view;

pub use decision::{DeletePlan, DeleteStage, ReassignTarget};
pub use panel::{FetchOutcome, FetchTicket, HierarchyPanel, HierarchyView};
pub use view::{ExpansionState, NodeView, TreeView, render, render_tree};

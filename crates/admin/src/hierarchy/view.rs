//! Hierarchy view-model.
//!
//! Expansion state is kept apart from the tree: the tree is an immutable
//! snapshot and [`ExpansionState`] is the set of expanded node ids.
//! [`render`] turns both into a [`NodeView`] without touching either.

use std::collections::HashSet;

use pms_admin_core::{NodeId, TreeNode};
use serde::Serialize;

/// Set of expanded node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<NodeId>,
}

impl ExpansionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand every node reachable from `root`.
    pub fn expand_all(&mut self, root: &TreeNode) {
        self.expanded = root.all_ids().into_iter().collect();
    }

    /// Collapse everything below the root; the root itself stays expanded.
    pub fn collapse_all(&mut self, root: &TreeNode) {
        self.expanded = HashSet::from([root.id]);
    }

    /// Flip one id. Descendants keep their own state. Returns whether the id
    /// is now expanded.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    #[must_use]
    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Expanded ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.expanded.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// One rendered node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeView {
    pub id: NodeId,
    pub depth: usize,
    /// Name, or `-` when empty.
    pub label: String,
    /// Email, or `-` when empty.
    pub email: String,
    /// Only nodes with children can be toggled.
    pub has_children: bool,
    pub expanded: bool,
    pub direct_reports: usize,
    /// Rendered children; empty unless the node has children and is expanded.
    pub children: Vec<NodeView>,
}

impl NodeView {
    /// Number of rendered (visible) nodes in this subtree.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        1 + self.children.iter().map(Self::visible_count).sum::<usize>()
    }

    fn write_lines(&self, out: &mut Vec<String>) {
        let indent = "  ".repeat(self.depth);
        let marker = match (self.has_children, self.expanded) {
            (false, _) => "[ ]",
            (true, true) => "[-]",
            (true, false) => "[+]",
        };
        let badge = if self.has_children {
            format!(" ({})", self.direct_reports)
        } else {
            String::new()
        };
        out.push(format!(
            "{indent}{marker} {} <{}>{badge}",
            self.label, self.email
        ));
        for child in &self.children {
            child.write_lines(out);
        }
    }
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

/// Render `node` at `depth`.
#[must_use]
pub fn render(node: &TreeNode, depth: usize, expansion: &ExpansionState) -> NodeView {
    let has_children = node.has_children();
    let expanded = expansion.is_expanded(node.id);

    let children = if has_children && expanded {
        node.children
            .iter()
            .map(|child| render(child, depth + 1, expansion))
            .collect()
    } else {
        Vec::new()
    };

    NodeView {
        id: node.id,
        depth,
        label: or_dash(&node.name),
        email: or_dash(&node.email),
        has_children,
        expanded,
        direct_reports: node.direct_reports(),
        children,
    }
}

/// A rendered tree plus its counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeView {
    pub total_nodes: usize,
    pub descendants: usize,
    pub root: NodeView,
}

impl TreeView {
    /// `Total nodes: N • Descendants: M`
    #[must_use]
    pub fn header(&self) -> String {
        format!(
            "Total nodes: {} \u{2022} Descendants: {}",
            self.total_nodes, self.descendants
        )
    }

    /// Plain-text rendering, one line per visible node.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.root.visible_count());
        self.root.write_lines(&mut lines);
        lines
    }
}

/// Render a whole tree from its root.
#[must_use]
pub fn render_tree(root: &TreeNode, expansion: &ExpansionState) -> TreeView {
    let descendants = root.count_descendants();
    TreeView {
        total_nodes: descendants + 1,
        descendants,
        root: render(root, 0, expansion),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root(1) -> [a(2) -> [c(4)], b(3)]
    fn sample() -> TreeNode {
        let c = TreeNode::new(4, "", "");
        let a = TreeNode::new(2, "A", "a@x.com").with_child(c);
        TreeNode::new(1, "Root", "root@x.com")
            .with_child(a)
            .with_child(TreeNode::new(3, "B", "b@x.com"))
    }

    #[test]
    fn test_expand_all_then_toggle_leaf() {
        let root = sample();
        let mut state = ExpansionState::new();
        state.expand_all(&root);
        assert_eq!(state.len(), 4);

        assert!(!state.toggle(NodeId::new(3)));
        assert_eq!(
            state.ids(),
            vec![NodeId::new(1), NodeId::new(2), NodeId::new(4)]
        );
    }

    #[test]
    fn test_toggle_preserves_descendant_state() {
        let root = sample();
        let mut state = ExpansionState::new();
        state.expand_all(&root);

        state.toggle(NodeId::new(2));
        assert!(state.is_expanded(NodeId::new(4)));
        let view = render_tree(&root, &state);
        assert_eq!(view.root.visible_count(), 3);

        state.toggle(NodeId::new(2));
        assert_eq!(render_tree(&root, &state).root.visible_count(), 4);
    }

    #[test]
    fn test_collapse_all_keeps_root() {
        let root = sample();
        let mut state = ExpansionState::new();
        state.expand_all(&root);
        state.collapse_all(&root);
        assert_eq!(state.ids(), vec![NodeId::new(1)]);

        let view = render_tree(&root, &state);
        assert_eq!(view.root.children.len(), 2);
        assert!(view.root.children.iter().all(|c| c.children.is_empty()));
    }

    #[test]
    fn test_render_labels_and_counts() {
        let root = sample();
        let mut state = ExpansionState::new();
        state.expand_all(&root);
        let view = render_tree(&root, &state);

        assert_eq!(view.total_nodes, 4);
        assert_eq!(view.descendants, 3);
        assert_eq!(view.header(), "Total nodes: 4 \u{2022} Descendants: 3");

        let grandchild = &view.root.children[0].children[0];
        assert_eq!(grandchild.label, "-");
        assert_eq!(grandchild.email, "-");
        assert_eq!(grandchild.depth, 2);
        assert!(!grandchild.has_children);
    }

    #[test]
    fn test_to_lines() {
        let root = sample();
        let mut state = ExpansionState::new();
        state.expand_all(&root);
        state.toggle(NodeId::new(2));

        assert_eq!(
            render_tree(&root, &state).to_lines(),
            vec![
                "[-] Root <root@x.com> (2)".to_string(),
                "  [+] A <a@x.com> (1)".to_string(),
                "  [ ] B <b@x.com>".to_string(),
            ]
        );
    }

    #[test]
    fn test_render_does_not_mutate() {
        let root = sample();
        let before = root.clone();
        let mut state = ExpansionState::new();
        state.expand_all(&root);
        let snapshot = state.clone();

        let _ = render_tree(&root, &state);
        assert_eq!(root, before);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_unexpanded_root_hides_children() {
        let root = sample();
        let view = render_tree(&root, &ExpansionState::new());
        assert_eq!(
            view.to_lines(),
            vec!["[+] Root <root@x.com> (2)".to_string()]
        );
    }
}

//! Hierarchy lookup and cascade delete workflow.
//!
//! The panel owns the typed identifier, the fetched tree, its expansion
//! state and the delete dialog. Fetching is split into [`begin_fetch`] and
//! [`finish_fetch`] around the request: every begin (and every clear of the
//! identifier) starts a new generation, and a response carrying an older
//! generation is dropped.
//!
//! [`begin_fetch`]: HierarchyPanel::begin_fetch
//! [`finish_fetch`]: HierarchyPanel::finish_fetch

use pms_admin_core::{
    Email, Identifier, IdentifierError, IdentifierKind, NodeId, TreeNode, identifier_error,
    sanitize_input,
};
use serde::Serialize;
use tracing::{debug, info, instrument};

use super::decision::{DeletePlan, DeleteStage, ReassignTarget};
use super::view::{ExpansionState, TreeView, render_tree};
use crate::deletion::DeletionOutcome;
use crate::error::AppError;
use crate::pms::{Operation, PmsApi, PmsError};
use crate::state::{AppState, InFlight};

/// Proof that a fetch was started, bound to the generation it started in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    identifier: Identifier,
}

impl FetchTicket {
    #[must_use]
    pub const fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of applying a fetch response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum FetchOutcome {
    /// Nothing typed; no request made.
    Skipped,
    /// Tree replaced and fully expanded.
    Loaded { total_nodes: usize },
    /// Response had nothing to show.
    Empty,
    /// Response belonged to an older generation and was ignored.
    Stale,
}

/// What the hierarchy area shows once a response has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HierarchyView {
    NoData,
    Tree(TreeView),
}

/// State of the hierarchy lookup/delete panel.
#[derive(Debug, Clone)]
pub struct HierarchyPanel {
    identifier: String,
    tree: Option<TreeNode>,
    expansion: ExpansionState,
    loading: bool,
    deleting: bool,
    stage: DeleteStage,
    generation: u64,
    reassign_path: String,
}

impl HierarchyPanel {
    /// Empty panel. `reassign_path` is the route of the reassignment screen.
    #[must_use]
    pub fn new(reassign_path: impl Into<String>) -> Self {
        Self {
            identifier: String::new(),
            tree: None,
            expansion: ExpansionState::new(),
            loading: false,
            deleting: false,
            stage: DeleteStage::Closed,
            generation: 0,
            reassign_path: reassign_path.into(),
        }
    }

    /// Current (sanitized) identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Replace the identifier with the sanitized form of `raw`.
    ///
    /// Clearing the field discards the tree and invalidates any fetch in
    /// flight.
    pub fn set_identifier(&mut self, raw: &str) {
        self.identifier = sanitize_input(raw);
        if self.identifier.trim().is_empty() {
            self.invalidate();
        }
    }

    /// Message to show under the field, if any.
    #[must_use]
    pub fn identifier_error(&self) -> Option<IdentifierError> {
        identifier_error(&self.identifier)
    }

    #[must_use]
    pub fn can_fetch(&self) -> bool {
        !self.identifier.trim().is_empty() && self.identifier_error().is_none() && !self.loading
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn is_deleting(&self) -> bool {
        self.deleting
    }

    #[must_use]
    pub const fn stage(&self) -> DeleteStage {
        self.stage
    }

    #[must_use]
    pub const fn tree(&self) -> Option<&TreeNode> {
        self.tree.as_ref()
    }

    #[must_use]
    pub const fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Start a fetch.
    ///
    /// Returns `Ok(None)` for an empty identifier. Otherwise clears the
    /// current tree, sets the loading flag and returns a ticket for
    /// [`Self::finish_fetch`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an invalid identifier. Every
    /// invalid input reports the generic "Enter a valid email or mobile
    /// number" message here.
    pub fn begin_fetch(&mut self) -> Result<Option<FetchTicket>, AppError> {
        let raw = self.identifier.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        let identifier =
            Identifier::parse(raw).map_err(|_| AppError::Validation(IdentifierError::Invalid))?;

        self.generation += 1;
        self.tree = None;
        self.expansion.clear();
        self.stage = DeleteStage::Closed;
        self.loading = true;

        Ok(Some(FetchTicket {
            generation: self.generation,
            identifier,
        }))
    }

    /// Apply a fetch response.
    ///
    /// # Errors
    ///
    /// Returns the backend error for a current ticket; stale tickets never
    /// error.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Option<TreeNode>, PmsError>,
    ) -> Result<FetchOutcome, AppError> {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                identifier = %ticket.identifier,
                "Dropping stale hierarchy response"
            );
            return Ok(FetchOutcome::Stale);
        }

        self.loading = false;

        let tree = result.map_err(AppError::pms(Operation::FetchHierarchy))?;
        let tree = tree.unwrap_or_default();

        if tree.is_empty() {
            info!(identifier = %ticket.identifier, "Hierarchy has no data");
            self.tree = Some(tree);
            return Ok(FetchOutcome::Empty);
        }

        self.expansion.expand_all(&tree);
        let total_nodes = tree.total_nodes();
        info!(identifier = %ticket.identifier, total_nodes, "Hierarchy fetched");
        self.tree = Some(tree);

        Ok(FetchOutcome::Loaded { total_nodes })
    }

    /// Fetch the hierarchy for the current identifier.
    ///
    /// # Errors
    ///
    /// Returns a validation error or the backend error.
    #[instrument(skip(self, api), fields(identifier = %self.identifier))]
    pub async fn fetch<A: PmsApi>(&mut self, api: &A) -> Result<FetchOutcome, AppError> {
        let Some(ticket) = self.begin_fetch()? else {
            return Ok(FetchOutcome::Skipped);
        };
        let result = api.fetch_hierarchy(ticket.identifier()).await;
        self.finish_fetch(ticket, result)
    }

    /// Rendered hierarchy, or `None` before any tree has been loaded.
    #[must_use]
    pub fn view(&self) -> Option<HierarchyView> {
        self.tree.as_ref().map(|tree| {
            if tree.is_empty() {
                HierarchyView::NoData
            } else {
                HierarchyView::Tree(render_tree(tree, &self.expansion))
            }
        })
    }

    /// Toggle a node that has children. Returns the new state, or `None` if
    /// the node is missing or a leaf.
    pub fn toggle(&mut self, id: NodeId) -> Option<bool> {
        let node = self.tree.as_ref()?.find(id)?;
        if !node.has_children() {
            return None;
        }
        Some(self.expansion.toggle(id))
    }

    pub fn expand_all(&mut self) {
        if let Some(tree) = &self.tree {
            self.expansion.expand_all(tree);
        }
    }

    pub fn collapse_all(&mut self) {
        if let Some(tree) = &self.tree {
            self.expansion.collapse_all(tree);
        }
    }

    // =========================================================================
    // Delete dialog
    // =========================================================================

    #[must_use]
    pub fn can_delete(&self) -> bool {
        self.tree.as_ref().is_some_and(|tree| !tree.is_empty()) && !self.deleting
    }

    /// Open the dialog at the choice stage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidState`] when there is no tree to delete.
    pub fn open_delete(&mut self) -> Result<(), AppError> {
        if !self.can_delete() {
            return Err(AppError::InvalidState("Fetch a hierarchy before deleting"));
        }
        self.stage = DeleteStage::Choice;
        Ok(())
    }

    /// Take the reassignment path. Nothing is deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidState`] outside the choice stage.
    pub fn choose_reassign(&mut self) -> Result<ReassignTarget, AppError> {
        if self.stage != DeleteStage::Choice {
            return Err(AppError::InvalidState("Delete options are not open"));
        }
        self.stage = DeleteStage::Closed;
        let target = ReassignTarget::new(&self.reassign_path, &self.identifier);
        info!(location = %target, "Reassigning reportees");
        Ok(target)
    }

    /// Move to the confirmation stage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidState`] outside the choice stage.
    pub fn choose_delete_hierarchy(&mut self) -> Result<DeletePlan, AppError> {
        if self.stage != DeleteStage::Choice {
            return Err(AppError::InvalidState("Delete options are not open"));
        }
        let tree = self
            .tree
            .as_ref()
            .ok_or(AppError::InvalidState("Fetch a hierarchy before deleting"))?;
        let plan = DeletePlan::new(&self.identifier, tree);
        self.stage = DeleteStage::Confirm;
        Ok(plan)
    }

    /// Step back: confirmation returns to the choice, the choice closes.
    /// Ignored while a delete is in flight.
    pub fn cancel_delete(&mut self) {
        if self.deleting {
            return;
        }
        self.stage = match self.stage {
            DeleteStage::Confirm => DeleteStage::Choice,
            DeleteStage::Choice | DeleteStage::Closed => DeleteStage::Closed,
        };
    }

    /// Close the dialog from any stage. Ignored while a delete is in flight.
    pub fn close_delete(&mut self) {
        if !self.deleting {
            self.stage = DeleteStage::Closed;
        }
    }

    /// Email the cascade delete is sent for: the typed identifier when it is
    /// an email, otherwise the fetched root's email.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty or malformed typed email, and
    /// [`AppError::DeleteEmailMissing`] when a phone lookup has no usable
    /// root email.
    pub fn resolve_delete_email(&self) -> Result<Email, AppError> {
        let raw = self.identifier.trim();
        if raw.is_empty() {
            return Err(AppError::Validation(IdentifierError::Empty));
        }

        if IdentifierKind::classify(raw) == IdentifierKind::Email {
            return Email::parse(raw).map_err(|_| AppError::Validation(IdentifierError::Invalid));
        }

        self.tree
            .as_ref()
            .map(|tree| tree.email.as_str())
            .filter(|email| !email.is_empty())
            .and_then(|email| Email::parse(email).ok())
            .ok_or(AppError::DeleteEmailMissing)
    }

    /// Send the cascade delete and merge the report into `state`.
    ///
    /// Once the request completes, successfully or not, the tree, identifier
    /// and expansion are cleared and the dialog closes. A local email
    /// resolution failure closes the dialog without sending anything.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidState`] outside the confirmation stage, a
    /// resolution error, or the backend error.
    #[instrument(skip(self, api, state), fields(identifier = %self.identifier))]
    pub async fn confirm_delete<A: PmsApi>(
        &mut self,
        api: &A,
        state: &AppState,
    ) -> Result<DeletionOutcome, AppError> {
        if self.deleting {
            return Err(AppError::InvalidState(
                "A hierarchy delete is already running",
            ));
        }
        if self.stage != DeleteStage::Confirm {
            return Err(AppError::InvalidState(
                "Hierarchy delete has not been confirmed",
            ));
        }

        let email = match self.resolve_delete_email() {
            Ok(email) => email,
            Err(e) => {
                self.stage = DeleteStage::Closed;
                return Err(e);
            }
        };

        let in_flight = InFlight::start(&mut self.deleting);
        let result = api.delete_user_with_reportees(&email).await;
        drop(in_flight);

        self.stage = DeleteStage::Closed;
        self.identifier.clear();
        self.invalidate();

        let report = result.map_err(AppError::pms(Operation::DeleteHierarchy))?;
        let results = state.merge_report(&report).await;
        let outcome = DeletionOutcome::new(report, results);
        info!(email = %email, summary = %outcome.summary, "Hierarchy deleted");

        Ok(outcome)
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.tree = None;
        self.expansion.clear();
        self.loading = false;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pms_admin_core::UserRecord;

    use super::*;
    use crate::pms::DeletionReport;
    use crate::testing::{Call, FakePms};

    const REASSIGN: &str = "/safety/m-safe/reportees-reassign";

    fn sample() -> TreeNode {
        let c = TreeNode::new(4, "C", "");
        let a = TreeNode::new(2, "A", "a@x.com").with_child(c);
        TreeNode::new(1, "Boss", "boss@x.com")
            .with_child(a)
            .with_child(TreeNode::new(3, "B", "b@x.com"))
    }

    fn panel(identifier: &str) -> HierarchyPanel {
        let mut panel = HierarchyPanel::new(REASSIGN);
        panel.set_identifier(identifier);
        panel
    }

    async fn loaded(identifier: &str, tree: TreeNode) -> HierarchyPanel {
        let api = FakePms::new();
        api.push_tree(Ok(Some(tree)));
        let mut panel = panel(identifier);
        panel.fetch(&api).await.unwrap();
        panel
    }

    // =========================================================================
    // Fetch
    // =========================================================================

    #[test]
    fn test_set_identifier_sanitizes() {
        let panel = panel(" Boss@X.com ");
        assert_eq!(panel.identifier(), "boss@x.com");
        assert!(panel.can_fetch());

        let panel = self::panel("98-76 54 32 10");
        assert_eq!(panel.identifier(), "9876543210");
    }

    #[test]
    fn test_can_fetch_requires_valid_identifier() {
        assert!(!panel("").can_fetch());
        assert!(!panel("12345").can_fetch());
        assert_eq!(
            panel("12345").identifier_error(),
            Some(IdentifierError::InvalidMobile)
        );
        assert_eq!(panel("").identifier_error(), None);
    }

    #[test]
    fn test_begin_fetch_empty_is_noop() {
        assert!(panel("").begin_fetch().unwrap().is_none());
    }

    #[test]
    fn test_begin_fetch_invalid_fails_locally() {
        let err = panel("bad@mail").begin_fetch().unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(IdentifierError::Invalid)
        ));
        assert_eq!(err.user_message(), "Enter a valid email or mobile number");
    }

    #[tokio::test]
    async fn test_fetch_expands_all() {
        let panel = loaded("boss@x.com", sample()).await;
        assert!(!panel.is_loading());
        assert_eq!(panel.expansion().len(), 4);

        let Some(HierarchyView::Tree(view)) = panel.view() else {
            panic!("expected tree view");
        };
        assert_eq!(view.total_nodes, 4);
        assert_eq!(view.descendants, 3);
        assert!(panel.can_delete());
    }

    #[tokio::test]
    async fn test_fetch_sends_normalized_identifier() {
        let api = FakePms::new();
        api.push_tree(Ok(Some(sample())));
        let mut panel = panel("+91 98765 43210");
        panel.fetch(&api).await.unwrap();
        assert_eq!(
            api.calls(),
            vec![Call::FetchHierarchy("+919876543210".to_string())]
        );
    }

    #[tokio::test]
    async fn test_fetch_empty_tree_shows_no_data() {
        let api = FakePms::new();
        api.push_tree(Ok(Some(TreeNode::new(1, "", ""))));
        let mut panel = panel("boss@x.com");
        assert_eq!(panel.fetch(&api).await.unwrap(), FetchOutcome::Empty);
        assert_eq!(panel.view(), Some(HierarchyView::NoData));
        assert!(!panel.can_delete());
    }

    #[tokio::test]
    async fn test_fetch_non_object_payload_shows_no_data() {
        let api = FakePms::new();
        api.push_tree(Ok(None));
        let mut panel = panel("boss@x.com");
        assert_eq!(panel.fetch(&api).await.unwrap(), FetchOutcome::Empty);
        assert_eq!(panel.view(), Some(HierarchyView::NoData));
    }

    #[tokio::test]
    async fn test_fetch_error_normalized() {
        let api = FakePms::new();
        api.push_tree(Err(FakePms::api_error(404, "User not found")));
        let mut panel = panel("boss@x.com");
        let err = panel.fetch(&api).await.unwrap_err();
        assert_eq!(err.user_message(), "User Not Exist");
        assert!(panel.view().is_none());
        assert!(!panel.is_loading());
    }

    #[test]
    fn test_stale_response_dropped() {
        let mut panel = panel("boss@x.com");
        let first = panel.begin_fetch().unwrap().unwrap();
        let second = panel.begin_fetch().unwrap().unwrap();

        let stale = panel.finish_fetch(first, Ok(Some(TreeNode::new(9, "Old", "old@x.com"))));
        assert_eq!(stale.unwrap(), FetchOutcome::Stale);
        assert!(panel.is_loading());
        assert!(panel.tree().is_none());

        let fresh = panel.finish_fetch(second, Ok(Some(sample())));
        assert_eq!(fresh.unwrap(), FetchOutcome::Loaded { total_nodes: 4 });
        assert_eq!(panel.tree().unwrap().name, "Boss");
    }

    #[test]
    fn test_clearing_identifier_invalidates_in_flight_fetch() {
        let mut panel = panel("boss@x.com");
        let ticket = panel.begin_fetch().unwrap().unwrap();
        panel.set_identifier("   ");
        assert!(!panel.is_loading());

        let outcome = panel.finish_fetch(ticket, Ok(Some(sample()))).unwrap();
        assert_eq!(outcome, FetchOutcome::Stale);
        assert!(panel.view().is_none());
    }

    #[tokio::test]
    async fn test_clearing_identifier_discards_tree() {
        let mut panel = loaded("boss@x.com", sample()).await;
        panel.set_identifier("");
        assert!(panel.tree().is_none());
        assert!(panel.expansion().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_only_nodes_with_children() {
        let mut panel = loaded("boss@x.com", sample()).await;
        assert_eq!(panel.toggle(NodeId::new(3)), None);
        assert_eq!(panel.toggle(NodeId::new(99)), None);
        assert_eq!(panel.toggle(NodeId::new(2)), Some(false));
        assert_eq!(panel.toggle(NodeId::new(2)), Some(true));
    }

    #[tokio::test]
    async fn test_collapse_and_expand_all() {
        let mut panel = loaded("boss@x.com", sample()).await;
        panel.collapse_all();
        assert_eq!(panel.expansion().ids(), vec![NodeId::new(1)]);
        panel.expand_all();
        assert_eq!(panel.expansion().len(), 4);
    }

    // =========================================================================
    // Delete dialog
    // =========================================================================

    #[tokio::test]
    async fn test_dialog_stages() {
        let mut panel = loaded("boss@x.com", sample()).await;
        panel.open_delete().unwrap();
        assert_eq!(panel.stage(), DeleteStage::Choice);

        let plan = panel.choose_delete_hierarchy().unwrap();
        assert_eq!((plan.managers, plan.reportees, plan.total_nodes), (1, 3, 4));
        assert_eq!(panel.stage(), DeleteStage::Confirm);

        panel.cancel_delete();
        assert_eq!(panel.stage(), DeleteStage::Choice);
        panel.cancel_delete();
        assert_eq!(panel.stage(), DeleteStage::Closed);
    }

    #[test]
    fn test_open_delete_requires_tree() {
        let mut panel = panel("boss@x.com");
        assert!(matches!(
            panel.open_delete(),
            Err(AppError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn test_reassign_does_not_delete() {
        let api = FakePms::new();
        let mut panel = loaded("Boss@x.com", sample()).await;
        panel.open_delete().unwrap();
        let target = panel.choose_reassign().unwrap();

        assert_eq!(
            target.location(),
            "/safety/m-safe/reportees-reassign?current_email=boss%40x.com"
        );
        assert_eq!(panel.stage(), DeleteStage::Closed);
        assert!(panel.tree().is_some());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_confirm_requires_confirm_stage() {
        let api = FakePms::new();
        let state = AppState::new();
        let mut panel = loaded("boss@x.com", sample()).await;
        panel.open_delete().unwrap();

        let err = panel.confirm_delete(&api, &state).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_email_from_typed_identifier() {
        let panel = loaded("Boss@X.com", sample()).await;
        assert_eq!(panel.resolve_delete_email().unwrap().as_str(), "boss@x.com");
    }

    #[tokio::test]
    async fn test_resolve_email_from_root_for_phone() {
        let panel = loaded("9876543210", sample()).await;
        assert_eq!(panel.resolve_delete_email().unwrap().as_str(), "boss@x.com");
    }

    #[tokio::test]
    async fn test_phone_without_root_email_fails_locally() {
        let api = FakePms::new();
        let state = AppState::new();
        let tree = TreeNode::new(1, "Boss", "").with_child(TreeNode::new(2, "A", "a@x.com"));
        let mut panel = loaded("9876543210", tree).await;

        panel.open_delete().unwrap();
        panel.choose_delete_hierarchy().unwrap();
        let err = panel.confirm_delete(&api, &state).await.unwrap_err();

        assert_eq!(
            err.user_message(),
            "Email not found for this user. Please fetch by email or ensure hierarchy contains an email."
        );
        assert!(api.calls().is_empty());
        assert_eq!(panel.stage(), DeleteStage::Closed);
        // Nothing was sent, so the tree is kept.
        assert!(panel.tree().is_some());
        assert_eq!(panel.identifier(), "9876543210");
    }

    #[tokio::test]
    async fn test_confirm_delete_success_merges_and_clears() {
        let api = FakePms::new();
        api.push_deletion(Ok(DeletionReport {
            deleted: vec![
                UserRecord::with_email("boss@x.com"),
                UserRecord::with_email("a@x.com"),
            ],
            not_found: vec!["c@x.com".to_string()],
            ..DeletionReport::default()
        }));
        let state = AppState::new();
        let mut panel = loaded("9876543210", sample()).await;

        panel.open_delete().unwrap();
        panel.choose_delete_hierarchy().unwrap();
        let outcome = panel.confirm_delete(&api, &state).await.unwrap();

        assert_eq!(outcome.summary, "Deleted: 2 | User Not Exist: 1");
        assert_eq!(
            api.calls(),
            vec![Call::DeleteWithReportees("boss@x.com".to_string())]
        );
        assert_eq!(state.results().await.deleted.len(), 2);

        assert!(panel.tree().is_none());
        assert_eq!(panel.identifier(), "");
        assert!(panel.expansion().is_empty());
        assert_eq!(panel.stage(), DeleteStage::Closed);
        assert!(!panel.is_deleting());
    }

    #[tokio::test]
    async fn test_confirm_delete_failure_still_clears() {
        let api = FakePms::new();
        api.push_deletion(Err(FakePms::api_error(500, "")));
        let state = AppState::new();
        let mut panel = loaded("boss@x.com", sample()).await;

        panel.open_delete().unwrap();
        panel.choose_delete_hierarchy().unwrap();
        let err = panel.confirm_delete(&api, &state).await.unwrap_err();

        assert_eq!(err.user_message(), "Failed to delete hierarchy");
        assert!(panel.tree().is_none());
        assert_eq!(panel.identifier(), "");
        assert!(state.results().await.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_delete_releases_deleting() {
        let api = FakePms::new();
        api.stall_deletions();
        let state = AppState::new();
        let mut panel = loaded("boss@x.com", sample()).await;
        panel.open_delete().unwrap();
        panel.choose_delete_hierarchy().unwrap();

        let abandoned = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            panel.confirm_delete(&api, &state),
        )
        .await;

        assert!(abandoned.is_err());
        assert_eq!(
            api.calls(),
            vec![Call::DeleteWithReportees("boss@x.com".to_string())]
        );
        assert!(!panel.is_deleting());
        assert!(panel.can_delete());
        panel.close_delete();
        assert_eq!(panel.stage(), DeleteStage::Closed);
    }

    #[test]
    fn test_resolve_email_errors() {
        let err = panel("").resolve_delete_email().unwrap_err();
        assert!(matches!(err, AppError::Validation(IdentifierError::Empty)));

        let err = panel("boss@mail").resolve_delete_email().unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(IdentifierError::Invalid)
        ));
        assert_eq!(err.user_message(), "Enter a valid email or mobile number");
    }
}

//! Hierarchy lookup and delete commands.
//!
//! # Usage
//!
//! ```bash
//! pms-cli hierarchy show boss@example.com --collapse-all
//! pms-cli hierarchy delete 9876543210            # asks: reassign or delete, then confirm
//! pms-cli hierarchy delete boss@example.com --reassign
//! pms-cli hierarchy delete boss@example.com --yes
//! ```

use pms_admin::deletion::DeletionOutcome;
use pms_admin::hierarchy::{FetchOutcome, HierarchyPanel};
use pms_admin::{AdminConfig, AppError, AppState, PmsApi, PmsClient};
use pms_admin_core::IdentifierError;

use super::CliError;
use super::output::{Prompt, print_hierarchy, print_line, print_outcome, print_plan};

const DELETE_CHOICES: &str = "[r] Reportees reassign  [d] Delete entire hierarchy  [c] Close: ";

/// How the delete dialog is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Prompt for the choice and the confirmation.
    Ask,
    /// Take the reassignment path.
    Reassign,
    /// Delete the hierarchy without prompting.
    Delete,
}

enum Choice {
    Reassign,
    Delete,
    Close,
}

/// Fetch and print a hierarchy.
///
/// # Errors
///
/// Returns error if the identifier is invalid or the lookup fails.
pub async fn show(
    config: &AdminConfig,
    identifier: &str,
    collapse_all: bool,
) -> Result<(), CliError> {
    let client = PmsClient::new(config)?;
    let mut panel = HierarchyPanel::new(config.reassign_path.clone());

    fetch_into(&mut panel, &client, identifier).await?;
    if collapse_all {
        panel.collapse_all();
    }
    print_hierarchy(panel.view(), panel.is_loading());
    Ok(())
}

/// Fetch a hierarchy, then reassign or delete it.
///
/// # Errors
///
/// Returns error if the lookup or the delete fails.
pub async fn delete(
    config: &AdminConfig,
    identifier: &str,
    mode: DeleteMode,
) -> Result<(), CliError> {
    let client = PmsClient::new(config)?;
    let state = AppState::new();
    let mut panel = HierarchyPanel::new(config.reassign_path.clone());
    let mut prompt = Prompt::new();

    fetch_into(&mut panel, &client, identifier).await?;
    print_hierarchy(panel.view(), panel.is_loading());

    if let Some(outcome) = delete_dialog(&mut panel, &client, &state, &mut prompt, mode).await? {
        print_outcome(&outcome);
    }
    Ok(())
}

/// Load `identifier` into `panel`, rejecting invalid input before any
/// request is made.
pub(crate) async fn fetch_into<A: PmsApi>(
    panel: &mut HierarchyPanel,
    api: &A,
    identifier: &str,
) -> Result<FetchOutcome, CliError> {
    panel.set_identifier(identifier);
    if panel.identifier().trim().is_empty() {
        return Err(AppError::Validation(IdentifierError::Empty).into());
    }
    if let Some(e) = panel.identifier_error() {
        return Err(AppError::Validation(e).into());
    }

    Ok(panel.fetch(api).await?)
}

/// Walk the two-stage delete dialog. Returns the outcome when a delete was
/// sent, `None` when the dialog was closed or reassignment was chosen.
pub(crate) async fn delete_dialog<A: PmsApi>(
    panel: &mut HierarchyPanel,
    api: &A,
    state: &AppState,
    prompt: &mut Prompt,
    mode: DeleteMode,
) -> Result<Option<DeletionOutcome>, CliError> {
    panel.open_delete()?;
    let target = panel.identifier().trim().to_string();

    loop {
        let choice = match mode {
            DeleteMode::Reassign => Choice::Reassign,
            DeleteMode::Delete => Choice::Delete,
            DeleteMode::Ask => {
                print_line(&format!("Target user: {target}"));
                let answer = prompt.read_line(DELETE_CHOICES).await?;
                match answer.as_deref().map(str::to_lowercase).as_deref() {
                    Some("r" | "reassign") => Choice::Reassign,
                    Some("d" | "delete") => Choice::Delete,
                    Some("c" | "close" | "") | None => Choice::Close,
                    Some(other) => {
                        print_line(&format!("Unknown choice: {other}"));
                        continue;
                    }
                }
            }
        };

        match choice {
            Choice::Reassign => {
                let location = panel.choose_reassign()?;
                print_line(&format!("Reassign reportees at: {location}"));
                return Ok(None);
            }
            Choice::Close => {
                panel.close_delete();
                return Ok(None);
            }
            Choice::Delete => {
                let plan = panel.choose_delete_hierarchy()?;
                print_plan(&plan);

                if mode == DeleteMode::Ask
                    && !prompt.confirm("Yes, delete entire hierarchy?").await?
                {
                    // Back to the choice.
                    panel.cancel_delete();
                    continue;
                }

                let outcome = panel.confirm_delete(api, state).await?;
                return Ok(Some(outcome));
            }
        }
    }
}

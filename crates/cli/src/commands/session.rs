//! Interactive session.
//!
//! One hierarchy panel, one bulk deletion form and one results store live
//! for the whole session, so results from every deletion accumulate.
//!
//! ```text
//! pms> fetch boss@example.com
//! pms> toggle 3
//! pms> delete-tree
//! pms> add a@example.com
//! pms> add +91 98765 43210
//! pms> submit
//! pms> results
//! ```

use pms_admin::deletion::{BulkDeletion, EntryList};
use pms_admin::hierarchy::HierarchyPanel;
use pms_admin::{AdminConfig, AppState, PmsClient};
use pms_admin_core::{EntryId, NodeId};

use super::CliError;
use super::hierarchy::{DeleteMode, delete_dialog, fetch_into};
use super::output::{
    Prompt, print_hierarchy, print_line, print_lines, print_outcome, print_results, print_rows,
};
use super::users::{fill_rows, submit_and_confirm};

const HELP: &[&str] = &[
    "Hierarchy:",
    "  fetch <email|mobile>   Load a hierarchy",
    "  tree                   Show the loaded hierarchy",
    "  toggle <node-id>       Expand or collapse a node",
    "  expand | collapse      Expand or collapse every node",
    "  delete-tree            Reassign or delete the loaded hierarchy",
    "Bulk deletion:",
    "  add [value]            Add a row (an empty row without a value)",
    "  set <row> <value>      Change a row",
    "  rm <row>               Remove a row",
    "  rows                   Show the rows",
    "  submit                 Confirm and delete the valid rows",
    "Results:",
    "  results                Show accumulated results",
    "  clear-results          Forget accumulated results",
    "  help | quit",
];

struct Session {
    client: PmsClient,
    state: AppState,
    panel: HierarchyPanel,
    bulk: BulkDeletion,
    prompt: Prompt,
}

/// Run the session until `quit` or end of input.
///
/// # Errors
///
/// Returns error if the client cannot be built or stdin fails.
pub async fn run(config: &AdminConfig) -> Result<(), CliError> {
    let mut session = Session {
        client: PmsClient::new(config)?,
        state: AppState::new(),
        panel: HierarchyPanel::new(config.reassign_path.clone()),
        bulk: BulkDeletion::new(),
        prompt: Prompt::new(),
    };
    tracing::info!(base_url = %config.base_url, "Session started");
    print_line("Type `help` for commands.");

    while let Some(line) = session.prompt.read_line("pms> ").await? {
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line.as_str(), ""), |(c, r)| (c, r.trim()));

        if matches!(command, "quit" | "exit") {
            break;
        }

        match session.dispatch(command, rest).await {
            Ok(()) => {}
            Err(CliError::App(e)) => {
                e.report();
                print_line(&e.user_message());
            }
            Err(CliError::Aborted) => print_line("Cancelled."),
            Err(CliError::Io(e)) => return Err(CliError::Io(e)),
            Err(e) => print_line(&e.to_string()),
        }
    }

    Ok(())
}

impl Session {
    async fn dispatch(&mut self, command: &str, rest: &str) -> Result<(), CliError> {
        match command {
            "" => {}
            "help" => print_lines(HELP),

            "fetch" => {
                fetch_into(&mut self.panel, &self.client, rest).await?;
                self.show_tree();
            }
            "tree" => self.show_tree(),
            "toggle" => {
                let Ok(id) = rest.parse::<NodeId>() else {
                    print_line("Usage: toggle <node-id>");
                    return Ok(());
                };
                if self.panel.toggle(id).is_none() {
                    print_line(&format!("Node {id} has no reportees to show"));
                }
                self.show_tree();
            }
            "expand" => {
                self.panel.expand_all();
                self.show_tree();
            }
            "collapse" => {
                self.panel.collapse_all();
                self.show_tree();
            }
            "delete-tree" => {
                let outcome = delete_dialog(
                    &mut self.panel,
                    &self.client,
                    &self.state,
                    &mut self.prompt,
                    DeleteMode::Ask,
                )
                .await?;
                if let Some(outcome) = outcome {
                    print_outcome(&outcome);
                }
            }

            "add" => {
                let Some(entries) = self.bulk.entries_mut() else {
                    return Ok(());
                };
                add_entry(entries, rest);
                print_rows(self.bulk.entries());
            }
            "set" => {
                let parsed = rest
                    .split_once(char::is_whitespace)
                    .and_then(|(id, value)| Some((id.parse::<EntryId>().ok()?, value)));
                let (Some((id, value)), Some(entries)) = (parsed, self.bulk.entries_mut()) else {
                    print_line("Usage: set <row> <value>");
                    return Ok(());
                };
                if !entries.set_value(id, value) {
                    print_line(&format!("No row {id}"));
                }
                print_rows(self.bulk.entries());
            }
            "rm" => {
                let (Ok(id), Some(entries)) = (rest.parse::<EntryId>(), self.bulk.entries_mut())
                else {
                    print_line("Usage: rm <row>");
                    return Ok(());
                };
                entries.remove_row(id);
                print_rows(self.bulk.entries());
            }
            "rows" => print_rows(self.bulk.entries()),
            "submit" => {
                submit_and_confirm(
                    &mut self.bulk,
                    &self.client,
                    &self.state,
                    &mut self.prompt,
                    false,
                )
                .await?;
            }

            "results" => {
                print_results(&self.state.results().await);
                if let Some(updated) = self.state.last_updated().await {
                    print_line(&format!(
                        "Batches: {} | Last updated: {}",
                        self.state.batches().await,
                        updated.format("%Y-%m-%d %H:%M:%S UTC")
                    ));
                }
            }
            "clear-results" => {
                self.state.clear_results().await;
                print_line("Results cleared.");
            }

            other => print_line(&format!("Unknown command: {other}. Type `help`.")),
        }
        Ok(())
    }

    fn show_tree(&self) {
        print_hierarchy(self.panel.view(), self.panel.is_loading());
    }
}

/// `add [value]`: everything after the command is one value, so a mobile
/// number typed with spaces stays in one row.
fn add_entry(entries: &mut EntryList, value: &str) {
    if value.is_empty() {
        entries.add_row();
    } else {
        fill_rows(entries, &[value.to_string()]);
    }
}

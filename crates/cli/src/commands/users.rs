//! Bulk user deletion command.
//!
//! # Usage
//!
//! ```bash
//! pms-cli users delete a@example.com "+91 98765 43210"
//! pms-cli users delete a@example.com b@example.com --yes
//! ```

use pms_admin::deletion::{BulkDeletion, EntryList};
use pms_admin::{AdminConfig, AppState, PmsApi, PmsClient};

use super::CliError;
use super::output::{Prompt, print_line, print_lines, print_outcome, print_rows};

/// Delete `values` in one request after confirmation.
///
/// # Errors
///
/// Returns error if no value is valid, the operator declines, or the
/// request fails.
pub async fn delete(config: &AdminConfig, values: &[String], yes: bool) -> Result<(), CliError> {
    let client = PmsClient::new(config)?;
    let state = AppState::new();
    let mut bulk = BulkDeletion::new();

    if let Some(entries) = bulk.entries_mut() {
        fill_rows(entries, values);
    }

    print_rows(bulk.entries());
    if bulk.entries().has_invalid() {
        print_line("Invalid rows are skipped.");
    }

    let mut prompt = Prompt::new();
    submit_and_confirm(&mut bulk, &client, &state, &mut prompt, yes).await
}

/// Put `values` into the rows, reusing the initial empty row.
pub(crate) fn fill_rows(entries: &mut EntryList, values: &[String]) {
    for value in values {
        let id = match entries.entries() {
            [only] if only.value.is_empty() => only.id,
            _ => entries.add_row(),
        };
        entries.set_value(id, value);
    }
}

/// Submit the rows, show the pending list, confirm and send.
///
/// Without `yes`, a failed request offers a retry with the same list.
pub(crate) async fn submit_and_confirm<A: PmsApi>(
    bulk: &mut BulkDeletion,
    api: &A,
    state: &AppState,
    prompt: &mut Prompt,
    yes: bool,
) -> Result<(), CliError> {
    let pending = bulk.submit()?.to_vec();

    print_line(&format!("Delete {} user(s)?", pending.len()));
    print_lines(pending.iter().map(|value| format!("  {value}")));

    if !yes && !prompt.confirm("Confirm delete?").await? {
        bulk.cancel();
        return Err(CliError::Aborted);
    }

    loop {
        match bulk.confirm(api, state).await {
            Ok(outcome) => {
                if let Some(message) = bulk.result_message()
                    && message != outcome.summary
                {
                    print_line(message);
                }
                print_outcome(&outcome);
                return Ok(());
            }
            Err(e) => {
                print_line(&e.user_message());
                if yes || !prompt.confirm("Retry?").await? {
                    bulk.cancel();
                    return Err(CliError::App(e));
                }
            }
        }
    }
}

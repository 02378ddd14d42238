//! Terminal output and prompts.
//!
//! Command results go to stdout; logs go to stderr through `tracing`.

use std::io::Write;

use pms_admin::components::{DataTable, results_tables};
use pms_admin::deletion::{DeletionOutcome, DeletionResults, EntryList};
use pms_admin::hierarchy::{DeletePlan, HierarchyView};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Print lines to stdout.
#[allow(clippy::print_stdout)]
pub fn print_lines<I, S>(lines: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        println!("{}", line.as_ref());
    }
}

pub fn print_line(line: &str) {
    print_lines([line]);
}

pub fn print_table(table: &DataTable) {
    print_line(&table.render_text());
}

/// Hierarchy area: placeholder, `No data`, or the tree with its counts.
pub fn print_hierarchy(view: Option<HierarchyView>, loading: bool) {
    match view {
        None if loading => print_line("Loading..."),
        None => print_line("No data yet. Enter an identifier and fetch."),
        Some(HierarchyView::NoData) => print_line("No data"),
        Some(HierarchyView::Tree(tree)) => {
            print_line(&tree.header());
            print_lines(tree.to_lines());
        }
    }
}

pub fn print_plan(plan: &DeletePlan) {
    print_lines([
        format!("You are about to delete hierarchy for: {}", plan.target),
        format!(
            "Manager: {} | Reportees: {} | Total Nodes: {}",
            plan.managers, plan.reportees, plan.total_nodes
        ),
        "This action is irreversible. Consider reassigning reportees first.".to_string(),
    ]);
}

/// Rows with their ids and validation messages.
pub fn print_rows(entries: &EntryList) {
    for entry in entries.entries() {
        let status = entries
            .row_error(entry.id)
            .map_or_else(String::new, |e| format!("  ! {e}"));
        let value = if entry.value.is_empty() {
            "(empty)"
        } else {
            entry.value.as_str()
        };
        print_line(&format!("#{} {value}{status}", entry.id));
    }
}

pub fn print_results(results: &DeletionResults) {
    if results.is_empty() {
        print_line("No results yet.");
        return;
    }
    for table in results_tables(results) {
        print_line("");
        print_table(&table);
    }
}

pub fn print_outcome(outcome: &DeletionOutcome) {
    print_line(&outcome.summary);
    print_results(&outcome.results);
}

/// Line reader over stdin shared by prompts and the session loop.
pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Show `prompt` and read one trimmed line. `None` at end of input.
    #[allow(clippy::print_stdout)]
    pub async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        print!("{prompt}");
        std::io::stdout().flush()?;
        Ok(self
            .lines
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }

    /// Ask a yes/no question; anything but `y`/`yes` is no.
    pub async fn confirm(&mut self, question: &str) -> std::io::Result<bool> {
        let answer = self.read_line(&format!("{question} [y/N] ")).await?;
        let confirmed = answer.is_some_and(|a| matches!(a.to_lowercase().as_str(), "y" | "yes"));
        Ok(confirmed)
    }
}

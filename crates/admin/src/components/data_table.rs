//! Data table component types.
//!
//! A [`DataTable`] is a titled grid of text cells with a plain-text renderer.
//! [`results_tables`] builds the four tables shown after deletions.

use pms_admin_core::{BlockedManager, UserRecord};
use serde::Serialize;

use crate::deletion::DeletionResults;

/// Column definition for a data table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
}

impl TableColumn {
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

/// A titled table of text cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataTable {
    pub title: String,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    /// Shown instead of the grid when there are no rows.
    pub empty_text: String,
}

impl DataTable {
    #[must_use]
    pub fn new(title: &str, columns: Vec<TableColumn>) -> Self {
        Self {
            title: title.to_string(),
            columns,
            rows: Vec::new(),
            empty_text: "No entries.".to_string(),
        }
    }

    /// Set the text shown for an empty table.
    #[must_use]
    pub fn empty_text(mut self, text: &str) -> Self {
        self.empty_text = text.to_string();
        self
    }

    /// Append a row. Missing or empty cells become `-`; extra cells are
    /// dropped.
    pub fn push_row(&mut self, cells: Vec<String>) {
        let mut cells = cells;
        cells.resize(self.columns.len(), String::new());
        for cell in &mut cells {
            if cell.trim().is_empty() {
                *cell = "-".to_string();
            }
        }
        self.rows.push(cells);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as aligned plain text:
    ///
    /// ```text
    /// DELETED USERS (1)
    /// Name  Email    Mobile
    /// ----  -------  ------
    /// -     a@x.com  -
    /// ```
    #[must_use]
    pub fn render_text(&self) -> String {
        let title = format!("{} ({})", self.title.to_uppercase(), self.rows.len());
        let mut out = vec![title];

        if self.rows.is_empty() {
            out.push(self.empty_text.clone());
            return out.join("\n");
        }

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(column.label.chars().count()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        let line = |cells: Vec<&str>| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let header: Vec<&str> = self.columns.iter().map(|c| c.label.as_str()).collect();
        out.push(line(header));
        let rules: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        out.push(line(rules.iter().map(String::as_str).collect()));
        for row in &self.rows {
            out.push(line(row.iter().map(String::as_str).collect()));
        }

        out.join("\n")
    }
}

fn user_columns() -> Vec<TableColumn> {
    vec![
        TableColumn::new("name", "Name"),
        TableColumn::new("email", "Email"),
        TableColumn::new("mobile_number", "Mobile"),
    ]
}

fn user_cells(user: &UserRecord) -> Vec<String> {
    vec![
        user.name.clone().unwrap_or_default(),
        user.email.clone().unwrap_or_default(),
        user.mobile_number.clone().unwrap_or_default(),
    ]
}

fn users_table(title: &str, empty_text: &str, users: &[UserRecord]) -> DataTable {
    let mut table = DataTable::new(title, user_columns()).empty_text(empty_text);
    for user in users {
        table.push_row(user_cells(user));
    }
    table
}

/// `Name (email, mobile)` for each reportee, `; `-separated.
fn reportees_cell(manager: &BlockedManager) -> String {
    manager
        .reportees
        .iter()
        .map(|r| {
            let name = r.name.as_deref().unwrap_or("-");
            let email = r.email.as_deref().unwrap_or("-");
            match r.mobile_number.as_deref() {
                Some(mobile) => format!("{name} ({email}, {mobile})"),
                None => format!("{name} ({email})"),
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// The four result tables, in display order.
#[must_use]
pub fn results_tables(results: &DeletionResults) -> Vec<DataTable> {
    let deleted = users_table("Deleted Users", "No users deleted.", &results.deleted);
    let skipped = users_table(
        "Not Deleted (Internal)",
        "No users skipped.",
        &results.skipped,
    );

    let email_column = vec![TableColumn::new("email", "Email")];
    let mut not_found =
        DataTable::new("User Not Exist", email_column).empty_text("All users matched.");
    for identifier in &results.not_found {
        not_found.push_row(vec![identifier.clone()]);
    }

    let mut columns = user_columns();
    columns.push(TableColumn::new("reportees", "Reportees"));
    let mut blocked = DataTable::new("Not Deleted (Reportee)", columns);
    for manager in &results.blocked_managers {
        let mut cells = user_cells(&manager.user);
        cells.push(reportees_cell(manager));
        blocked.push_row(cells);
    }

    vec![deleted, skipped, not_found, blocked]
}

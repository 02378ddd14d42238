//! Offline identifier validation.
//!
//! # Usage
//!
//! ```bash
//! pms-cli check "A@Example.com " "+91 98765-43210" 12345
//! ```

use pms_admin::components::{DataTable, TableColumn};
use pms_admin_core::{Identifier, IdentifierKind, sanitize_input};

use super::CliError;
use super::output::print_table;

/// Print how each value is sanitized, classified and normalized.
///
/// # Errors
///
/// Returns [`CliError::InvalidInput`] when any value fails validation.
pub fn run(values: &[String]) -> Result<(), CliError> {
    let mut table = DataTable::new(
        "Identifiers",
        vec![
            TableColumn::new("input", "Input"),
            TableColumn::new("sanitized", "Sanitized"),
            TableColumn::new("kind", "Kind"),
            TableColumn::new("result", "Result"),
        ],
    );

    let mut invalid = 0;
    for value in values {
        let sanitized = sanitize_input(value);
        let kind = IdentifierKind::classify(&sanitized);
        let result = match Identifier::parse(&sanitized) {
            Ok(identifier) => identifier.into_inner(),
            Err(e) => {
                invalid += 1;
                e.to_string()
            }
        };
        let row = vec![format!("{value:?}"), sanitized, kind.to_string(), result];
        table.push_row(row);
    }

    print_table(&table);

    if invalid > 0 {
        return Err(CliError::InvalidInput(invalid));
    }
    Ok(())
}

//! Identifier rows for bulk deletion.

use std::collections::HashSet;

use pms_admin_core::{
    EntryId, IdentifierError, identifier_error, is_valid_identifier, normalize, sanitize_input,
};
use serde::Serialize;

use crate::error::AppError;

/// One input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub id: EntryId,
    /// Sanitized value as typed.
    pub value: String,
}

impl Entry {
    fn empty(id: EntryId) -> Self {
        Self {
            id,
            value: String::new(),
        }
    }

    fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Ordered identifier rows. There is always at least one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryList {
    entries: Vec<Entry>,
}

impl Default for EntryList {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryList {
    /// One empty row with id 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![Entry::empty(EntryId::new(1))],
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Append an empty row whose id is one more than the last row's.
    pub fn add_row(&mut self) -> EntryId {
        let id = self
            .entries
            .last()
            .map_or(EntryId::new(1), |last| EntryId::new(last.id.as_i64() + 1));
        self.entries.push(Entry::empty(id));
        id
    }

    /// Store the sanitized form of `raw` in row `id`. Returns `false` if the
    /// row does not exist.
    pub fn set_value(&mut self, id: EntryId, raw: &str) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.value = sanitize_input(raw);
                true
            }
            None => false,
        }
    }

    /// Remove row `id`. The last remaining row is cleared instead.
    pub fn remove_row(&mut self, id: EntryId) {
        if let [only] = self.entries.as_mut_slice() {
            only.value.clear();
            return;
        }
        self.entries.retain(|e| e.id != id);
    }

    /// Validation message for row `id`; `None` for empty or valid rows.
    #[must_use]
    pub fn row_error(&self, id: EntryId) -> Option<IdentifierError> {
        self.get(id).and_then(|e| identifier_error(&e.value))
    }

    /// At least one non-empty row.
    #[must_use]
    pub fn has_any(&self) -> bool {
        self.entries.iter().any(|e| !e.is_blank())
    }

    /// At least one non-empty row that fails validation.
    #[must_use]
    pub fn has_invalid(&self) -> bool {
        self.entries
            .iter()
            .any(|e| !e.is_blank() && !is_valid_identifier(&e.value))
    }

    /// Submission is allowed when something is typed and nothing typed is
    /// invalid.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.has_any() && !self.has_invalid()
    }

    /// Valid rows, normalized and de-duplicated in row order. Invalid and
    /// empty rows are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NothingToSubmit`] when no row is valid.
    pub fn prepare(&self) -> Result<Vec<String>, AppError> {
        let mut seen = HashSet::new();
        let values: Vec<String> = self
            .entries
            .iter()
            .map(|e| e.value.trim())
            .filter(|v| !v.is_empty() && is_valid_identifier(v))
            .map(normalize)
            .filter(|v| seen.insert(v.clone()))
            .collect();

        if values.is_empty() {
            return Err(AppError::NothingToSubmit);
        }
        Ok(values)
    }

    /// Back to a single empty row with id 1.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

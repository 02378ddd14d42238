//! Request and response bodies for the PMS user endpoints.

use pms_admin_core::{BlockedManager, UserRecord, lenient};
use serde::Serialize;
use serde_json::Value;

/// Body of `POST /pms/users/delete_user_with_reportees.json`.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteWithReporteesRequest<'a> {
    pub email: &'a str,
}

/// Body of `POST /pms/users/delete_multiple_vi_external_users.json`.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteMultipleRequest<'a> {
    pub users_email_mobile: &'a [String],
}

/// Outcome of one deletion request.
///
/// Both deletion endpoints answer with the same four arrays. Any of them may
/// be missing or of the wrong type; such fields decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletionReport {
    /// `deleted_users`
    pub deleted: Vec<UserRecord>,
    /// `skipped_users`
    pub skipped: Vec<UserRecord>,
    /// `not_found_users`, reduced to non-empty identifier strings
    pub not_found: Vec<String>,
    /// `not_deleted_due_to_reportee`
    pub blocked_managers: Vec<BlockedManager>,
    /// Optional top-level `message`
    pub message: Option<String>,
}

impl DeletionReport {
    /// Decode a response body defensively.
    ///
    /// Items of every array may be objects or bare identifier strings (or
    /// numbers). Bare identifiers become records carrying only that email or
    /// mobile number. `not_found_users` objects contribute their `email`.
    /// Anything else is dropped, as are empty strings.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let not_found = value
            .get("not_found_users")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::Object(_) => item.get("email").and_then(lenient::scalar_string),
                        other => lenient::scalar_string(other),
                    })
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            deleted: field_array(value, "deleted_users"),
            skipped: field_array(value, "skipped_users"),
            not_found,
            blocked_managers: field_array(value, "not_deleted_due_to_reportee"),
            message: value
                .get("message")
                .and_then(lenient::scalar_string)
                .filter(|s| !s.is_empty()),
        }
    }

    /// One-line summary: `Deleted: N | Skipped: N | User Not Exist: N`
    /// with zero segments omitted. Without any counts, the server message,
    /// else `Processed`.
    #[must_use]
    pub fn summary(&self) -> String {
        let parts: Vec<String> = [
            ("Deleted", self.deleted.len()),
            ("Skipped", self.skipped.len()),
            ("User Not Exist", self.not_found.len()),
        ]
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .map(|(label, n)| format!("{label}: {n}"))
        .collect();

        if parts.is_empty() {
            self.message
                .clone()
                .unwrap_or_else(|| "Processed".to_string())
        } else {
            parts.join(" | ")
        }
    }

    /// Message kept after a bulk deletion: the server message when present,
    /// otherwise the summary.
    #[must_use]
    pub fn result_message(&self) -> String {
        self.message.clone().unwrap_or_else(|| self.summary())
    }
}

/// Decode `value[key]` item by item. Objects go through serde; non-empty
/// scalars become bare identifier records.
fn field_array<T>(value: &Value, key: &str) -> Vec<T>
where
    T: serde::de::DeserializeOwned + From<UserRecord>,
{
    let Some(items) = value.get(key).and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(_) => serde_json::from_value(item.clone()).ok(),
            other => lenient::scalar_string(other)
                .filter(|s| !s.is_empty())
                .map(|s| UserRecord::from_identifier(&s).into()),
        })
        .collect()
}

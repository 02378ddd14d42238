//! Backend error message extraction.
//!
//! Non-2xx responses carry their message in several shapes (a bare JSON
//! string, `{"message": ..}`, `{"error": ..}`, `{"errors": [..]}`, HTML
//! error pages, plain text). [`extract_error_message`] reduces all of them to
//! one line of display text; [`user_facing`] applies the final "not found"
//! wording rewrite.

use std::sync::LazyLock;

use pms_admin_core::lenient;
use regex::Regex;
use serde_json::Value;

/// Fallback when a hierarchy lookup fails without a usable message.
pub const FETCH_HIERARCHY_FALLBACK: &str = "Failed to fetch hierarchy";

/// Fallback when a cascade delete fails without a usable message.
pub const DELETE_HIERARCHY_FALLBACK: &str = "Failed to delete hierarchy";

/// Fallback when a bulk delete fails without a usable message.
pub const DELETE_USERS_FALLBACK: &str = "Failed to delete users";

/// Wording used for every "not found" style backend message.
pub const USER_NOT_EXIST: &str = "User Not Exist";

/// Leftover single-field JSON object, e.g. `{"error": "boom"}`.
static WRAPPER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\{"[a-zA-Z_]+":\s*"(.+)"\}$"#).expect("Invalid regex"));

static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("Invalid regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex"));

static NOT_FOUND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)not\s*-?\s*found").expect("Invalid regex"));

/// Extract a display message from an error response body.
///
/// Priority: bare JSON string, `message`, `error`, `errors` (array joined
/// with `", "` or a string), then the raw body. The result has any leftover
/// `{"key": "value"}` wrapper removed, HTML tags replaced by spaces and
/// whitespace collapsed. An empty result yields `fallback`.
#[must_use]
pub fn extract_error_message(body: &str, fallback: &str) -> String {
    let raw = match serde_json::from_str::<Value>(body) {
        Ok(value) => message_from_json(&value).unwrap_or_else(|| body.to_string()),
        Err(_) => body.to_string(),
    };

    let unwrapped = WRAPPER_RE.replace(raw.trim(), "${1}");
    let stripped = HTML_TAG_RE.replace_all(&unwrapped, " ");
    let collapsed = WHITESPACE_RE.replace_all(&stripped, " ");
    let message = collapsed.trim();

    if message.is_empty() {
        fallback.to_string()
    } else {
        message.to_string()
    }
}

fn message_from_json(value: &Value) -> Option<String> {
    if let Value::String(s) = value {
        return Some(s.clone());
    }

    let field = |key: &str| {
        value
            .get(key)
            .and_then(lenient::scalar_string)
            .filter(|s| !s.is_empty())
    };

    field("message")
        .or_else(|| field("error"))
        .or_else(|| match value.get("errors")? {
            Value::Array(items) => Some(
                items
                    .iter()
                    .map(|item| lenient::scalar_string(item).unwrap_or_else(|| item.to_string()))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        })
}

/// Rewrite any "not found" phrasing (`not found`, `NotFound`, `not-found`)
/// to [`USER_NOT_EXIST`]; other messages pass through unchanged.
#[must_use]
pub fn user_facing(message: &str) -> String {
    if NOT_FOUND_RE.is_match(message) {
        USER_NOT_EXIST.to_string()
    } else {
        message.to_string()
    }
}

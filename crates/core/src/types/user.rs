//! User records returned by the deletion endpoints.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::identifier::IdentifierKind;
use super::lenient;

/// Deduplication key for a user record: `lowercase(email) + "|" + mobile`.
///
/// Records with neither an email nor a mobile number all share the key `"|"`
/// and therefore collapse into one entry when merged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserKey(String);

impl UserKey {
    /// Build a key from optional parts.
    #[must_use]
    pub fn new(email: Option<&str>, mobile_number: Option<&str>) -> Self {
        Self(format!(
            "{}|{}",
            email.unwrap_or_default().to_lowercase(),
            mobile_number.unwrap_or_default()
        ))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user as reported by the deletion endpoints. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Display name.
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub name: Option<String>,
    /// Account email.
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub email: Option<String>,
    /// Mobile number (the backend sometimes sends it as a JSON number).
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub mobile_number: Option<String>,
}

/// A reportee listed under a manager that could not be deleted.
pub type Reportee = UserRecord;

impl UserRecord {
    /// Create a record from its parts.
    #[must_use]
    pub fn new(name: Option<&str>, email: Option<&str>, mobile_number: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_owned),
            email: email.map(str::to_owned),
            mobile_number: mobile_number.map(str::to_owned),
        }
    }

    /// Record with only an email.
    #[must_use]
    pub fn with_email(email: &str) -> Self {
        Self::new(None, Some(email), None)
    }

    /// Record for a bare identifier string: an email when it contains `@`,
    /// otherwise a mobile number.
    #[must_use]
    pub fn from_identifier(raw: &str) -> Self {
        match IdentifierKind::classify(raw) {
            IdentifierKind::Email => Self::new(None, Some(raw), None),
            IdentifierKind::Mobile => Self::new(None, None, Some(raw)),
        }
    }

    /// Deduplication key.
    #[must_use]
    pub fn key(&self) -> UserKey {
        UserKey::new(self.email.as_deref(), self.mobile_number.as_deref())
    }

    /// Best single label: email, then mobile, then name, then `-`.
    #[must_use]
    pub fn label(&self) -> &str {
        self.email
            .as_deref()
            .or(self.mobile_number.as_deref())
            .or(self.name.as_deref())
            .unwrap_or("-")
    }
}

/// A manager the backend refused to delete because they still have reportees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedManager {
    /// The manager.
    #[serde(flatten)]
    pub user: UserRecord,
    /// Reportees blocking the deletion.
    #[serde(default, deserialize_with = "lenient::list")]
    pub reportees: Vec<Reportee>,
}

impl From<UserRecord> for BlockedManager {
    fn from(user: UserRecord) -> Self {
        Self {
            user,
            reportees: Vec::new(),
        }
    }
}

impl BlockedManager {
    /// Deduplication key of the manager.
    #[must_use]
    pub fn key(&self) -> UserKey {
        self.user.key()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_key_lowercases_email_only() {
        let a = UserRecord::new(None, Some("A@X.com"), Some("+91ABC"));
        assert_eq!(a.key().as_str(), "a@x.com|+91ABC");
    }

    #[test]
    fn test_anonymous_records_share_key() {
        let a = UserRecord::new(Some("One"), None, None);
        let b = UserRecord::new(Some("Two"), None, None);
        assert_eq!(a.key(), b.key());
        assert_eq!(a.key().as_str(), "|");
    }

    #[test]
    fn test_decode_numeric_mobile() {
        let record: UserRecord = serde_json::from_str(
            r#"{"name": null, "email": "", "mobile_number": 9876543210}"#,
        )
        .unwrap();
        assert_eq!(record.name, None);
        assert_eq!(record.email, None);
        assert_eq!(record.mobile_number.as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_decode_blocked_manager() {
        let manager: BlockedManager = serde_json::from_str(
            r#"{"name": "Boss", "email": "boss@x.com", "reportees": [{"email": "r@x.com"}, 42]}"#,
        )
        .unwrap();
        assert_eq!(manager.user.name.as_deref(), Some("Boss"));
        assert_eq!(manager.reportees, vec![UserRecord::with_email("r@x.com")]);
    }

    #[test]
    fn test_decode_blocked_manager_without_reportees() {
        let manager: BlockedManager =
            serde_json::from_str(r#"{"email": "boss@x.com", "reportees": null}"#).unwrap();
        assert!(manager.reportees.is_empty());
    }

    #[test]
    fn test_from_identifier_classifies() {
        assert_eq!(
            UserRecord::from_identifier("a@x.com"),
            UserRecord::with_email("a@x.com")
        );
        let record = UserRecord::from_identifier("9876543210");
        assert_eq!(record.mobile_number.as_deref(), Some("9876543210"));
        assert_eq!(record.email, None);
    }

    #[test]
    fn test_label_fallbacks() {
        assert_eq!(UserRecord::with_email("a@x.com").label(), "a@x.com");
        assert_eq!(UserRecord::new(Some("N"), None, Some("123")).label(), "123");
        assert_eq!(UserRecord::default().label(), "-");
    }
}

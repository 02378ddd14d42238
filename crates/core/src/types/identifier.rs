//! Operator-typed account identifiers.
//!
//! An identifier is whatever the operator types to name an account: an email
//! address or a mobile number. The two are told apart by a single rule, the
//! presence of `@`, and every helper in this module goes through
//! [`IdentifierKind::classify`] so the rule is applied the same way
//! everywhere.
//!
//! Three stages are distinct:
//!
//! - [`sanitize_input`] runs on every keystroke and may leave a partially
//!   typed, still-invalid value.
//! - [`identifier_error`] decides what (if anything) to show under the field.
//! - [`normalize`] / [`Identifier::parse`] produce the value sent to the
//!   backend.

use core::fmt;

use serde::Serialize;

use super::email::Email;
use super::mobile::{self, MobileNumber};

/// Which validation path an input goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    /// Contains `@`.
    Email,
    /// Anything without `@`.
    Mobile,
}

impl IdentifierKind {
    /// Classify raw input. Inputs containing `@` are emails, everything else
    /// is a mobile number (including free text, which then fails validation).
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        if raw.contains('@') {
            Self::Email
        } else {
            Self::Mobile
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Mobile => "mobile",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validation failure for an identifier.
///
/// The `Display` strings are the exact messages shown to the operator.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierError {
    /// Nothing was entered.
    #[error("Enter a valid email or mobile number")]
    Empty,
    /// Email-shaped input that is not a valid address.
    #[error("Enter a valid email address")]
    InvalidEmail,
    /// Mobile-shaped input without 10-15 digits.
    #[error("Enter a valid mobile number (min 10 digits)")]
    InvalidMobile,
    /// Rejected input where no path-specific message is shown.
    #[error("Enter a valid email or mobile number")]
    Invalid,
}

/// A validated, normalized identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Identifier {
    /// Lowercased, trimmed email address.
    Email(Email),
    /// Mobile number with an optional leading `+` and digits only.
    Mobile(MobileNumber),
}

impl Identifier {
    /// Parse and normalize raw input.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::Empty`] for blank input, otherwise the error
    /// for the path chosen by [`IdentifierKind::classify`].
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentifierError::Empty);
        }

        match IdentifierKind::classify(trimmed) {
            IdentifierKind::Email => Email::parse(trimmed)
                .map(Self::Email)
                .map_err(|_| IdentifierError::InvalidEmail),
            IdentifierKind::Mobile => MobileNumber::parse(trimmed)
                .map(Self::Mobile)
                .map_err(|_| IdentifierError::InvalidMobile),
        }
    }

    /// Which path this identifier was validated through.
    #[must_use]
    pub const fn kind(&self) -> IdentifierKind {
        match self {
            Self::Email(_) => IdentifierKind::Email,
            Self::Mobile(_) => IdentifierKind::Mobile,
        }
    }

    /// The normalized value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Email(email) => email.as_str(),
            Self::Mobile(mobile) => mobile.as_str(),
        }
    }

    /// The email, when this identifier is one.
    #[must_use]
    pub const fn as_email(&self) -> Option<&Email> {
        match self {
            Self::Email(email) => Some(email),
            Self::Mobile(_) => None,
        }
    }

    /// Consumes the identifier and returns the normalized string.
    #[must_use]
    pub fn into_inner(self) -> String {
        match self {
            Self::Email(email) => email.into_inner(),
            Self::Mobile(mobile) => mobile.into_inner(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Sanitize input as it is typed.
///
/// Whitespace is always removed. If what remains contains an ASCII letter or
/// `@` it is treated as a (possibly partial) email and lowercased with every
/// other character kept. Otherwise it is treated as a phone number: only a
/// leading `+` and at most 15 digits survive.
#[must_use]
pub fn sanitize_input(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if compact.chars().any(|c| c.is_ascii_alphabetic() || c == '@') {
        return compact.to_lowercase();
    }

    let digits: String = compact
        .chars()
        .filter(char::is_ascii_digit)
        .take(MobileNumber::MAX_DIGITS)
        .collect();

    if compact.starts_with('+') {
        format!("+{digits}")
    } else {
        digits
    }
}

/// Normalize input for submission.
///
/// Emails are trimmed and lowercased; anything else keeps a leading `+` and
/// its digits. Applying `normalize` twice gives the same result as once.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    match IdentifierKind::classify(trimmed) {
        IdentifierKind::Email => trimmed.to_lowercase(),
        IdentifierKind::Mobile => mobile::normalize_digits(trimmed),
    }
}

/// `true` if the input is a valid email address.
#[must_use]
pub fn is_valid_email(raw: &str) -> bool {
    Email::is_valid(raw)
}

/// `true` if the input has 10-15 digits.
#[must_use]
pub fn is_valid_mobile(raw: &str) -> bool {
    MobileNumber::is_valid(raw)
}

/// `true` if the input is a non-empty valid email or mobile number.
#[must_use]
pub fn is_valid_identifier(raw: &str) -> bool {
    Identifier::parse(raw).is_ok()
}

/// The message to show under an input field, if any.
///
/// Empty input is not an error until a submission is attempted.
#[must_use]
pub fn identifier_error(raw: &str) -> Option<IdentifierError> {
    match Identifier::parse(raw) {
        Ok(_) | Err(IdentifierError::Empty) => None,
        Err(e) => Some(e),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_at_sign() {
        assert_eq!(IdentifierKind::classify("a@x.com"), IdentifierKind::Email);
        assert_eq!(IdentifierKind::classify("@"), IdentifierKind::Email);
        assert_eq!(
            IdentifierKind::classify("9876543210"),
            IdentifierKind::Mobile
        );
        assert_eq!(
            IdentifierKind::classify("bad-email"),
            IdentifierKind::Mobile
        );
    }

    #[test]
    fn test_classification_drives_error_message() {
        // Every input with @ fails (if at all) on the email path, every input
        // without @ on the mobile path.
        for raw in ["a@", "a@x", "@x.com", "x@y.z"] {
            assert_eq!(identifier_error(raw), Some(IdentifierError::InvalidEmail));
        }
        for raw in ["abc", "12345", "bad-email", "+91"] {
            assert_eq!(identifier_error(raw), Some(IdentifierError::InvalidMobile));
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            IdentifierError::InvalidEmail.to_string(),
            "Enter a valid email address"
        );
        assert_eq!(
            IdentifierError::InvalidMobile.to_string(),
            "Enter a valid mobile number (min 10 digits)"
        );
        assert_eq!(
            IdentifierError::Invalid.to_string(),
            "Enter a valid email or mobile number"
        );
        assert_ne!(IdentifierError::Invalid, IdentifierError::Empty);
    }

    #[test]
    fn test_empty_input_has_no_error() {
        assert_eq!(identifier_error(""), None);
        assert_eq!(identifier_error("   "), None);
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn test_sanitize_email_like() {
        assert_eq!(
            sanitize_input(" John.Doe @Example.com "),
            "john.doe@example.com"
        );
        // Partial emails are left alone apart from case and whitespace.
        assert_eq!(sanitize_input("JOHN@"), "john@");
        assert_eq!(sanitize_input("a-b_c"), "a-b_c");
    }

    #[test]
    fn test_sanitize_phone_like() {
        assert_eq!(sanitize_input("+91 98765-43210"), "+919876543210");
        assert_eq!(sanitize_input("(415) 555 0100"), "4155550100");
        assert_eq!(sanitize_input("1234567890123456789"), "123456789012345");
        assert_eq!(sanitize_input("+"), "+");
        assert_eq!(sanitize_input(""), "");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  A@X.com "), "a@x.com");
        assert_eq!(normalize(" +1 415-555-0100"), "+14155550100");
        assert_eq!(normalize("415.555.0100"), "4155550100");
    }

    #[test]
    fn test_normalize_idempotent_for_valid_inputs() {
        for raw in [
            "a@x.com",
            " Mixed.Case@Example.ORG ",
            "9876543210",
            "+91 98765 43210",
            "(415) 555-0100",
        ] {
            assert!(is_valid_identifier(raw), "{raw} should be valid");
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_parse_matches_normalize() {
        for raw in ["A@X.com ", "+91 98765 43210"] {
            assert_eq!(Identifier::parse(raw).unwrap().as_str(), normalize(raw));
        }
    }

    #[test]
    fn test_parse_kinds() {
        let email = Identifier::parse("User@Example.com").unwrap();
        assert_eq!(email.kind(), IdentifierKind::Email);
        assert_eq!(email.as_email().unwrap().as_str(), "user@example.com");

        let mobile = Identifier::parse("9876543210").unwrap();
        assert_eq!(mobile.kind(), IdentifierKind::Mobile);
        assert!(mobile.as_email().is_none());
    }

    #[test]
    fn test_text_without_digits_is_rejected() {
        assert_eq!(
            Identifier::parse("hello"),
            Err(IdentifierError::InvalidMobile)
        );
    }

    #[test]
    fn test_serialize_as_plain_string() {
        let id = Identifier::parse("+919876543210").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"+919876543210\"");
    }
}

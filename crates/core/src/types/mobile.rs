//! Mobile number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`MobileNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MobileNumberError {
    /// Fewer than [`MobileNumber::MIN_DIGITS`] digits.
    #[error("mobile number must have at least {min} digits (got {got})")]
    TooShort {
        /// Minimum digit count.
        min: usize,
        /// Digits found in the input.
        got: usize,
    },
    /// More than [`MobileNumber::MAX_DIGITS`] digits.
    #[error("mobile number must have at most {max} digits (got {got})")]
    TooLong {
        /// Maximum digit count.
        max: usize,
        /// Digits found in the input.
        got: usize,
    },
}

/// A normalized mobile number: an optional leading `+` followed by 10-15 digits.
///
/// Separators (spaces, dashes, parentheses) are dropped during parsing, the
/// leading `+` is kept when the trimmed input starts with one.
///
/// ```
/// use pms_admin_core::MobileNumber;
///
/// let m = MobileNumber::parse(" +91 98765-43210 ").unwrap();
/// assert_eq!(m.as_str(), "+919876543210");
/// assert!(MobileNumber::parse("12345").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Minimum number of digits.
    pub const MIN_DIGITS: usize = 10;
    /// Maximum number of digits.
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `MobileNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input has fewer than 10 or more than 15 digits
    /// once every non-digit character is removed.
    pub fn parse(s: &str) -> Result<Self, MobileNumberError> {
        let got = digit_count(s);
        if got < Self::MIN_DIGITS {
            return Err(MobileNumberError::TooShort {
                min: Self::MIN_DIGITS,
                got,
            });
        }
        if got > Self::MAX_DIGITS {
            return Err(MobileNumberError::TooLong {
                max: Self::MAX_DIGITS,
                got,
            });
        }
        Ok(Self(normalize_digits(s)))
    }

    /// Returns `true` if `s` contains between 10 and 15 digits.
    #[must_use]
    pub fn is_valid(s: &str) -> bool {
        (Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digit_count(s))
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `MobileNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns only the digits (without a leading `+`).
    #[must_use]
    pub fn digits(&self) -> &str {
        self.0.trim_start_matches('+')
    }
}

/// Count ASCII digits in `s`.
pub(crate) fn digit_count(s: &str) -> usize {
    s.chars().filter(char::is_ascii_digit).count()
}

/// Keep a leading `+` (after trimming) and every ASCII digit.
pub(crate) fn normalize_digits(s: &str) -> String {
    let trimmed = s.trim();
    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    if trimmed.starts_with('+') {
        format!("+{digits}")
    } else {
        digits
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MobileNumber {
    type Err = MobileNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for MobileNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty after normalization.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains characters other than digits, `+`, and the
    /// stripped separators.
    #[error("phone number contains invalid characters")]
    InvalidCharacter,
    /// The digit count is outside the accepted range for its form.
    #[error("phone number has an invalid length")]
    InvalidLength,
}

/// A normalized phone number.
///
/// Spaces, hyphens, and parentheses are stripped on parse. The remainder
/// must be one of:
///
/// - international form: optional `+` followed by 7-15 digits
/// - local form: `0` followed by 6-14 digits
///
/// The stored value is the normalized string (separators removed).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a `Phone` from a string, stripping common separators.
    ///
    /// # Errors
    ///
    /// Returns an error if the normalized input is empty, contains
    /// non-digit characters, or has a digit count outside the allowed
    /// range.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
            .collect();

        if normalized.is_empty() {
            return Err(PhoneError::Empty);
        }

        let digits = normalized.strip_prefix('+').unwrap_or(&normalized);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneError::InvalidCharacter);
        }

        // Both accepted forms (local `0` + 6-14 digits, international
        // 7-15 digits) reduce to a 7-15 digit count after normalization.
        if !(7..=15).contains(&digits.len()) {
            return Err(PhoneError::InvalidLength);
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce the desk's input rules (positive identifiers,
//! bounded names, normalized/validated email, bounded ages) so that once a
//! value reaches a [`CustomerPayload`](super::customer::CustomerPayload) it
//! can be sent to the directory as-is.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Longest accepted customer name, in characters.
pub const MAX_NAME_CHARS: usize = 15;

/// Oldest accepted customer age.
pub const MAX_AGE: i64 = 125;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided string is longer than allowed.
    #[error("value must be at most {max} characters")]
    TooLong { max: usize },
    /// Provided text does not parse as a number.
    #[error("value is not a number")]
    NotANumber,
    /// Provided number is zero or negative.
    #[error("value must be positive")]
    NonPositive,
    /// Provided number has a fractional part.
    #[error("value must be an integer")]
    NotInteger,
    /// Provided number is above the accepted maximum.
    #[error("value must be at most {max}")]
    AboveMaximum { max: i64 },
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Unique identifier for a customer, assigned by the directory.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "i32", into = "i32")]
pub struct CustomerId(i32);

impl CustomerId {
    /// Creates a new identifier ensuring it is greater than zero.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveId)
        }
    }

    /// Returns the raw `i32` backing this identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for CustomerId {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CustomerId> for i32 {
    fn from(value: CustomerId) -> Self {
        value.0
    }
}

/// Customer display name: non-blank, at most [`MAX_NAME_CHARS`] long as
/// typed, and stored trimmed.
#[derive(Clone, Debug, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CustomerName(String);

impl CustomerName {
    /// Checks the typed length, then trims surrounding whitespace.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        if raw.chars().count() > MAX_NAME_CHARS {
            return Err(TypeConstraintError::TooLong {
                max: MAX_NAME_CHARS,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CustomerName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for CustomerName {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lower-cased and validated customer email address.
#[derive(Clone, Debug, Serialize, PartialEq, Eq, Hash)]
pub struct CustomerEmail(String);

impl CustomerEmail {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CustomerEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for CustomerEmail {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Customer age in whole years, between 1 and [`MAX_AGE`].
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct CustomerAge(u8);

impl CustomerAge {
    /// Wraps an integer age after checking its bounds.
    pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
        if value <= 0 {
            return Err(TypeConstraintError::NonPositive);
        }
        if value > MAX_AGE {
            return Err(TypeConstraintError::AboveMaximum { max: MAX_AGE });
        }
        u8::try_from(value)
            .map(Self)
            .map_err(|_| TypeConstraintError::AboveMaximum { max: MAX_AGE })
    }

    /// Parses free text typed into the age field.
    ///
    /// Any finite number is accepted by the parser; `"30"` and `"30.0"` both
    /// yield thirty, while `"30.5"` is rejected as a non-integer.
    pub fn parse(raw: &str) -> Result<Self, TypeConstraintError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        let number: f64 = trimmed
            .parse()
            .map_err(|_| TypeConstraintError::NotANumber)?;
        if !number.is_finite() {
            return Err(TypeConstraintError::NotANumber);
        }
        if number <= 0.0 {
            return Err(TypeConstraintError::NonPositive);
        }
        if number.fract() != 0.0 {
            return Err(TypeConstraintError::NotInteger);
        }
        if number > MAX_AGE as f64 {
            return Err(TypeConstraintError::AboveMaximum { max: MAX_AGE });
        }
        Self::new(number as i64)
    }

    /// Returns the age in years.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Display for CustomerAge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

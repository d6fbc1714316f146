//! Payload validation rules shared by every entity.
//!
//! # Invariants
//! - Validation runs before any store access.
//! - Optional text is never rewritten; `None` stays `None`.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection raised before a payload reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Payload could not be decoded: missing field, wrong type, bad date.
    Payload(String),
    /// Required text field is empty or whitespace-only.
    BlankField(&'static str),
    /// Decimal field is NaN or infinite.
    NonFiniteNumber(&'static str),
    /// Page size must be greater than zero.
    InvalidLimit(u32),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Payload(message) => write!(f, "invalid payload: {message}"),
            Self::BlankField(field) => write!(f, "field `{field}` must not be blank"),
            Self::NonFiniteNumber(field) => write!(f, "field `{field}` must be a finite number"),
            Self::InvalidLimit(limit) => write!(f, "limit must be greater than 0, got {limit}"),
        }
    }
}

impl Error for ValidationError {}

/// Implemented by every payload type accepted by a create/update operation.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}

pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteNumber(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{require_finite, require_text, ValidationError};

    #[test]
    fn require_text_rejects_whitespace_only() {
        assert_eq!(
            require_text("name", " \t"),
            Err(ValidationError::BlankField("name"))
        );
        assert!(require_text("name", "Acme").is_ok());
    }

    #[test]
    fn require_finite_rejects_nan_and_infinity() {
        assert!(require_finite("price", f64::NAN).is_err());
        assert!(require_finite("price", f64::INFINITY).is_err());
        assert!(require_finite("price", 0.0).is_ok());
    }
}

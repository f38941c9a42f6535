//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants such as an out-of-range total, readiness). Transport concerns belong to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. a required field is missing).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A single form field carried a value that could not be accepted.
    ///
    /// `line` is the zero-based position of the voucher line, `None` for
    /// header fields.
    #[error("validation failed: {field}{} is not a valid number: {value:?}", line_suffix(.line))]
    InvalidField {
        line: Option<usize>,
        field: &'static str,
        value: String,
    },

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced record was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A conflict occurred (e.g. contradictory input).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Required upstream data has not been delivered yet, or failed to load.
    #[error("not ready: {0}")]
    NotReady(String),
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(i) => format!(" (line {})", i + 1),
        None => String::new(),
    }
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_field(
        line: Option<usize>,
        field: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            line,
            field,
            value: value.into(),
        }
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn not_ready(msg: impl Into<String>) -> Self {
        Self::NotReady(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_field_message_names_line_and_field() {
        let err = DomainError::invalid_field(Some(2), "rate", "abc");
        assert_eq!(
            err.to_string(),
            "validation failed: rate (line 3) is not a valid number: \"abc\""
        );
    }

    #[test]
    fn header_field_message_has_no_line() {
        let err = DomainError::invalid_field(None, "voucherTypeId", "x");
        assert_eq!(
            err.to_string(),
            "validation failed: voucherTypeId is not a valid number: \"x\""
        );
    }
}

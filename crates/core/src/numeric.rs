//! Numeric form input.
//!
//! Every monetary or quantity field arrives as the raw text of an input box.
//! [`NumericPolicy`] decides what happens to text that is not a number.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// How to treat numeric input that cannot be used as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericPolicy {
    /// Empty or non-numeric input reads as zero.
    #[default]
    Lenient,
    /// Non-numeric or negative input is a validation error. Empty input is zero.
    Strict,
}

impl FromStr for NumericPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(DomainError::validation(format!(
                "unknown numeric policy '{other}' (expected lenient or strict)"
            ))),
        }
    }
}

/// Parse raw input into a decimal.
///
/// Returns `None` for empty input and for anything that is not a number.
/// Plain (`12.50`) and scientific (`1.2e3`) notation are accepted.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Read a numeric field under `policy`.
///
/// `line` and `field` only label the error.
pub fn read_number(
    raw: &str,
    policy: NumericPolicy,
    line: Option<usize>,
    field: &'static str,
) -> DomainResult<Decimal> {
    if raw.trim().is_empty() {
        return Ok(Decimal::ZERO);
    }

    match (parse_decimal(raw), policy) {
        (Some(value), NumericPolicy::Strict) if value.is_sign_negative() && !value.is_zero() => {
            Err(DomainError::invalid_field(line, field, raw))
        }
        (Some(value), _) => Ok(value),
        (None, NumericPolicy::Lenient) => {
            tracing::debug!(field, raw, "non-numeric input read as zero");
            Ok(Decimal::ZERO)
        }
        (None, NumericPolicy::Strict) => Err(DomainError::invalid_field(line, field, raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_plain_and_scientific() {
        assert_eq!(parse_decimal("12.50"), Some(dec!(12.50)));
        assert_eq!(parse_decimal(" 3 "), Some(dec!(3)));
        assert_eq!(parse_decimal("1.2e3"), Some(dec!(1200)));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("ten"), None);
    }

    #[test]
    fn lenient_reads_garbage_as_zero() {
        let v = read_number("abc", NumericPolicy::Lenient, Some(0), "amount").unwrap();
        assert_eq!(v, Decimal::ZERO);
        let v = read_number("", NumericPolicy::Lenient, Some(0), "amount").unwrap();
        assert_eq!(v, Decimal::ZERO);
    }

    #[test]
    fn strict_rejects_garbage_and_negatives() {
        let err = read_number("abc", NumericPolicy::Strict, Some(1), "rate").unwrap_err();
        assert_eq!(err, DomainError::invalid_field(Some(1), "rate", "abc"));

        let err = read_number("-5", NumericPolicy::Strict, Some(0), "debit").unwrap_err();
        assert!(matches!(err, DomainError::InvalidField { field: "debit", .. }));

        assert_eq!(
            read_number("", NumericPolicy::Strict, None, "amount").unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!("Strict".parse::<NumericPolicy>().unwrap(), NumericPolicy::Strict);
        assert_eq!("lenient".parse::<NumericPolicy>().unwrap(), NumericPolicy::Lenient);
        assert!("loose".parse::<NumericPolicy>().is_err());
    }

    proptest! {
        #[test]
        fn lenient_read_never_fails(raw in ".{0,24}") {
            prop_assert!(read_number(&raw, NumericPolicy::Lenient, None, "amount").is_ok());
        }

        #[test]
        fn strict_read_keeps_non_negative_values(cents in 0i64..1_000_000_000) {
            let value = Decimal::new(cents, 2);
            let raw = value.to_string();
            let read = read_number(&raw, NumericPolicy::Strict, Some(0), "rate").unwrap();
            prop_assert_eq!(read, value);
        }
    }
}

//! Strongly-typed identifiers used across the domain.
//!
//! The backend keys every master record with a positive integer. Zero is the
//! backend's "unset" marker and is never produced by parsing.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a ledger account.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerId(i64);

/// Identifier of a product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

/// Identifier of a tax rate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRateId(i64);

/// Identifier of a voucher type (journal, sales, purchase, ...).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoucherTypeId(i64);

/// Identifier of a stored voucher.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoucherId(i64);

/// Identifier of a stored voucher line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoucherItemId(i64);

/// Identifier of a company profile (tenant boundary).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(i64);

/// Identifier of a user.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

macro_rules! impl_int_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(&self) -> i64 {
                self.0
            }

            /// Parse a form value (a `<select>` option value).
            ///
            /// Empty input means "nothing selected" and yields `Ok(None)`.
            pub fn parse_optional(raw: &str) -> Result<Option<Self>, DomainError> {
                let raw = raw.trim();
                if raw.is_empty() {
                    return Ok(None);
                }
                raw.parse().map(Some)
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = i64::from_str(s.trim())
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                if value <= 0 {
                    return Err(DomainError::invalid_id(format!(
                        "{}: must be positive, got {}",
                        $name, value
                    )));
                }
                Ok(Self(value))
            }
        }
    };
}

impl_int_newtype!(LedgerId, "LedgerId");
impl_int_newtype!(ProductId, "ProductId");
impl_int_newtype!(TaxRateId, "TaxRateId");
impl_int_newtype!(VoucherTypeId, "VoucherTypeId");
impl_int_newtype!(VoucherId, "VoucherId");
impl_int_newtype!(VoucherItemId, "VoucherItemId");
impl_int_newtype!(CompanyId, "CompanyId");
impl_int_newtype!(UserId, "UserId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_select_values() {
        assert_eq!(LedgerId::parse_optional("").unwrap(), None);
        assert_eq!(LedgerId::parse_optional("  ").unwrap(), None);
        assert_eq!(LedgerId::parse_optional("17").unwrap(), Some(LedgerId::new(17)));
    }

    #[test]
    fn rejects_garbage_and_non_positive() {
        assert!(matches!(
            TaxRateId::parse_optional("abc"),
            Err(DomainError::InvalidId(_))
        ));
        assert!(matches!("0".parse::<TaxRateId>(), Err(DomainError::InvalidId(_))));
        assert!(matches!("-4".parse::<TaxRateId>(), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&VoucherId::new(42)).unwrap();
        assert_eq!(json, "42");
        let back: VoucherId = serde_json::from_str("42").unwrap();
        assert_eq!(back, VoucherId::new(42));
    }
}

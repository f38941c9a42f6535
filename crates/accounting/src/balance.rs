//! Debit/credit classification of voucher lines.

use rust_decimal::Decimal;

use tallybook_core::{DomainError, DomainResult, ValueObject};

use crate::config::BalanceConflictPolicy;
use crate::line::{BalanceType, VoucherLine};

/// Posting side of a line.
///
/// A positive debit means D, otherwise a positive credit means C, otherwise
/// the explicit type if one was given, otherwise D. A line with both sides
/// positive is therefore D; see [`check_balance_conflict`].
pub fn derive_balance_type(
    debit: Decimal,
    credit: Decimal,
    explicit: Option<BalanceType>,
) -> BalanceType {
    if debit > Decimal::ZERO {
        BalanceType::Debit
    } else if credit > Decimal::ZERO {
        BalanceType::Credit
    } else {
        explicit.unwrap_or_default()
    }
}

/// Posting side of a read line.
pub fn line_balance_type(line: &VoucherLine) -> BalanceType {
    derive_balance_type(line.debit, line.credit, line.balance_type)
}

/// Reject a line with both a positive debit and a positive credit, if the
/// policy says so.
pub fn check_balance_conflict(
    index: usize,
    line: &VoucherLine,
    policy: BalanceConflictPolicy,
) -> DomainResult<()> {
    let both = line.debit > Decimal::ZERO && line.credit > Decimal::ZERO;
    match (both, policy) {
        (true, BalanceConflictPolicy::Reject) => Err(DomainError::conflict(format!(
            "line {} has both a debit ({}) and a credit ({})",
            index + 1,
            line.debit,
            line.credit
        ))),
        (true, BalanceConflictPolicy::Debit) => {
            tracing::debug!(line = index + 1, "debit and credit both set; posting as debit");
            Ok(())
        }
        (false, _) => Ok(()),
    }
}

/// Debit and credit totals of a voucher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalanceSummary {
    pub debit_total: Decimal,
    pub credit_total: Decimal,
}

impl ValueObject for BalanceSummary {}

impl BalanceSummary {
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a VoucherLine>,
    {
        lines.into_iter().fold(Self::default(), |mut acc, line| {
            acc.debit_total = acc.debit_total.saturating_add(line.debit);
            acc.credit_total = acc.credit_total.saturating_add(line.credit);
            acc
        })
    }

    /// `debit_total - credit_total`; positive means debit-heavy. Totals
    /// saturate at the range of [`Decimal`].
    pub fn difference(&self) -> Decimal {
        self.debit_total.saturating_sub(self.credit_total)
    }

    /// Debits equal credits.
    pub fn is_balanced(&self) -> bool {
        self.difference().is_zero()
    }

    /// Side that carries the excess, if any.
    pub fn heavier_side(&self) -> Option<BalanceType> {
        let diff = self.difference();
        if diff > Decimal::ZERO {
            Some(BalanceType::Debit)
        } else if diff < Decimal::ZERO {
            Some(BalanceType::Credit)
        } else {
            None
        }
    }
}

//! Voucher line pricing.
//!
//! Pure and total: every function here is defined for every input, performs no
//! IO and never fails. Arithmetic is exact decimal arithmetic; rounding only
//! happens in [`round_for_display`].
//!
//! Figures beyond the range of [`Decimal`] saturate at `Decimal::MAX` (or
//! `Decimal::MIN`). The `checked_*` variants report the overflow instead, and
//! payload validation uses them to refuse saving a saturated figure.

use rust_decimal::{Decimal, RoundingStrategy};

use tallybook_core::ValueObject;

use crate::line::VoucherLine;
use crate::tax::TaxRateTable;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

fn present(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}

/// Base amount of a line before tax, or `None` if `quantity * rate`
/// overflows.
pub fn checked_resolve_amount(
    quantity: Option<Decimal>,
    rate: Option<Decimal>,
    amount: Option<Decimal>,
) -> Option<Decimal> {
    if let Some(amount) = present(amount) {
        return Some(amount);
    }
    match (present(quantity), present(rate)) {
        (Some(q), Some(r)) => q.checked_mul(r),
        _ => Some(Decimal::ZERO),
    }
}

/// Base amount of a line before tax.
///
/// An explicit non-zero `amount` wins. Otherwise, if both `quantity` and
/// `rate` are present and non-zero, the amount is their product. Otherwise `0`.
pub fn resolve_amount(
    quantity: Option<Decimal>,
    rate: Option<Decimal>,
    amount: Option<Decimal>,
) -> Decimal {
    checked_resolve_amount(quantity, rate, amount).unwrap_or_else(|| {
        quantity
            .unwrap_or_default()
            .saturating_mul(rate.unwrap_or_default())
    })
}

pub fn checked_tax_amount(amount: Decimal, rate_percent: Decimal) -> Option<Decimal> {
    amount.checked_mul(rate_percent).map(|v| v / HUNDRED)
}

/// Tax on `amount` at `rate_percent`.
pub fn tax_amount(amount: Decimal, rate_percent: Decimal) -> Decimal {
    amount.saturating_mul(rate_percent) / HUNDRED
}

/// Tax-inclusive total: `amount + amount * rate_percent / 100`.
pub fn apply_tax(amount: Decimal, rate_percent: Decimal) -> Decimal {
    amount.saturating_add(tax_amount(amount, rate_percent))
}

/// Computed figures for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineAmounts {
    pub amount: Decimal,
    pub rate_percent: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl ValueObject for LineAmounts {}

/// Price one line against the tax table.
///
/// A tax reference that is not in the table prices at 0%.
pub fn price_line(line: &VoucherLine, tax_rates: &TaxRateTable) -> LineAmounts {
    let amount = resolve_amount(line.quantity, line.rate, line.amount);
    let rate_percent = tax_rates.rate_percent(line.tax_rate_id);
    let tax = tax_amount(amount, rate_percent);
    LineAmounts {
        amount,
        rate_percent,
        tax,
        total: amount.saturating_add(tax),
    }
}

/// Tax-inclusive total of one line.
pub fn line_total(line: &VoucherLine, tax_rates: &TaxRateTable) -> Decimal {
    price_line(line, tax_rates).total
}

/// Tax-inclusive total of one line, or `None` if any step overflows.
pub fn checked_line_total(line: &VoucherLine, tax_rates: &TaxRateTable) -> Option<Decimal> {
    let amount = checked_resolve_amount(line.quantity, line.rate, line.amount)?;
    let tax = checked_tax_amount(amount, tax_rates.rate_percent(line.tax_rate_id))?;
    amount.checked_add(tax)
}

/// Grand total of a voucher: the sum of its line totals. Empty → `0`.
pub fn voucher_total<'a, I>(lines: I, tax_rates: &TaxRateTable) -> Decimal
where
    I: IntoIterator<Item = &'a VoucherLine>,
{
    lines
        .into_iter()
        .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line_total(line, tax_rates)))
}

pub fn checked_voucher_total<'a, I>(lines: I, tax_rates: &TaxRateTable) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a VoucherLine>,
{
    lines.into_iter().try_fold(Decimal::ZERO, |acc, line| {
        acc.checked_add(checked_line_total(line, tax_rates)?)
    })
}

/// Round to two decimal places (midpoint away from zero) for display.
pub fn round_for_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Display text with exactly two decimals, e.g. `168.00`.
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", round_for_display(value))
}

//! Voucher line items.
//!
//! [`VoucherLineItem`] is what the user is typing: raw text per field.
//! [`VoucherLine`] is the same line read into numbers and ids, which is what
//! pricing and balance derivation operate on.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tallybook_core::{
    DomainError, DomainResult, LedgerId, NumericPolicy, ProductId, TaxRateId, VoucherItemId,
    parse_decimal, read_number,
};

/// Debit or credit posting side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceType {
    #[default]
    #[serde(rename = "D")]
    Debit,
    #[serde(rename = "C")]
    Credit,
}

impl BalanceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "D",
            Self::Credit => "C",
        }
    }
}

impl core::fmt::Display for BalanceType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client-side identity of a form row, stable across inserts and removals.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LineKey(Uuid);

impl LineKey {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for LineKey {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for LineKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A voucher line with every field read.
///
/// Also the shape of stored voucher lines returned by the backend, which are
/// read through a more forgiving private shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredLine")]
pub struct VoucherLine {
    pub item_id: Option<VoucherItemId>,
    pub ledger_id: Option<LedgerId>,
    pub product_id: Option<ProductId>,
    pub tax_rate_id: Option<TaxRateId>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub quantity: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub rate: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub debit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub credit: Decimal,
    pub narration: String,
    pub balance_type: Option<BalanceType>,
}

/// Stored line as the backend spells it.
///
/// Item ids arrive as `itemID` and `voucherItemID`, sometimes both on the same
/// line, and narration as `narration` or `description`. Any field may be
/// missing or `null`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredLine {
    #[serde(alias = "itemID", alias = "ItemID")]
    item_id: Option<VoucherItemId>,
    #[serde(alias = "voucherItemID")]
    voucher_item_id: Option<VoucherItemId>,
    #[serde(alias = "ledgerID")]
    ledger_id: Option<LedgerId>,
    #[serde(alias = "productID")]
    product_id: Option<ProductId>,
    #[serde(alias = "taxRateID")]
    tax_rate_id: Option<TaxRateId>,
    #[serde(with = "rust_decimal::serde::float_option")]
    quantity: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    rate: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    amount: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    debit: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    credit: Option<Decimal>,
    narration: Option<String>,
    description: Option<String>,
    balance_type: Option<BalanceType>,
}

impl From<StoredLine> for VoucherLine {
    fn from(raw: StoredLine) -> Self {
        Self {
            item_id: raw.item_id.or(raw.voucher_item_id),
            ledger_id: raw.ledger_id,
            product_id: raw.product_id,
            tax_rate_id: raw.tax_rate_id,
            quantity: raw.quantity,
            rate: raw.rate,
            amount: raw.amount,
            debit: raw.debit.unwrap_or_default(),
            credit: raw.credit.unwrap_or_default(),
            narration: raw.narration.or(raw.description).unwrap_or_default(),
            balance_type: raw.balance_type,
        }
    }
}

/// Editable field of a form row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineField {
    Ledger,
    Product,
    TaxRate,
    Quantity,
    Rate,
    Amount,
    Debit,
    Credit,
    Narration,
}

impl LineField {
    /// Wire name of the field, used in validation messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ledger => "ledgerId",
            Self::Product => "productId",
            Self::TaxRate => "taxRateId",
            Self::Quantity => "quantity",
            Self::Rate => "rate",
            Self::Amount => "amount",
            Self::Debit => "debit",
            Self::Credit => "credit",
            Self::Narration => "narration",
        }
    }
}

/// A form row: raw text as typed or selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherLineItem {
    key: LineKey,
    pub item_id: Option<VoucherItemId>,
    pub ledger_id: String,
    pub product_id: String,
    pub tax_rate_id: String,
    pub quantity: String,
    pub rate: String,
    pub amount: String,
    pub debit: String,
    pub credit: String,
    pub narration: String,
    pub balance_type: Option<BalanceType>,
}

impl Default for VoucherLineItem {
    fn default() -> Self {
        Self::blank()
    }
}

impl VoucherLineItem {
    /// A freshly added row: nothing selected, numbers at zero.
    pub fn blank() -> Self {
        Self {
            key: LineKey::new(),
            item_id: None,
            ledger_id: String::new(),
            product_id: String::new(),
            tax_rate_id: String::new(),
            quantity: "0".to_string(),
            rate: "0".to_string(),
            amount: "0".to_string(),
            debit: "0".to_string(),
            credit: "0".to_string(),
            narration: String::new(),
            balance_type: None,
        }
    }

    /// Seed a row from a stored line (editing an existing voucher).
    pub fn from_line(line: &VoucherLine) -> Self {
        fn id_text<T: ToString>(id: Option<T>) -> String {
            id.map(|id| id.to_string()).unwrap_or_default()
        }
        fn num_text(value: Option<Decimal>) -> String {
            value.map(|v| v.to_string()).unwrap_or_else(|| "0".to_string())
        }

        Self {
            key: LineKey::new(),
            item_id: line.item_id,
            ledger_id: id_text(line.ledger_id),
            product_id: id_text(line.product_id),
            tax_rate_id: id_text(line.tax_rate_id),
            quantity: num_text(line.quantity),
            rate: num_text(line.rate),
            amount: num_text(line.amount),
            debit: line.debit.to_string(),
            credit: line.credit.to_string(),
            narration: line.narration.clone(),
            balance_type: line.balance_type,
        }
    }

    pub fn key(&self) -> LineKey {
        self.key
    }

    pub fn get(&self, field: LineField) -> &str {
        match field {
            LineField::Ledger => &self.ledger_id,
            LineField::Product => &self.product_id,
            LineField::TaxRate => &self.tax_rate_id,
            LineField::Quantity => &self.quantity,
            LineField::Rate => &self.rate,
            LineField::Amount => &self.amount,
            LineField::Debit => &self.debit,
            LineField::Credit => &self.credit,
            LineField::Narration => &self.narration,
        }
    }

    pub fn set(&mut self, field: LineField, raw: impl Into<String>) {
        let raw = raw.into();
        match field {
            LineField::Ledger => self.ledger_id = raw,
            LineField::Product => self.product_id = raw,
            LineField::TaxRate => self.tax_rate_id = raw,
            LineField::Quantity => self.quantity = raw,
            LineField::Rate => self.rate = raw,
            LineField::Amount => self.amount = raw,
            LineField::Debit => self.debit = raw,
            LineField::Credit => self.credit = raw,
            LineField::Narration => self.narration = raw,
        }
    }

    /// Read the row, turning anything unusable into "absent" or zero.
    ///
    /// Never fails; this is what live totals are computed from.
    pub fn read_lenient(&self) -> VoucherLine {
        VoucherLine {
            item_id: self.item_id,
            ledger_id: LedgerId::parse_optional(&self.ledger_id).ok().flatten(),
            product_id: ProductId::parse_optional(&self.product_id).ok().flatten(),
            tax_rate_id: TaxRateId::parse_optional(&self.tax_rate_id).ok().flatten(),
            quantity: parse_decimal(&self.quantity),
            rate: parse_decimal(&self.rate),
            amount: parse_decimal(&self.amount),
            debit: parse_decimal(&self.debit).unwrap_or_default(),
            credit: parse_decimal(&self.credit).unwrap_or_default(),
            narration: self.narration.clone(),
            balance_type: self.balance_type,
        }
    }

    /// Read the row under `policy`; `index` labels errors.
    pub fn read(&self, index: usize, policy: NumericPolicy) -> DomainResult<VoucherLine> {
        match policy {
            NumericPolicy::Lenient => Ok(self.read_lenient()),
            NumericPolicy::Strict => self.read_strict(index),
        }
    }

    fn read_strict(&self, index: usize) -> DomainResult<VoucherLine> {
        let line = Some(index);
        let id_err = |field: LineField| {
            let raw = self.get(field).to_string();
            move |_: DomainError| DomainError::invalid_field(line, field.name(), raw)
        };
        let optional_number = |field: LineField| -> DomainResult<Option<Decimal>> {
            let raw = self.get(field);
            if raw.trim().is_empty() {
                return Ok(None);
            }
            read_number(raw, NumericPolicy::Strict, line, field.name()).map(Some)
        };

        Ok(VoucherLine {
            item_id: self.item_id,
            ledger_id: LedgerId::parse_optional(&self.ledger_id)
                .map_err(id_err(LineField::Ledger))?,
            product_id: ProductId::parse_optional(&self.product_id)
                .map_err(id_err(LineField::Product))?,
            tax_rate_id: TaxRateId::parse_optional(&self.tax_rate_id)
                .map_err(id_err(LineField::TaxRate))?,
            quantity: optional_number(LineField::Quantity)?,
            rate: optional_number(LineField::Rate)?,
            amount: optional_number(LineField::Amount)?,
            debit: read_number(&self.debit, NumericPolicy::Strict, line, "debit")?,
            credit: read_number(&self.credit, NumericPolicy::Strict, line, "credit")?,
            narration: self.narration.clone(),
            balance_type: self.balance_type,
        })
    }
}

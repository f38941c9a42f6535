//! Submission payload for the voucher endpoints.
//!
//! The payload is the only thing that leaves the engine. Its field names and
//! number encoding are fixed by the backend: camelCase keys, plain JSON
//! numbers, `0` for "new" ids and explicit `null` for optional references.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tallybook_core::{
    CompanyId, DomainError, DomainResult, NumericPolicy, ProductId, TaxRateId, VoucherId,
    VoucherTypeId,
};

use crate::balance::{check_balance_conflict, line_balance_type};
use crate::config::{EngineConfig, MissingTaxRatePolicy};
use crate::line::{BalanceType, VoucherLine};
use crate::pricing::{checked_line_total, checked_voucher_total, resolve_amount};
use crate::tax::TaxRateTable;

/// Resolved voucher header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherHeader {
    /// `None` for a voucher that has not been saved yet.
    pub voucher_id: Option<VoucherId>,
    pub voucher_no: String,
    pub voucher_type_id: VoucherTypeId,
    pub voucher_date: NaiveDate,
    pub narration: String,
    pub company_profile_id: Option<CompanyId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherItemPayload {
    pub item_id: i64,
    pub ledger_id: i64,
    pub product_id: Option<ProductId>,
    pub tax_rate_id: Option<TaxRateId>,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub debit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub credit: Decimal,
    pub narration: String,
    pub balance_type: BalanceType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherPayload {
    pub voucher_id: i64,
    pub voucher_no: String,
    pub voucher_type_id: VoucherTypeId,
    pub voucher_date: NaiveDate,
    pub narration: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub company_profile_id: Option<CompanyId>,
    pub items: Vec<VoucherItemPayload>,
}

impl VoucherItemPayload {
    /// Normalize one read line: absent numbers become `0`, the amount is
    /// resolved, the posting side is derived.
    pub fn from_line(line: &VoucherLine) -> Self {
        Self {
            item_id: line.item_id.map_or(0, |id| id.get()),
            ledger_id: line.ledger_id.map_or(0, |id| id.get()),
            product_id: line.product_id,
            tax_rate_id: line.tax_rate_id,
            quantity: line.quantity.unwrap_or_default(),
            rate: line.rate.unwrap_or_default(),
            amount: resolve_amount(line.quantity, line.rate, line.amount),
            debit: line.debit,
            credit: line.credit,
            narration: line.narration.clone(),
            balance_type: line_balance_type(line),
        }
    }
}

/// Check the lines against the configured policies.
///
/// Under strict numeric policy every line must post to a ledger. Under every
/// policy, a line or voucher total that overflows [`Decimal`] is refused.
pub fn validate_lines(
    lines: &[VoucherLine],
    tax_rates: &TaxRateTable,
    config: &EngineConfig,
) -> DomainResult<()> {
    if lines.is_empty() {
        return Err(DomainError::validation("add at least one item"));
    }

    for (i, line) in lines.iter().enumerate() {
        if config.numeric == NumericPolicy::Strict && line.ledger_id.is_none() {
            return Err(DomainError::validation(format!(
                "line {} has no ledger",
                i + 1
            )));
        }

        if let Some(id) = line.tax_rate_id {
            if !tax_rates.contains(id) {
                match config.missing_tax_rate {
                    MissingTaxRatePolicy::Reject => {
                        return Err(DomainError::not_found(format!(
                            "tax rate {id} referenced by line {}",
                            i + 1
                        )));
                    }
                    MissingTaxRatePolicy::Zero => {
                        tracing::warn!(
                            tax_rate_id = %id,
                            line = i + 1,
                            "unknown tax rate; pricing at 0%"
                        );
                    }
                }
            }
        }

        check_balance_conflict(i, line, config.balance_conflict)?;

        if checked_line_total(line, tax_rates).is_none() {
            return Err(DomainError::invariant(format!(
                "line {} total is out of range",
                i + 1
            )));
        }
    }

    if checked_voucher_total(lines, tax_rates).is_none() {
        return Err(DomainError::invariant("voucher total is out of range"));
    }

    Ok(())
}

/// Validate and assemble the payload for `header` and `lines`.
pub fn build_payload(
    header: &VoucherHeader,
    lines: &[VoucherLine],
    tax_rates: &TaxRateTable,
    config: &EngineConfig,
) -> DomainResult<VoucherPayload> {
    validate_lines(lines, tax_rates, config)?;

    Ok(VoucherPayload {
        voucher_id: header.voucher_id.map_or(0, |id| id.get()),
        voucher_no: header.voucher_no.clone(),
        voucher_type_id: header.voucher_type_id,
        voucher_date: header.voucher_date,
        narration: header.narration.clone(),
        company_profile_id: header.company_profile_id,
        items: lines.iter().map(VoucherItemPayload::from_line).collect(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

/// Description of the save call; sending it is the caller's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: VoucherPayload,
}

impl SaveRequest {
    /// New vouchers are created with `POST /Voucher`; saved ones are
    /// replaced with `PUT /Voucher/{id}`.
    pub fn for_payload(body: VoucherPayload) -> Self {
        let (method, path) = if body.voucher_id > 0 {
            (HttpMethod::Put, format!("/Voucher/{}", body.voucher_id))
        } else {
            (HttpMethod::Post, "/Voucher".to_string())
        };
        Self { method, path, body }
    }

    pub fn body_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.body)
    }
}

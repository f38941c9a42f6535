//! Voucher entry form state.
//!
//! Holds what the user has typed, recomputes derived figures on every edit and
//! turns the result into a [`SaveRequest`]. The acting user is passed in where
//! it matters; the form never looks it up.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use tallybook_auth::{CurrentUser, submission_company};
use tallybook_core::{DomainError, DomainResult, VoucherTypeId, parse_decimal};

use crate::balance::BalanceSummary;
use crate::config::EngineConfig;
use crate::line::{LineField, LineKey, VoucherLine, VoucherLineItem};
use crate::lookups::{LookupState, Lookups};
use crate::payload::{SaveRequest, VoucherHeader, VoucherPayload, build_payload};
use crate::pricing::{LineAmounts, price_line, voucher_total};
use crate::register::VoucherRecord;

/// Header fields edited as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    VoucherNo,
    /// `YYYY-MM-DD`.
    VoucherDate,
    Narration,
    /// Company picked by a global administrator.
    Company,
}

#[derive(Debug, Clone)]
pub struct VoucherForm {
    config: EngineConfig,
    existing: Option<VoucherRecord>,
    lookups: LookupState,
    voucher_type_id: String,
    voucher_date: String,
    voucher_no: String,
    narration: String,
    company: String,
    items: Vec<VoucherLineItem>,
    show_product_fields: bool,
}

impl VoucherForm {
    /// Blank form for a new voucher.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            existing: None,
            lookups: LookupState::Pending,
            voucher_type_id: String::new(),
            voucher_date: String::new(),
            voucher_no: String::new(),
            narration: String::new(),
            company: String::new(),
            items: Vec::new(),
            show_product_fields: false,
        }
    }

    /// Form seeded from a stored voucher.
    pub fn edit(config: EngineConfig, existing: VoucherRecord) -> Self {
        let mut form = Self::new(config);
        form.voucher_type_id = existing
            .voucher_type_id()
            .map(|id| id.to_string())
            .unwrap_or_default();
        form.voucher_date = existing
            .voucher_day()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        form.voucher_no = existing.voucher_no.clone();
        form.narration = existing.narration.clone().unwrap_or_default();
        form.company = existing
            .company_profile_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        form.items = existing.items.iter().map(VoucherLineItem::from_line).collect();
        form.show_product_fields = existing
            .voucher_type
            .as_ref()
            .is_some_and(|vt| vt.uses_products());
        form.existing = Some(existing);
        form
    }

    /// Deliver the outcome of the lookup fetch.
    pub fn load_lookups(&mut self, result: Result<Lookups, String>) {
        self.lookups = match result {
            Ok(lookups) => {
                tracing::debug!(
                    tax_rates = lookups.tax_rates.len(),
                    voucher_types = lookups.voucher_types.len(),
                    "voucher lookups loaded"
                );
                LookupState::Ready(lookups)
            }
            Err(reason) => {
                tracing::warn!(%reason, "voucher lookups failed to load; tax will price at 0%");
                LookupState::Failed(reason)
            }
        };
        self.refresh_product_fields();
    }

    pub fn lookups(&self) -> &LookupState {
        &self.lookups
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_editing(&self) -> bool {
        self.existing.is_some()
    }

    /// Whether product, quantity and rate fields apply to the chosen type.
    pub fn shows_product_fields(&self) -> bool {
        self.show_product_fields
    }

    pub fn items(&self) -> &[VoucherLineItem] {
        &self.items
    }

    pub fn item(&self, key: LineKey) -> Option<&VoucherLineItem> {
        self.items.iter().find(|item| item.key() == key)
    }

    pub fn header(&self, field: HeaderField) -> &str {
        match field {
            HeaderField::VoucherNo => &self.voucher_no,
            HeaderField::VoucherDate => &self.voucher_date,
            HeaderField::Narration => &self.narration,
            HeaderField::Company => &self.company,
        }
    }

    pub fn voucher_type(&self) -> &str {
        &self.voucher_type_id
    }

    fn ensure_editable(&self) -> DomainResult<()> {
        if self.lookups.is_pending() {
            return Err(DomainError::not_ready("voucher lookups are still loading"));
        }
        Ok(())
    }

    fn item_mut(&mut self, key: LineKey) -> DomainResult<&mut VoucherLineItem> {
        self.items
            .iter_mut()
            .find(|item| item.key() == key)
            .ok_or_else(|| DomainError::not_found(format!("voucher line {key}")))
    }

    pub fn set_header(&mut self, field: HeaderField, raw: impl Into<String>) -> DomainResult<()> {
        self.ensure_editable()?;
        let raw = raw.into();
        match field {
            HeaderField::VoucherNo => self.voucher_no = raw,
            HeaderField::VoucherDate => self.voucher_date = raw,
            HeaderField::Narration => self.narration = raw,
            HeaderField::Company => self.company = raw,
        }
        Ok(())
    }

    /// Pick the voucher type; toggles the product fields.
    pub fn set_voucher_type(&mut self, raw: impl Into<String>) -> DomainResult<()> {
        self.ensure_editable()?;
        self.voucher_type_id = raw.into();
        self.refresh_product_fields();
        Ok(())
    }

    fn refresh_product_fields(&mut self) {
        let Some(lookups) = self.lookups.lookups() else {
            return;
        };
        let Ok(Some(id)) = VoucherTypeId::parse_optional(&self.voucher_type_id) else {
            return;
        };
        self.show_product_fields = lookups
            .voucher_type(id)
            .is_some_and(|vt| vt.uses_products());
    }

    /// Append a blank line and return its key.
    pub fn add_item(&mut self) -> DomainResult<LineKey> {
        self.ensure_editable()?;
        let item = VoucherLineItem::blank();
        let key = item.key();
        self.items.push(item);
        Ok(key)
    }

    pub fn remove_item(&mut self, key: LineKey) -> DomainResult<()> {
        self.ensure_editable()?;
        let before = self.items.len();
        self.items.retain(|item| item.key() != key);
        if self.items.len() == before {
            return Err(DomainError::not_found(format!("voucher line {key}")));
        }
        Ok(())
    }

    /// Store raw input for one field of one line.
    ///
    /// With product fields showing, a line whose quantity and rate are both
    /// non-zero gets its amount overwritten with `quantity * rate`. If that
    /// product does not fit in a [`Decimal`] the amount is cleared instead, so
    /// no stale figure survives and saving is refused.
    pub fn set_field(
        &mut self,
        key: LineKey,
        field: LineField,
        raw: impl Into<String>,
    ) -> DomainResult<()> {
        self.ensure_editable()?;
        let show_product_fields = self.show_product_fields;
        let item = self.item_mut(key)?;
        item.set(field, raw);

        if show_product_fields {
            let quantity = parse_decimal(&item.quantity).filter(|q| !q.is_zero());
            let rate = parse_decimal(&item.rate).filter(|r| !r.is_zero());
            if let (Some(q), Some(r)) = (quantity, rate) {
                match q.checked_mul(r) {
                    Some(amount) => {
                        tracing::debug!(
                            line = %key,
                            %amount,
                            "amount recomputed from quantity and rate"
                        );
                        item.amount = amount.to_string();
                    }
                    None => {
                        tracing::warn!(line = %key, "quantity times rate is out of range");
                        item.amount.clear();
                    }
                }
            }
        }
        Ok(())
    }

    /// Lines as the live total sees them.
    pub fn lines(&self) -> Vec<VoucherLine> {
        self.items.iter().map(VoucherLineItem::read_lenient).collect()
    }

    /// Per-line figures, in display order.
    pub fn line_amounts(&self) -> Vec<LineAmounts> {
        let tax_rates = self.lookups.tax_rates();
        self.lines()
            .iter()
            .map(|line| price_line(line, tax_rates))
            .collect()
    }

    /// Live grand total.
    pub fn total(&self) -> Decimal {
        voucher_total(&self.lines(), self.lookups.tax_rates())
    }

    pub fn balance_summary(&self) -> BalanceSummary {
        BalanceSummary::from_lines(&self.lines())
    }

    /// Validate the form and assemble the payload.
    ///
    /// Empty header fields fall back to the stored voucher's values, and an
    /// empty line list falls back to its stored lines.
    pub fn build_payload(&self, user: &CurrentUser) -> DomainResult<VoucherPayload> {
        match &self.lookups {
            LookupState::Pending => {
                return Err(DomainError::not_ready("voucher lookups are still loading"));
            }
            LookupState::Failed(reason) => {
                return Err(DomainError::not_ready(format!(
                    "voucher lookups failed to load: {reason}"
                )));
            }
            LookupState::Ready(_) => {}
        }

        let header = self.resolve_header(user)?;
        let lines = self.resolve_lines()?;
        build_payload(&header, &lines, self.lookups.tax_rates(), &self.config)
    }

    /// Validate the form and describe the save call.
    pub fn save_request(&self, user: &CurrentUser) -> DomainResult<SaveRequest> {
        let payload = self.build_payload(user)?;
        let request = SaveRequest::for_payload(payload);
        tracing::info!(
            method = request.method.as_str(),
            path = %request.path,
            items = request.body.items.len(),
            "voucher save request assembled"
        );
        Ok(request)
    }

    fn resolve_header(&self, user: &CurrentUser) -> DomainResult<VoucherHeader> {
        let existing = self.existing.as_ref();
        let fallback = |typed: &str, stored: Option<String>| -> String {
            if typed.trim().is_empty() {
                stored.unwrap_or_default()
            } else {
                typed.to_string()
            }
        };

        let type_raw = fallback(
            &self.voucher_type_id,
            existing.and_then(|v| v.voucher_type_id()).map(|id| id.to_string()),
        );
        let voucher_type_id = match VoucherTypeId::parse_optional(&type_raw) {
            Ok(Some(id)) => id,
            Ok(None) => return Err(DomainError::validation("voucher type is required")),
            Err(_) => return Err(DomainError::invalid_field(None, "voucherTypeId", type_raw)),
        };

        let date_raw = fallback(
            &self.voucher_date,
            existing.and_then(|v| v.voucher_day()).map(|d| d.to_string()),
        );
        let voucher_date = parse_day(&date_raw)?;

        let company_raw = fallback(
            &self.company,
            existing.and_then(|v| v.company_profile_id).map(|id| id.to_string()),
        );

        Ok(VoucherHeader {
            voucher_id: existing.map(|v| v.voucher_id),
            voucher_no: fallback(&self.voucher_no, existing.map(|v| v.voucher_no.clone())),
            voucher_type_id,
            voucher_date,
            narration: fallback(&self.narration, existing.and_then(|v| v.narration.clone())),
            company_profile_id: submission_company(user, Some(&company_raw))?,
        })
    }

    fn resolve_lines(&self) -> DomainResult<Vec<VoucherLine>> {
        if self.items.is_empty() {
            if let Some(existing) = &self.existing {
                return Ok(existing.items.clone());
            }
        }
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| item.read(i, self.config.numeric))
            .collect()
    }
}

/// Parse a calendar day, accepting a full timestamp and keeping its date part.
pub(crate) fn parse_day(raw: &str) -> DomainResult<NaiveDate> {
    let day = raw.trim().split('T').next().unwrap_or_default();
    if day.is_empty() {
        return Err(DomainError::validation("voucher date is required"));
    }
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| DomainError::validation(format!("voucher date '{raw}' is invalid: {e}")))
}

//! Voucher pricing & balance engine.
//!
//! Pure domain logic only, with no IO or persistence concerns. The
//! pricing and balance functions are total; validation is a separate step
//! governed by [`EngineConfig`].

pub mod balance;
pub mod config;
pub mod form;
pub mod line;
pub mod lookups;
pub mod payload;
pub mod pricing;
pub mod register;
pub mod tax;
pub mod voucher_type;

pub use balance::{BalanceSummary, check_balance_conflict, derive_balance_type, line_balance_type};
pub use config::{BalanceConflictPolicy, EngineConfig, MissingTaxRatePolicy};
pub use form::{HeaderField, VoucherForm};
pub use line::{BalanceType, LineField, LineKey, VoucherLine, VoucherLineItem};
pub use lookups::{LedgerOption, LookupState, Lookups, ProductOption};
pub use payload::{
    HttpMethod, SaveRequest, VoucherHeader, VoucherItemPayload, VoucherPayload, build_payload,
    validate_lines,
};
pub use pricing::{
    LineAmounts, apply_tax, checked_line_total, checked_resolve_amount, checked_tax_amount,
    checked_voucher_total, format_amount, line_total, price_line, resolve_amount,
    round_for_display, tax_amount, voucher_total,
};
pub use register::{PAGE_SIZE, SortDir, SortKey, VoucherPage, VoucherQuery, VoucherRecord, query};
pub use tax::{TaxRate, TaxRateTable};
pub use voucher_type::VoucherType;

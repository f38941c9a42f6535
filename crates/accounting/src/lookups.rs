//! Master data the voucher form depends on.
//!
//! The form cannot price anything until the tax rate table arrives, so the
//! delivery state is tracked explicitly instead of starting from empty lists.

use serde::{Deserialize, Serialize};

use tallybook_core::{LedgerId, ProductId, VoucherTypeId};

use crate::tax::TaxRateTable;
use crate::voucher_type::VoucherType;

/// Ledger entry in the ledger picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerOption {
    #[serde(alias = "ledgerID")]
    pub ledger_id: LedgerId,
    pub ledger_name: String,
}

/// Product entry in the product picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOption {
    #[serde(alias = "productID")]
    pub product_id: ProductId,
    pub product_name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lookups {
    pub voucher_types: Vec<VoucherType>,
    pub ledgers: Vec<LedgerOption>,
    pub products: Vec<ProductOption>,
    pub tax_rates: TaxRateTable,
}

impl Lookups {
    pub fn voucher_type(&self, id: VoucherTypeId) -> Option<&VoucherType> {
        self.voucher_types.iter().find(|vt| vt.voucher_type_id == id)
    }
}

/// Delivery state of the lookups for one form session.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LookupState {
    /// Fetch still in flight.
    #[default]
    Pending,
    Ready(Lookups),
    /// Fetch failed; the form keeps working on empty lookups.
    Failed(String),
}

impl LookupState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn lookups(&self) -> Option<&Lookups> {
        match self {
            Self::Ready(lookups) => Some(lookups),
            _ => None,
        }
    }

    /// Tax table to price with. Empty unless the fetch succeeded.
    pub fn tax_rates(&self) -> &TaxRateTable {
        static EMPTY: std::sync::OnceLock<TaxRateTable> = std::sync::OnceLock::new();
        match self {
            Self::Ready(lookups) => &lookups.tax_rates,
            _ => EMPTY.get_or_init(TaxRateTable::default),
        }
    }
}

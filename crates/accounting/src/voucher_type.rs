use serde::{Deserialize, Serialize};

use tallybook_core::{Entity, VoucherTypeId};

/// Voucher type master record (Journal, Sales, Purchase, Stock Transfer, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherType {
    #[serde(alias = "voucherTypeID", alias = "id")]
    pub voucher_type_id: VoucherTypeId,
    #[serde(alias = "voucherName")]
    pub name: String,
}

impl VoucherType {
    pub fn new(id: VoucherTypeId, name: impl Into<String>) -> Self {
        Self {
            voucher_type_id: id,
            name: name.into(),
        }
    }

    /// Whether lines of this type carry product, quantity and rate.
    ///
    /// Inventory-moving types are recognised by name: anything mentioning
    /// sales, purchase or stock.
    pub fn uses_products(&self) -> bool {
        let name = self.name.to_lowercase();
        ["sales", "purchase", "stock"]
            .iter()
            .any(|kw| name.contains(kw))
    }
}

impl Entity for VoucherType {
    type Id = VoucherTypeId;

    fn id(&self) -> Self::Id {
        self.voucher_type_id
    }
}

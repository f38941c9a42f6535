//! Tax rate lookup.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tallybook_core::{Entity, TaxRateId};

/// A named percentage, as listed by the backend's tax rate master.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRate {
    #[serde(alias = "taxRateID", alias = "id")]
    pub tax_rate_id: TaxRateId,
    #[serde(alias = "taxName", default)]
    pub name: String,
    /// Percentage, conceptually in `[0, 100]` (not enforced).
    #[serde(alias = "rate", with = "rust_decimal::serde::float")]
    pub rate_percent: Decimal,
}

impl TaxRate {
    pub fn new(id: TaxRateId, name: impl Into<String>, rate_percent: Decimal) -> Self {
        Self {
            tax_rate_id: id,
            name: name.into(),
            rate_percent,
        }
    }

    /// Label shown in the tax rate picker, e.g. `GST (18%)`.
    pub fn label(&self) -> String {
        format!("{} ({}%)", self.name, self.rate_percent.normalize())
    }
}

impl Entity for TaxRate {
    type Id = TaxRateId;

    fn id(&self) -> Self::Id {
        self.tax_rate_id
    }
}

/// Read-only tax rate table keyed by id.
///
/// Keeps the backend's listing order for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaxRateTable {
    rates: Vec<TaxRate>,
    index: HashMap<TaxRateId, usize>,
}

impl TaxRateTable {
    pub fn new(rates: Vec<TaxRate>) -> Self {
        let mut index = HashMap::with_capacity(rates.len());
        for (i, rate) in rates.iter().enumerate() {
            // First listing wins if the backend ever repeats an id.
            index.entry(rate.id()).or_insert(i);
        }
        Self { rates, index }
    }

    pub fn get(&self, id: TaxRateId) -> Option<&TaxRate> {
        self.index.get(&id).map(|&i| &self.rates[i])
    }

    pub fn contains(&self, id: TaxRateId) -> bool {
        self.index.contains_key(&id)
    }

    /// Percentage for an optional reference; `0` when unset or unknown.
    pub fn rate_percent(&self, id: Option<TaxRateId>) -> Decimal {
        id.and_then(|id| self.get(id))
            .map(|rate| rate.rate_percent)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn rates(&self) -> &[TaxRate] {
        &self.rates
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }
}

impl FromIterator<TaxRate> for TaxRateTable {
    fn from_iter<I: IntoIterator<Item = TaxRate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> TaxRateTable {
        TaxRateTable::new(vec![
            TaxRate::new(TaxRateId::new(1), "GST", dec!(18)),
            TaxRate::new(TaxRateId::new(2), "Reduced", dec!(5)),
        ])
    }

    #[test]
    fn looks_up_rate_by_id() {
        let t = table();
        assert_eq!(t.rate_percent(Some(TaxRateId::new(1))), dec!(18));
        assert_eq!(t.rate_percent(Some(TaxRateId::new(2))), dec!(5));
    }

    #[test]
    fn unset_or_unknown_reference_is_zero_percent() {
        let t = table();
        assert_eq!(t.rate_percent(None), Decimal::ZERO);
        assert_eq!(t.rate_percent(Some(TaxRateId::new(99))), Decimal::ZERO);
        assert_eq!(TaxRateTable::default().rate_percent(Some(TaxRateId::new(1))), Decimal::ZERO);
    }

    #[test]
    fn duplicate_ids_keep_first_listing() {
        let t = TaxRateTable::new(vec![
            TaxRate::new(TaxRateId::new(1), "old", dec!(12)),
            TaxRate::new(TaxRateId::new(1), "new", dec!(28)),
        ]);
        assert_eq!(t.rate_percent(Some(TaxRateId::new(1))), dec!(12));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn deserializes_backend_listing() {
        let json = r#"[{"taxRateID": 3, "taxName": "GST", "rate": 18}]"#;
        let rates: Vec<TaxRate> = serde_json::from_str(json).unwrap();
        let t: TaxRateTable = rates.into_iter().collect();
        let rate = t.get(TaxRateId::new(3)).unwrap();
        assert_eq!(rate.name, "GST");
        assert_eq!(rate.rate_percent, dec!(18));
        assert_eq!(rate.label(), "GST (18%)");
    }
}

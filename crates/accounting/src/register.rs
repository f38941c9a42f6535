//! Voucher register: stored vouchers, as listed by the backend, with search,
//! sorting and paging.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use tallybook_core::{CompanyId, Entity, VoucherId, VoucherTypeId};

use crate::line::VoucherLine;
use crate::pricing::voucher_total;
use crate::tax::TaxRateTable;
use crate::voucher_type::VoucherType;

pub const PAGE_SIZE: usize = 10;

/// A stored voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherRecord {
    #[serde(alias = "voucherID")]
    pub voucher_id: VoucherId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub voucher_no: String,
    #[serde(alias = "voucherTypeID", default)]
    pub voucher_type_id: Option<VoucherTypeId>,
    #[serde(default)]
    pub voucher_type: Option<VoucherType>,
    /// Backend timestamp, e.g. `2024-04-01T00:00:00`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub voucher_date: String,
    #[serde(default)]
    pub narration: Option<String>,
    #[serde(default)]
    pub company_profile_id: Option<CompanyId>,
    #[serde(alias = "voucherItems", default, deserialize_with = "null_as_default")]
    pub items: Vec<VoucherLine>,
}

/// The backend sends `null` where it means "empty".
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl VoucherRecord {
    /// Type id, from the flat field or the embedded type.
    pub fn voucher_type_id(&self) -> Option<VoucherTypeId> {
        self.voucher_type_id
            .or_else(|| self.voucher_type.as_ref().map(|vt| vt.voucher_type_id))
    }

    pub fn voucher_type_name(&self) -> &str {
        self.voucher_type.as_ref().map_or("", |vt| vt.name.as_str())
    }

    /// Calendar day of the voucher, if the stored date is readable.
    pub fn voucher_day(&self) -> Option<NaiveDate> {
        crate::form::parse_day(&self.voucher_date).ok()
    }

    /// Tax-inclusive total over the stored lines.
    pub fn total(&self, tax_rates: &TaxRateTable) -> Decimal {
        voucher_total(&self.items, tax_rates)
    }
}

impl Entity for VoucherRecord {
    type Id = VoucherId;

    fn id(&self) -> Self::Id {
        self.voucher_id
    }
}

/// Column the register is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    VoucherNo,
    VoucherDate,
    /// Sorts by the type's name.
    VoucherType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherQuery {
    pub search: String,
    pub sort_key: SortKey,
    pub sort_dir: SortDir,
    /// One-based; clamped into range.
    pub page: usize,
}

impl Default for VoucherQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_key: SortKey::default(),
            sort_dir: SortDir::default(),
            page: 1,
        }
    }
}

impl VoucherQuery {
    /// Clicking a column header: same column flips direction, a new column
    /// sorts ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_dir = self.sort_dir.flip();
        } else {
            self.sort_key = key;
            self.sort_dir = SortDir::Asc;
        }
    }

    /// Changing the search text goes back to the first page.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }
}

/// One page of the register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherPage<'a> {
    pub rows: Vec<&'a VoucherRecord>,
    pub page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    /// One-based range shown ("Showing 11-20 of 43"); `0..0` when empty.
    pub first_row: usize,
    pub last_row: usize,
}

impl VoucherPage<'_> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

fn sort_text(record: &VoucherRecord, key: SortKey) -> String {
    match key {
        SortKey::VoucherNo => record.voucher_no.to_lowercase(),
        SortKey::VoucherDate => record.voucher_date.to_lowercase(),
        SortKey::VoucherType => record.voucher_type_name().to_lowercase(),
    }
}

fn matches_search(record: &VoucherRecord, needle: &str) -> bool {
    record.voucher_no.to_lowercase().contains(needle)
        || record.voucher_type_name().to_lowercase().contains(needle)
        || record
            .narration
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
            .contains(needle)
}

/// Filter, sort and page `records`.
pub fn query<'a>(records: &'a [VoucherRecord], q: &VoucherQuery) -> VoucherPage<'a> {
    let needle = q.search.trim().to_lowercase();
    let mut rows: Vec<(String, &VoucherRecord)> = records
        .iter()
        .filter(|r| needle.is_empty() || matches_search(r, &needle))
        .map(|r| (sort_text(r, q.sort_key), r))
        .collect();

    rows.sort_by(|(a, _), (b, _)| match q.sort_dir {
        SortDir::Asc => a.cmp(b),
        SortDir::Desc => b.cmp(a),
    });

    let total_rows = rows.len();
    let total_pages = total_rows.div_ceil(PAGE_SIZE).max(1);
    let page = q.page.clamp(1, total_pages);
    let start = (page - 1) * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(total_rows);

    VoucherPage {
        rows: rows[start..end].iter().map(|(_, r)| *r).collect(),
        page,
        total_pages,
        total_rows,
        first_row: if total_rows == 0 { 0 } else { start + 1 },
        last_row: end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tallybook_core::TaxRateId;

    use crate::tax::TaxRate;

    fn record(id: i64, no: &str, type_name: &str, narration: &str) -> VoucherRecord {
        VoucherRecord {
            voucher_id: VoucherId::new(id),
            voucher_no: no.to_string(),
            voucher_type_id: None,
            voucher_type: Some(VoucherType::new(VoucherTypeId::new(id % 3 + 1), type_name)),
            voucher_date: format!("2024-04-{:02}T00:00:00", id % 28 + 1),
            narration: Some(narration.to_string()),
            company_profile_id: None,
            items: Vec::new(),
        }
    }

    fn many(n: i64) -> Vec<VoucherRecord> {
        (1..=n)
            .map(|i| record(i, &format!("V{i:03}"), "Journal", ""))
            .collect()
    }

    #[test]
    fn search_covers_number_type_and_narration() {
        let records = vec![
            record(1, "JV-1", "Journal", "office rent"),
            record(2, "SV-1", "Sales", "walk-in"),
            record(3, "PV-1", "Purchase", "RENT deposit"),
        ];
        let mut q = VoucherQuery::default();

        q.set_search("rent");
        let ids: Vec<i64> = query(&records, &q)
            .rows
            .iter()
            .map(|r| r.voucher_id.get())
            .collect();
        assert_eq!(ids, vec![1, 3]);

        q.set_search("SALES");
        assert_eq!(query(&records, &q).rows.len(), 1);

        q.set_search("sv-");
        assert_eq!(query(&records, &q).rows[0].voucher_no, "SV-1");
    }

    #[test]
    fn sorts_by_selected_column() {
        let records = vec![
            record(1, "b", "Sales", ""),
            record(2, "a", "Journal", ""),
            record(3, "C", "Payment", ""),
        ];
        let mut q = VoucherQuery::default();
        let nos: Vec<&str> = query(&records, &q)
            .rows
            .iter()
            .map(|r| r.voucher_no.as_str())
            .collect();
        assert_eq!(nos, vec!["a", "b", "C"]);

        q.toggle_sort(SortKey::VoucherNo);
        assert_eq!(q.sort_dir, SortDir::Desc);
        let nos: Vec<&str> = query(&records, &q)
            .rows
            .iter()
            .map(|r| r.voucher_no.as_str())
            .collect();
        assert_eq!(nos, vec!["C", "b", "a"]);

        q.toggle_sort(SortKey::VoucherType);
        assert_eq!(q.sort_dir, SortDir::Asc);
        let types: Vec<&str> = query(&records, &q)
            .rows
            .iter()
            .map(|r| r.voucher_type_name())
            .collect();
        assert_eq!(types, vec!["Journal", "Payment", "Sales"]);
    }

    #[test]
    fn pages_of_ten() {
        let records = many(23);
        let mut q = VoucherQuery::default();

        let first = query(&records, &q);
        assert_eq!(first.rows.len(), 10);
        assert_eq!(first.total_pages, 3);
        assert_eq!((first.first_row, first.last_row), (1, 10));
        assert!(!first.has_prev());
        assert!(first.has_next());

        q.page = 3;
        let last = query(&records, &q);
        assert_eq!(last.rows.len(), 3);
        assert_eq!((last.first_row, last.last_row), (21, 23));
        assert!(!last.has_next());

        q.page = 99;
        assert_eq!(query(&records, &q).page, 3);
    }

    #[test]
    fn empty_register_has_one_empty_page() {
        let page = query(&[], &VoucherQuery::default());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
        assert!(page.rows.is_empty());
        assert_eq!((page.first_row, page.last_row), (0, 0));
    }

    #[test]
    fn null_header_fields_read_as_empty() {
        let json = r#"{
            "voucherID": 1,
            "voucherNo": null,
            "voucherDate": null,
            "narration": null,
            "voucherType": null,
            "voucherItems": null
        }"#;
        let record: VoucherRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.voucher_no, "");
        assert_eq!(record.voucher_date, "");
        assert_eq!(record.voucher_day(), None);
        assert_eq!(record.voucher_type_name(), "");
        assert!(record.items.is_empty());

        let mut q = VoucherQuery::default();
        q.set_search("x");
        assert!(query(std::slice::from_ref(&record), &q).rows.is_empty());
    }

    #[test]
    fn stored_lines_with_both_item_ids_load() {
        let json = r#"{
            "voucherID": 2,
            "voucherNo": "JV-2",
            "voucherItems": [
                {"voucherItemID": 7, "itemID": 7, "ledgerID": 3, "amount": 100, "debit": null}
            ]
        }"#;
        let record: VoucherRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.items[0].item_id.map(|id| id.get()), Some(7));
        assert_eq!(record.total(&TaxRateTable::default()), dec!(100));
    }

    #[test]
    fn row_amount_is_tax_inclusive_total() {
        let json = r#"{
            "voucherID": 5,
            "voucherNo": "SV-9",
            "voucherTypeID": 2,
            "voucherDate": "2024-04-01T00:00:00",
            "voucherItems": [
                {"ledgerID": 1, "taxRateID": 1, "amount": 100},
                {"ledgerID": 2, "taxRateID": null, "amount": 50}
            ]
        }"#;
        let record: VoucherRecord = serde_json::from_str(json).unwrap();
        let table = TaxRateTable::new(vec![TaxRate::new(TaxRateId::new(1), "t1", dec!(18))]);

        assert_eq!(record.voucher_type_id(), Some(VoucherTypeId::new(2)));
        assert_eq!(record.voucher_day(), NaiveDate::from_ymd_opt(2024, 4, 1));
        assert_eq!(record.total(&table), dec!(168));
    }
}

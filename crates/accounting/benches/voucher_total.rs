use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use rust_decimal::Decimal;
use tallybook_accounting::{
    EngineConfig, TaxRate, TaxRateTable, VoucherHeader, VoucherLine, build_payload, voucher_total,
};
use tallybook_core::{LedgerId, TaxRateId, VoucherTypeId};

fn tax_table() -> TaxRateTable {
    [0, 5, 12, 18, 28]
        .into_iter()
        .enumerate()
        .map(|(i, pct)| {
            let id = TaxRateId::new(i as i64 + 1);
            TaxRate::new(id, format!("GST {pct}"), Decimal::from(pct))
        })
        .collect()
}

/// Mix of priced product lines and plain amount lines, every tax slab used.
fn lines(n: usize) -> Vec<VoucherLine> {
    (0..n)
        .map(|i| {
            let product = i % 2 == 0;
            VoucherLine {
                ledger_id: Some(LedgerId::new(i as i64 % 7 + 1)),
                tax_rate_id: Some(TaxRateId::new(i as i64 % 5 + 1)),
                quantity: product.then(|| Decimal::from(i as i64 % 9 + 1)),
                rate: product.then(|| Decimal::new(12_345 + i as i64, 2)),
                amount: (!product).then(|| Decimal::new(99_999 + i as i64, 2)),
                debit: Decimal::new(100 * i as i64, 2),
                ..VoucherLine::default()
            }
        })
        .collect()
}

fn bench_voucher_total(c: &mut Criterion) {
    let table = tax_table();
    let mut group = c.benchmark_group("voucher_total");

    for size in [10usize, 100, 1_000] {
        let lines = lines(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &lines, |b, lines| {
            b.iter(|| voucher_total(black_box(lines), &table));
        });
    }

    group.finish();
}

fn bench_build_payload(c: &mut Criterion) {
    let table = tax_table();
    let config = EngineConfig::default();
    let header = VoucherHeader {
        voucher_id: None,
        voucher_no: "SV-0001".to_string(),
        voucher_type_id: VoucherTypeId::new(2),
        voucher_date: chrono::NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        narration: String::new(),
        company_profile_id: None,
    };
    let lines = lines(100);

    c.bench_function("build_payload_100_lines", |b| {
        b.iter(|| build_payload(&header, black_box(&lines), &table, &config).unwrap());
    });
}

criterion_group!(benches, bench_voucher_total, bench_build_payload);
criterion_main!(benches);

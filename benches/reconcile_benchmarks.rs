//! Performance benchmarks for the holiday reconciler.
//!
//! This benchmark suite verifies that working-set maintenance stays cheap
//! enough to run after every keystroke-level edit:
//! - Seeding a year of holidays: < 100μs mean
//! - Duplicate validation over 1000 rows: < 1ms mean
//! - Merging a 500-row import: < 1ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{Duration, NaiveDate};
use leave_engine::models::{HolidayRecord, ImportedHoliday};
use leave_engine::reconcile::{HolidayEdit, HolidayReconciler};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

/// Generates `count` records spread across the year, every tenth date
/// duplicated so the duplicate scan has real groups to walk.
fn make_records(count: usize) -> Vec<HolidayRecord> {
    let base = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    (0..count)
        .map(|i| HolidayRecord {
            id: i as i64 + 1,
            date: base + Duration::days((i / 10 * 10) as i64 % 365),
            description: format!("Holiday {}", i / 10 * 10),
            is_floater: Some(i % 7 == 0),
        })
        .collect()
}

fn make_import(count: usize) -> Vec<ImportedHoliday> {
    let base = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
    (0..count)
        .map(|i| ImportedHoliday {
            date: base + Duration::days((i % 180) as i64),
            description: format!("Imported {}", i),
            floater: false,
        })
        .collect()
}

fn bench_seed(c: &mut Criterion) {
    let mut group = c.benchmark_group("seed");
    for count in [20, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let records = make_records(count);
            b.iter(|| {
                let mut r = HolidayReconciler::with_today(2025, today());
                r.seed(black_box(records.clone()));
                black_box(r.rows().len())
            });
        });
    }
    group.finish();
}

fn bench_single_edit(c: &mut Criterion) {
    c.bench_function("single_edit_on_1000_rows", |b| {
        let records = make_records(1000);
        let mut r = HolidayReconciler::with_today(2025, today());
        r.seed(records);
        // Toggling the floater flag on a future row keeps the set size
        // stable across iterations.
        let last_dated = r.rows().len() - 2;
        let mut floater = false;
        b.iter(|| {
            floater = !floater;
            r.update_field(black_box(last_dated), HolidayEdit::Floater(floater))
                .unwrap();
        });
    });
}

fn bench_import(c: &mut Criterion) {
    let mut group = c.benchmark_group("import");
    for count in [50, 500] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let rows = make_import(count);
            b.iter(|| {
                let mut r = HolidayReconciler::with_today(2025, today());
                r.import(black_box(rows.clone())).unwrap();
                black_box(r.rows().len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_seed, bench_single_edit, bench_import);
criterion_main!(benches);

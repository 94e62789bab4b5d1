//! Streaming and parsing performance benchmarks.
//!
//! Measures list parsing and single-pass mapping across input sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pile::transform::{map_csv_contents, RenameColumns};
use pile::{AliasMap, List};

/// Generate synthetic CSV data with the specified number of rows and columns.
fn generate_csv_data(rows: usize, cols: usize) -> String {
    let mut data = String::new();

    // Header row
    for i in 0..cols {
        if i > 0 {
            data.push(',');
        }
        data.push_str(&format!("Column {}", i + 1));
    }
    data.push('\n');

    // Data rows
    for row in 0..rows {
        for col in 0..cols {
            if col > 0 {
                data.push(',');
            }
            // Mix of integers and text
            match col % 3 {
                0 => data.push_str(&row.to_string()),
                1 => data.push_str(&format!("Name {}", row % 100)),
                2 => data.push_str(&format!("\"{} Main St, Apt {}\"", row, col)),
                _ => unreachable!(),
            }
        }
        data.push('\n');
    }

    data
}

fn aliases() -> AliasMap {
    AliasMap::new()
        .with("Column 1", ["id", "#"])
        .with("Column 2", "name")
}

/// Benchmark parsing whole lists of various sizes.
fn bench_parse_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_list");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_csv_data(*rows, 10);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| black_box(List::from_string(data, aliases()).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark mapping with alias lookups on every record.
fn bench_map_by_alias(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_by_alias");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_csv_data(*rows, 10);
        let aliases = aliases();

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| {
                black_box(
                    map_csv_contents(data, &aliases, |_, mut record| {
                        let id = record.get("id")?.as_integer().unwrap_or_default();
                        record.set("#", id + 1)?;
                        Ok(record)
                    })
                    .unwrap(),
                )
            })
        });
    }

    group.finish();
}

/// Benchmark header-changing transforms.
fn bench_rename(c: &mut Criterion) {
    let mut group = c.benchmark_group("rename");

    let data = generate_csv_data(1_000, 10);
    let aliases = aliases();

    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("rows_1000", |b| {
        b.iter(|| {
            let rename = RenameColumns::new([("name", "Full Name")]);
            black_box(map_csv_contents(&data, &aliases, rename.into_fn()).unwrap())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parse_list, bench_map_by_alias, bench_rename);
criterion_main!(benches);

//! Snapshot building performance benchmarks
//!
//! Measures the performance of snapshot components:
//! - Resolving a single table definition
//! - Building a full snapshot from an in-memory catalog
//! - Serializing a snapshot to JSON

use catalog_snapshot::{SnapshotOptions, build_snapshot, resolve_table};
use catalog_snapshot_catalog::{Catalog, ObjectPath};
use catalog_snapshot_test_utils::{MockCatalogBuilder, SchemaFixtures};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn bench_resolve_table(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let catalog = SchemaFixtures::large_catalog(1, 32);
    let path = ObjectPath::new("test", "t0000");
    let table = runtime
        .block_on(catalog.get_table(&path))
        .unwrap()
        .unwrap();
    let options = SnapshotOptions::default();

    c.bench_function("snapshot/resolve_table_32_columns", |b| {
        b.iter(|| {
            let entry = resolve_table(&path, &table, &options).unwrap();
            black_box(entry);
        });
    });
}

fn bench_build_snapshot(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("snapshot/build");

    for tables in [10usize, 100, 500] {
        let catalog = MockCatalogBuilder::from_catalog(SchemaFixtures::large_catalog(tables, 12)).build();
        group.bench_with_input(BenchmarkId::from_parameter(tables), &catalog, |b, catalog| {
            b.to_async(&runtime).iter(|| async {
                let snapshot = build_snapshot(catalog, "test").await.unwrap();
                black_box(snapshot);
            });
        });
    }

    group.finish();
}

fn bench_to_json(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let catalog = SchemaFixtures::large_catalog(100, 12);
    let snapshot = runtime.block_on(build_snapshot(&catalog, "test")).unwrap();

    c.bench_function("snapshot/to_json_pretty_100_tables", |b| {
        b.iter(|| {
            let json = snapshot.to_json_pretty().unwrap();
            black_box(json);
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_resolve_table, bench_build_snapshot, bench_to_json
);

criterion_main!(benches);

//! Benchmarks for the checkin record store
//!
//! Run with: cargo bench

use checkin::store::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tempfile::tempdir;

fn sample_entry(i: usize) -> Entry {
    Entry::new(format!("respondent-{}", i), "Yes", (i % 10) as i64 + 1, "3 cups")
}

fn bench_log(c: &mut Criterion) {
    let mut group = c.benchmark_group("log");

    group.bench_function("append_single", |b| {
        let dir = tempdir().unwrap();
        let mut log = EntryLog::open(
            dir.path().join("bench.log"),
            SyncMode::None, // No fsync for benchmarking raw performance
        )
        .unwrap();

        let entry = sample_entry(0);

        b.iter(|| log.append(black_box(entry.clone())).unwrap());
    });

    group.bench_function("open_1000", |b| {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bench.log");
        {
            let mut log = EntryLog::open(&path, SyncMode::None).unwrap();
            for i in 0..1000 {
                log.append(sample_entry(i)).unwrap();
            }
            log.sync().unwrap();
        }

        b.iter(|| EntryLog::open(black_box(&path), SyncMode::None).unwrap().entry_count());
    });

    group.bench_function("read_1000", |b| {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bench.log");
        {
            let mut log = EntryLog::open(&path, SyncMode::None).unwrap();
            for i in 0..1000 {
                log.append(sample_entry(i)).unwrap();
            }
            log.sync().unwrap();
        }

        b.iter(|| LogIterator::new(&path).unwrap().count());
    });

    group.finish();
}

fn bench_sqlite(c: &mut Criterion) {
    let mut group = c.benchmark_group("sqlite");

    group.bench_function("insert_single", |b| {
        let dir = tempdir().unwrap();
        let mut table = EntryTable::open(dir.path().join("bench.db")).unwrap();

        let entry = sample_entry(0);

        b.iter(|| table.insert(black_box(entry.clone())).unwrap());
    });

    group.finish();
}

fn bench_store(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let mut group = c.benchmark_group("store");
    group.throughput(Throughput::Elements(1));

    for backend in [StoreBackend::Log, StoreBackend::Sqlite] {
        group.bench_function(format!("insert_{}", backend.as_str()), |b| {
            b.iter_custom(|iters| {
                rt.block_on(async {
                    let dir = tempdir().unwrap();
                    let config = StoreConfig {
                        sync_mode: SyncMode::None,
                        ..StoreConfig::new(dir.path()).backend(backend)
                    };
                    let store = open_store(&config).unwrap();

                    let start = std::time::Instant::now();

                    for i in 0..iters {
                        store.insert(sample_entry(i as usize)).await.unwrap();
                    }

                    start.elapsed()
                })
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_log, bench_sqlite, bench_store);
criterion_main!(benches);

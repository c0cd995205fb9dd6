//! Benchmarks for observable-collections
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use observable_collections::{Event, ObservableMap, ObservableSet, ObservableVec};

// =============================================================================
// EVENT BENCHMARKS
// =============================================================================

fn bench_event_invoke(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_invoke");
    for handlers in [0usize, 1, 8, 64] {
        let event: Event<(), u64> = Event::new();
        for _ in 0..handlers {
            event.listen(|_, n| {
                black_box(n);
                Ok(())
            });
        }
        group.bench_with_input(BenchmarkId::from_parameter(handlers), &handlers, |b, _| {
            b.iter(|| event.invoke(&(), black_box(&1)))
        });
    }
    group.finish();
}

// =============================================================================
// COLLECTION BENCHMARKS
// =============================================================================

fn bench_vec_append(c: &mut Criterion) {
    c.bench_function("vec_append_unobserved", |b| {
        let mut list: ObservableVec<u64> = ObservableVec::new();
        let mut i = 0u64;
        b.iter(|| {
            list.append(black_box(i)).ok();
            i += 1;
        })
    });

    c.bench_function("vec_append_observed", |b| {
        let mut list: ObservableVec<u64> = ObservableVec::new();
        list.collection_changed().listen(|_, change| {
            black_box(change.action());
            Ok(())
        });
        let mut i = 0u64;
        b.iter(|| {
            list.append(black_box(i)).ok();
            i += 1;
        })
    });
}

fn bench_set_update(c: &mut Criterion) {
    c.bench_function("set_update_half_new", |b| {
        b.iter_batched(
            || (0..1000u32).collect::<ObservableSet<u32>>(),
            |mut set| set.update([500..1500u32]).ok(),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_map_insert(c: &mut Criterion) {
    c.bench_function("map_insert_replace", |b| {
        let mut map: ObservableMap<u32, u32> = (0..100).map(|k| (k, k)).collect();
        map.collection_changed().listen(|_, change| {
            black_box(change.old_items());
            Ok(())
        });
        let mut i = 0u32;
        b.iter(|| {
            map.insert(i % 100, black_box(i)).ok();
            i += 1;
        })
    });
}

// =============================================================================
// CRITERION SETUP
// =============================================================================

criterion_group!(event_benches, bench_event_invoke);

criterion_group!(
    collection_benches,
    bench_vec_append,
    bench_set_update,
    bench_map_insert,
);

criterion_main!(event_benches, collection_benches);

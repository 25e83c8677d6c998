use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use plrucache::{EvictionPolicy, PriorityCache};

fn bench_cached_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hit", |b| {
        let mut cache = PriorityCache::new(1000, EvictionPolicy::Lru).unwrap();
        for key in 0..100 {
            cache.put(key, key);
        }

        let mut counter = 0;
        b.iter(|| {
            black_box(cache.get(counter % 100));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_read_50_write", |b| {
        let mut cache = PriorityCache::new(1000, EvictionPolicy::Lru).unwrap();
        for key in 0..100 {
            cache.put(key, key);
        }

        let mut counter = 0i32;
        b.iter(|| {
            if counter % 2 == 0 {
                black_box(cache.get(counter % 100));
            } else {
                black_box(cache.put(counter % 2000, counter));
            }
            counter = counter.wrapping_add(1);
        });
    });

    group.finish();
}

fn bench_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("eviction");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    for capacity in [16usize, 256, 1024] {
        for (name, policy) in [
            ("lru", EvictionPolicy::Lru),
            ("priority_lru", EvictionPolicy::hybrid()),
        ] {
            group.bench_with_input(BenchmarkId::new(name, capacity), &capacity, |b, &cap| {
                let mut cache = PriorityCache::new(cap, policy).unwrap();
                for key in 0..cap as i32 {
                    cache.put_with_priority(key, key, key % 3 + 1);
                }

                // Every put is a fresh key, so every put evicts
                let mut key = cap as i32;
                b.iter(|| {
                    black_box(cache.put_with_priority(key, key, key % 3 + 1));
                    key = key.wrapping_add(1);
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_cached_get, bench_mixed_50_50, bench_eviction);
criterion_main!(benches);

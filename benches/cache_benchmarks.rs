// Simple benchmarks using criterion instead of unstable test feature
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use meshcache::byte_view::ByteView;
use meshcache::cache::Cache;
use meshcache::lru::LruStore;
use meshcache::ring::Ring;

const CACHE_SIZE: usize = 1_000;
const NUM_OPERATIONS: usize = 10_000;

// Simple linear congruential generator for reproducible benchmarks
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(1_103_515_245).wrapping_add(12_345) & 0x7fff_ffff;
        self.state
    }
}

fn bench_lru_set(c: &mut Criterion) {
    c.bench_function("lru_store_set", |b| {
        b.iter(|| {
            let mut store: LruStore<ByteView> = LruStore::new((CACHE_SIZE * 32) as i64, None);
            for i in 0..NUM_OPERATIONS {
                let key = format!("key-{i}");
                store.set(key, ByteView::from(b"v".to_vec()));
            }
            black_box(store.len());
        });
    });
}

fn bench_lru_get_hit_and_miss(c: &mut Criterion) {
    let mut store: LruStore<ByteView> = LruStore::new((CACHE_SIZE * 32) as i64, None);
    for i in 0..CACHE_SIZE {
        store.set(format!("key-{i}"), ByteView::from(b"v".to_vec()));
    }
    let mut rng = SimpleRng::new(42);

    c.bench_function("lru_store_get", |b| {
        b.iter(|| {
            let i = rng.next_u64() as usize % (CACHE_SIZE * 2);
            black_box(store.get(&format!("key-{i}")));
        });
    });
}

fn bench_cache_concurrent_shape(c: &mut Criterion) {
    let cache = Cache::new((CACHE_SIZE * 32) as i64);
    c.bench_function("cache_set_get_roundtrip", |b| {
        b.iter(|| {
            cache.set("k", ByteView::from(b"v".to_vec()));
            black_box(cache.get("k"));
        });
    });
}

fn bench_ring_get(c: &mut Criterion) {
    let mut ring = Ring::new(150, None);
    ring.add((0..32).map(|i| format!("node-{i}")));
    let mut rng = SimpleRng::new(7);

    c.bench_function("ring_get", |b| {
        b.iter(|| {
            let key = format!("key-{}", rng.next_u64());
            black_box(ring.get(&key));
        });
    });
}

criterion_group!(
    benches,
    bench_lru_set,
    bench_lru_get_hit_and_miss,
    bench_cache_concurrent_shape,
    bench_ring_get
);
criterion_main!(benches);

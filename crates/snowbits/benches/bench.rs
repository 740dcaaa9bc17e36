use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use snowbits::{BitLayout, MonotonicClock, PackingRule, Snowflake, SnowflakeGenerator, TimeSource};
use std::{
    sync::{
        Arc, Barrier,
        atomic::{AtomicU64, Ordering},
    },
    thread::scope,
    time::{Instant, SystemTime},
};

#[derive(Default)]
struct FixedMockTime {
    millis: AtomicU64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis.load(Ordering::Relaxed)
    }
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

/// Hot path: a fresh generator per iteration on a frozen clock, so the 4096
/// IDs exactly fill one millisecond of a 12-bit counter.
fn bench_generate_fixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate/fixed");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let layout = BitLayout::default();
            let start = Instant::now();
            for _ in 0..iters {
                // Seed at tick 0 and freeze at tick 1 so counter 0 is free.
                let time = FixedMockTime::default();
                let generator = SnowflakeGenerator::with_clock(0, layout, &time).unwrap();
                time.millis.store(1, Ordering::Relaxed);
                for _ in 0..TOTAL_IDS {
                    black_box(generator.generate());
                }
            }
            start.elapsed()
        });
    });

    group.finish();
}

/// Realistic wall-clock behavior: generation spins whenever a millisecond's
/// counter is exhausted.
fn bench_generate_monotonic(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate/monotonic");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    let generator = SnowflakeGenerator::new(1, SystemTime::now(), 41, 10, 12).unwrap();
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.generate());
            }
        });
    });

    group.finish();
}

/// Contention: every thread shares one generator.
fn bench_generate_threaded(c: &mut Criterion, threads: usize) {
    let mut group = c.benchmark_group(format!("generate/threads/{threads}"));
    group.throughput(Throughput::Elements((TOTAL_IDS * threads) as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let layout = BitLayout::new(41, 10, 12)
                .unwrap()
                .with_packing(PackingRule::Contiguous);
            let clock = MonotonicClock::new(SystemTime::now()).unwrap();
            let generator = Arc::new(SnowflakeGenerator::with_clock(0, layout, clock).unwrap());
            let barrier = Arc::new(Barrier::new(threads + 1));

            let start = scope(|s| {
                for _ in 0..threads {
                    let generator = Arc::clone(&generator);
                    let barrier = Arc::clone(&barrier);
                    s.spawn(move || {
                        barrier.wait();
                        for _ in 0..iters {
                            for _ in 0..TOTAL_IDS {
                                black_box(generator.generate());
                            }
                        }
                    });
                }
                barrier.wait();
                Instant::now()
            });
            start.elapsed()
        });
    });

    group.finish();
}

fn bench_codecs(c: &mut Criterion) {
    let ids: Vec<Snowflake> = (0..TOTAL_IDS as i64)
        .map(|i| Snowflake::from_raw(i.wrapping_mul(0x9E37_79B9_7F4A_7C15_u64 as i64) & i64::MAX))
        .collect();
    let base64: Vec<String> = ids.iter().map(|id| id.encode_base64().to_string()).collect();
    let text: Vec<String> = ids.iter().map(Snowflake::encode_text).collect();

    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function("base64/encode", |b| {
        b.iter(|| {
            for id in &ids {
                black_box(id.encode_base64());
            }
        });
    });
    group.bench_function("base64/decode", |b| {
        b.iter(|| {
            for s in &base64 {
                black_box(Snowflake::decode_base64(s).unwrap());
            }
        });
    });
    group.bench_function("decimal/encode", |b| {
        b.iter(|| {
            for id in &ids {
                black_box(id.to_string());
            }
        });
    });
    group.bench_function("text/decode", |b| {
        b.iter(|| {
            for s in &text {
                black_box(Snowflake::decode_text(s).unwrap());
            }
        });
    });

    group.finish();
}

fn benchmarks(c: &mut Criterion) {
    bench_generate_fixed(c);
    bench_generate_monotonic(c);
    for threads in [2, 4, 8] {
        bench_generate_threaded(c, threads);
    }
    bench_codecs(c);
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);

//! Benchmarks for sybilglass operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sybilglass::{near_pairs, score_address, Address, Analyzer, ChecksumStyle};

/// Deterministic random address set. A shared leading byte keeps a realistic
/// amount of bucket collision in the proximity scan.
fn synthetic_addresses(count: usize, seed: u64) -> Vec<Address> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out: Vec<Address> = (0..count)
        .map(|_| {
            let mut bytes = [0u8; 20];
            rng.fill_bytes(&mut bytes);
            bytes[0] = 0xab;
            Address::from_bytes(bytes)
        })
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}

fn benchmark_parse(c: &mut Criterion) {
    c.bench_function("address_parse", |b| {
        b.iter(|| Address::parse(black_box("0x8ba1f109551bD432803012645Ac136ddd64DBA72")))
    });
}

fn benchmark_score(c: &mut Criterion) {
    let addr = Address::parse("0x8ba1f109551bd432803012645ac136ddd64dba72").unwrap();

    c.bench_function("score_address", |b| {
        b.iter(|| score_address(black_box(addr), ChecksumStyle::Mixed))
    });
}

fn benchmark_near_pairs(c: &mut Criterion) {
    let addrs = synthetic_addresses(10_000, 42);

    c.bench_function("near_pairs_10k", |b| {
        b.iter(|| near_pairs(black_box(&addrs), 12, 1_200_000))
    });
}

fn benchmark_full_pipeline(c: &mut Criterion) {
    let raw: Vec<String> = synthetic_addresses(2_000, 7)
        .iter()
        .map(|a| a.to_string())
        .collect();
    let analyzer = Analyzer::new();

    c.bench_function("analyze_2k", |b| {
        b.iter(|| analyzer.analyze(black_box(raw.iter())))
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_score,
    benchmark_near_pairs,
    benchmark_full_pipeline
);
criterion_main!(benches);

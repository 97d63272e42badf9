//! Near-Duplicate Scan
//!
//! Shows how the Hamming threshold changes what the proximity scan reports:
//! a scripted cluster of derived addresses lights up at small thresholds,
//! while unrelated random addresses stay dark even at generous ones.
//!
//! Run: cargo run --example near_duplicate_scan

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sybilglass::{near_pairs, Address};

fn main() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    // a derivation cluster: one base payload, low byte perturbed
    let mut base = [0u8; 20];
    rng.fill_bytes(&mut base);
    let mut addresses: Vec<Address> = (0u8..8)
        .map(|i| {
            let mut bytes = base;
            bytes[19] ^= i;
            Address::from_bytes(bytes)
        })
        .collect();

    // unrelated background addresses
    for _ in 0..200 {
        let mut bytes = [0u8; 20];
        rng.fill_bytes(&mut bytes);
        addresses.push(Address::from_bytes(bytes));
    }

    addresses.sort_unstable();
    addresses.dedup();

    println!("=== Near-Duplicate Scan ({} addresses) ===\n", addresses.len());
    println!("{:>9}  {:>5}  {:>11}  {}", "threshold", "pairs", "comparisons", "truncated");
    for threshold in [2, 4, 8, 12, 16] {
        let scan = near_pairs(&addresses, threshold, 1_200_000);
        println!(
            "{:>9}  {:>5}  {:>11}  {}",
            threshold,
            scan.pairs.len(),
            scan.comparisons,
            scan.truncated
        );
    }

    let scan = near_pairs(&addresses, 8, 1_200_000);
    println!("\nPairs at threshold 8:");
    for pair in &scan.pairs {
        println!("  {}  {}  d={}", pair.addr1, pair.addr2, pair.distance);
    }
}

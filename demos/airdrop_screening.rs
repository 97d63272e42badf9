//! Airdrop List Screening
//!
//! Builds a synthetic airdrop list mixing organic wallets with scripted
//! entries (duplicates, vanity patterns, near-duplicate derivations), runs
//! the full analysis pipeline, and prints the report the way a downstream
//! JSON adapter would.
//!
//! Run: cargo run --example airdrop_screening

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sybilglass::{Address, Analyzer};

/// Organic-looking wallets: random payloads, EIP-55-style mixed casing.
fn organic_wallets(count: usize, rng: &mut ChaCha8Rng) -> Vec<String> {
    (0..count)
        .map(|_| {
            let mut bytes = [0u8; 20];
            rng.fill_bytes(&mut bytes);
            let lower = Address::from_bytes(bytes).payload();
            let cased: String = lower
                .chars()
                .map(|c| {
                    if c.is_ascii_alphabetic() && rng.gen_bool(0.5) {
                        c.to_ascii_uppercase()
                    } else {
                        c
                    }
                })
                .collect();
            format!("0x{cased}")
        })
        .collect()
}

/// Scripted farm: one base payload with low bits incremented, all lowercase.
fn derived_farm(base_seed: u64, count: usize) -> Vec<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(base_seed);
    let mut base = [0u8; 20];
    rng.fill_bytes(&mut base);
    (0..count as u8)
        .map(|i| {
            let mut bytes = base;
            bytes[19] = bytes[19].wrapping_add(i);
            Address::from_bytes(bytes).to_string()
        })
        .collect()
}

/// Vanity entries: repeated-nibble runs and mirrored payloads.
fn vanity_entries() -> Vec<String> {
    vec![
        format!("0x{}", "0".repeat(40)),
        "0x1111111abcdef01234567890abcdef0123456789".to_string(),
        "0x0011223344556677889999887766554433221100".to_string(),
        format!("0xdead{}beef", "0".repeat(32)),
    ]
}

fn main() {
    let mut rng = ChaCha8Rng::seed_from_u64(1337);

    let mut list = organic_wallets(400, &mut rng);
    list.extend(derived_farm(99, 25));
    list.extend(vanity_entries());
    // duplicated submissions, one with different casing
    let dup = list[0].clone();
    list.push(dup.clone());
    list.push(dup.to_lowercase());
    // the usual noise
    list.push("n/a".to_string());
    list.push("0x123".to_string());

    let analyzer = Analyzer::new().with_threshold(12);
    let report = analyzer.analyze(&list).expect("list contains valid addresses");

    println!("=== Airdrop List Screening ===\n");
    println!(
        "input: {} valid ({} unique, {} duplicates)",
        report.total_input, report.unique, report.duplicates
    );
    println!("health index: {:.2} / 100 (higher = riskier)", report.health_index);
    println!(
        "near pairs (d <= {}): {}{}",
        report.threshold,
        report.near_pair_count,
        if report.pairs_truncated { " [truncated]" } else { "" }
    );
    println!(
        "vanity runs: {}  low entropy: {}  checksum mix: {:?}",
        report.vanity_runs, report.low_entropy, report.checksum_mix
    );

    println!("\nTop suspicious addresses:");
    for score in report.top_suspicious(5) {
        let notes: Vec<String> = score.notes.iter().map(|n| n.to_string()).collect();
        println!(
            "  {}  {:5.1}  {}",
            score.address,
            score.suspicion,
            notes.join("; ")
        );
    }

    // what a JSON adapter would emit
    let summary = serde_json::json!({
        "totals": {
            "input": report.total_input,
            "unique": report.unique,
            "duplicates": report.duplicates,
        },
        "health_index": report.health_index,
        "checksum_mix": report.checksum_mix,
        "top_prefix4": report.top_prefix4,
        "top_suffix4": report.top_suffix4,
        "vanity_runs_ge6": report.vanity_runs,
        "low_entropy_lt3": report.low_entropy,
        "threshold_hamming": report.threshold,
        "near_pairs_count": report.near_pair_count,
    });
    println!(
        "\nJSON summary:\n{}",
        serde_json::to_string_pretty(&summary).unwrap()
    );
}

//! List-level aggregation and the analysis report.
//!
//! The health index is a fixed linear model over five ratios; there is no
//! learning or per-run calibration, so the same input always yields the
//! same index.

use std::collections::HashMap;

use serde::Serialize;

use crate::address::ChecksumStyle;
use crate::proximity::ProximityScan;
use crate::scoring::{AddressScore, LOW_ENTROPY_BITS};

/// Run length from which an address counts toward the vanity ratio.
const VANITY_RUN: usize = 6;

/// Entries kept in the prefix/suffix collision tables.
const TOP_K: usize = 5;

/// Health index weights, summing to 1.0.
const W_DUP: f64 = 0.25;
const W_PAIRS: f64 = 0.30;
const W_VANITY: f64 = 0.20;
const W_LOW_ENTROPY: f64 = 0.15;
const W_CHECKSUM_SKEW: f64 = 0.10;

/// Checksum-style histogram over the unique address set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChecksumMix {
    pub lower: usize,
    pub upper: usize,
    pub mixed: usize,
}

impl ChecksumMix {
    fn record(&mut self, style: ChecksumStyle) {
        match style {
            ChecksumStyle::Lower => self.lower += 1,
            ChecksumStyle::Upper => self.upper += 1,
            ChecksumStyle::Mixed => self.mixed += 1,
        }
    }
}

/// Aggregate report over one analysis run.
///
/// Built once, read-only afterwards; this is the payload downstream
/// adapters serialize. The health index is rounded to 2 decimals.
#[derive(Clone, Debug, Serialize)]
pub struct AnalysisReport {
    /// Valid inputs, duplicates included
    pub total_input: usize,
    /// Unique canonical addresses
    pub unique: usize,
    /// Valid inputs collapsed as duplicates
    pub duplicates: usize,
    /// List-level risk index, 0–100, higher = riskier
    pub health_index: f64,
    /// Hamming threshold the pair scan used
    pub threshold: u32,
    pub checksum_mix: ChecksumMix,
    /// Most common 4-nibble prefixes, count-descending
    pub top_prefix4: Vec<(String, usize)>,
    /// Most common 4-nibble suffixes, count-descending
    pub top_suffix4: Vec<(String, usize)>,
    /// Addresses with a nibble run of 6 or longer
    pub vanity_runs: usize,
    /// Addresses with entropy below 3.0 bits/nibble
    pub low_entropy: usize,
    pub near_pair_count: usize,
    /// Whether the pair scan hit its comparison budget
    pub pairs_truncated: bool,
    /// One score per unique address, in canonical address order
    pub scores: Vec<AddressScore>,
    pub pairs: Vec<crate::proximity::NearPair>,
}

impl AnalysisReport {
    /// Aggregate per-address scores and the pair scan into a report.
    ///
    /// `scores` must be in canonical address order (one per unique
    /// address); `total_input` counts valid inputs before deduplication.
    pub fn build(
        total_input: usize,
        scores: Vec<AddressScore>,
        scan: ProximityScan,
        threshold: u32,
    ) -> Self {
        let unique = scores.len();
        let duplicates = total_input - unique;

        let mut checksum_mix = ChecksumMix::default();
        let mut prefix_counts: HashMap<&str, usize> = HashMap::new();
        let mut suffix_counts: HashMap<&str, usize> = HashMap::new();
        let mut vanity_runs = 0;
        let mut low_entropy = 0;

        for score in &scores {
            checksum_mix.record(score.checksum_style);
            *prefix_counts.entry(score.prefix4.as_str()).or_default() += 1;
            *suffix_counts.entry(score.suffix4.as_str()).or_default() += 1;
            if score.max_run >= VANITY_RUN {
                vanity_runs += 1;
            }
            if score.entropy < LOW_ENTROPY_BITS {
                low_entropy += 1;
            }
        }

        let top_prefix4 = top_k(prefix_counts);
        let top_suffix4 = top_k(suffix_counts);

        let health_index = health_index(
            total_input,
            unique,
            duplicates,
            scan.pairs.len(),
            vanity_runs,
            low_entropy,
            checksum_mix.mixed,
        );

        AnalysisReport {
            total_input,
            unique,
            duplicates,
            health_index,
            threshold,
            checksum_mix,
            top_prefix4,
            top_suffix4,
            vanity_runs,
            low_entropy,
            near_pair_count: scan.pairs.len(),
            pairs_truncated: scan.truncated,
            scores,
            pairs: scan.pairs,
        }
    }

    /// The `k` most suspicious addresses, score-descending.
    ///
    /// Ties break on canonical address order so the preview is stable.
    pub fn top_suspicious(&self, k: usize) -> Vec<&AddressScore> {
        let mut ranked: Vec<&AddressScore> = self.scores.iter().collect();
        ranked.sort_by(|a, b| {
            b.suspicion
                .partial_cmp(&a.suspicion)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.address.cmp(&b.address))
        });
        ranked.truncate(k);
        ranked
    }
}

/// Weighted linear health index, clamped to [0, 100].
///
/// Components: duplicate ratio, pair density, vanity ratio, low-entropy
/// ratio, checksum-style skew. Denominators floor at 1 so an empty or
/// single-address list never divides by zero.
pub fn health_index(
    total_input: usize,
    unique: usize,
    duplicates: usize,
    pair_count: usize,
    vanity_runs: usize,
    low_entropy: usize,
    mixed_count: usize,
) -> f64 {
    let total = total_input.max(1) as f64;
    let n = unique.max(1) as f64;

    let dup_ratio = duplicates as f64 / total;
    let pair_density = pair_count as f64 / n;
    let vanity_ratio = vanity_runs as f64 / n;
    let low_entropy_ratio = low_entropy as f64 / n;
    let checksum_skew = 1.0 - (mixed_count as f64 / n);

    let raw = dup_ratio * 100.0 * W_DUP
        + pair_density * 100.0 * W_PAIRS
        + vanity_ratio * 100.0 * W_VANITY
        + low_entropy_ratio * 100.0 * W_LOW_ENTROPY
        + checksum_skew * 100.0 * W_CHECKSUM_SKEW;

    round2(raw.clamp(0.0, 100.0))
}

fn top_k(counts: HashMap<&str, usize>) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(TOP_K);
    entries
}

/// Round to 2 decimal places (report precision contract).
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

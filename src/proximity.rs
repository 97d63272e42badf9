//! Near-duplicate pair detection.
//!
//! Reports all unordered address pairs within a Hamming distance threshold
//! without paying the full O(n²) pairwise cost: addresses are bucketed by
//! their first 6 hex characters (24 bits) and only compared within a
//! bucket.
//!
//! The bucketing is deliberately lossy. Two addresses that differ anywhere
//! in those leading 6 characters are never compared, even when their full
//! 160-bit Hamming distance is inside the threshold; such pairs are a known
//! false negative of the heuristic. This is a precision/performance
//! trade-off, not a bug — replacing it with exhaustive search would change
//! both the running time and the reported pair counts.
//!
//! A global comparison budget additionally bounds total work. Once spent,
//! the scan stops and returns whatever pairs were already found; the
//! [`ProximityScan::truncated`] flag tells callers the result may be
//! incomplete on very large or pathologically clustered inputs.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::address::Address;
use crate::features::hamming;

/// Default Hamming distance threshold for near pairs.
pub const DEFAULT_THRESHOLD: u32 = 12;

/// Default cap on total pairwise comparisons.
pub const DEFAULT_COMPARISON_BUDGET: u64 = 1_200_000;

/// Two distinct addresses within the Hamming threshold.
///
/// Undirected, but always reported with `addr1 < addr2` in canonical order
/// so each pair is emitted exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NearPair {
    pub addr1: Address,
    pub addr2: Address,
    /// Hamming distance over the full 160-bit payloads
    pub distance: u32,
}

/// Result of a proximity scan.
#[derive(Clone, Debug, Serialize)]
pub struct ProximityScan {
    /// Pairs found, in deterministic bucket-then-scan order
    pub pairs: Vec<NearPair>,
    /// Pairwise comparisons actually performed
    pub comparisons: u64,
    /// Whether the comparison budget ran out before the scan finished
    pub truncated: bool,
}

/// Find near-duplicate pairs among sorted unique addresses.
///
/// `addresses` must be sorted and deduplicated (the canonical set produced
/// by [`crate::address::dedupe_first_seen`]); sortedness is what guarantees
/// `addr1 < addr2` within each emitted pair. Buckets are walked in key
/// order, so output order and the budget cut-off point are reproducible.
pub fn near_pairs(addresses: &[Address], threshold: u32, budget: u64) -> ProximityScan {
    let mut buckets: BTreeMap<[u8; 3], Vec<&Address>> = BTreeMap::new();
    for addr in addresses {
        // first 6 hex chars = first 3 bytes
        let b = addr.bytes();
        buckets.entry([b[0], b[1], b[2]]).or_default().push(addr);
    }

    let mut pairs = Vec::new();
    let mut comparisons = 0u64;

    for group in buckets.values() {
        for i in 0..group.len() {
            for j in (i + 1)..group.len() {
                if comparisons >= budget {
                    return ProximityScan {
                        pairs,
                        comparisons,
                        truncated: true,
                    };
                }
                comparisons += 1;
                let distance = hamming(group[i], group[j]);
                if distance <= threshold {
                    pairs.push(NearPair {
                        addr1: *group[i],
                        addr2: *group[j],
                        distance,
                    });
                }
            }
        }
    }

    ProximityScan {
        pairs,
        comparisons,
        truncated: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addrs(raws: &[&str]) -> Vec<Address> {
        let mut out: Vec<Address> = raws.iter().map(|s| Address::parse(s).unwrap()).collect();
        out.sort_unstable();
        out
    }

    #[test]
    fn test_single_close_pair_reported_once() {
        let set = addrs(&[
            "0x000000000000000000000000000000000000aaaa",
            "0x000000000000000000000000000000000000aaab",
        ]);
        let scan = near_pairs(&set, 4, DEFAULT_COMPARISON_BUDGET);
        assert_eq!(scan.pairs.len(), 1);
        assert_eq!(scan.pairs[0].distance, 1);
        assert!(scan.pairs[0].addr1 < scan.pairs[0].addr2);
        assert!(!scan.truncated);
        assert_eq!(scan.comparisons, 1);
    }

    #[test]
    fn test_threshold_excludes_distant_pairs() {
        let set = addrs(&[
            "0x0000000000000000000000000000000000000000",
            "0x000000000000000000000000000000ffffffffff",
        ]);
        let scan = near_pairs(&set, 12, DEFAULT_COMPARISON_BUDGET);
        // same bucket (leading zeros) but 40 bits apart
        assert_eq!(scan.comparisons, 1);
        assert!(scan.pairs.is_empty());
    }

    #[test]
    fn test_differing_leading_prefix_is_never_compared() {
        // distance 1 over the full payload, but the difference sits in the
        // bucketing prefix: a known false negative of the heuristic
        let set = addrs(&[
            "0x1000000000000000000000000000000000000000",
            "0x0000000000000000000000000000000000000000",
        ]);
        let scan = near_pairs(&set, 12, DEFAULT_COMPARISON_BUDGET);
        assert_eq!(scan.comparisons, 0);
        assert!(scan.pairs.is_empty());
    }

    #[test]
    fn test_all_bucket_pairs_enumerated() {
        let set = addrs(&[
            "0xabc0000000000000000000000000000000000001",
            "0xabc0000000000000000000000000000000000002",
            "0xabc0000000000000000000000000000000000003",
            "0xabc0000000000000000000000000000000000004",
        ]);
        let scan = near_pairs(&set, 160, DEFAULT_COMPARISON_BUDGET);
        // C(4,2) comparisons, every pair within threshold, none repeated
        assert_eq!(scan.comparisons, 6);
        assert_eq!(scan.pairs.len(), 6);
        for pair in &scan.pairs {
            assert!(pair.addr1 < pair.addr2);
        }
    }

    #[test]
    fn test_budget_truncates_softly() {
        let set = addrs(&[
            "0xabc0000000000000000000000000000000000001",
            "0xabc0000000000000000000000000000000000002",
            "0xabc0000000000000000000000000000000000003",
            "0xabc0000000000000000000000000000000000004",
        ]);
        let scan = near_pairs(&set, 160, 3);
        assert!(scan.truncated);
        assert_eq!(scan.comparisons, 3);
        assert_eq!(scan.pairs.len(), 3);
    }

    #[test]
    fn test_scan_order_is_deterministic() {
        let set = addrs(&[
            "0xfff0000000000000000000000000000000000001",
            "0xfff0000000000000000000000000000000000002",
            "0x0000000000000000000000000000000000000001",
            "0x0000000000000000000000000000000000000002",
        ]);
        let a = near_pairs(&set, 160, DEFAULT_COMPARISON_BUDGET);
        let b = near_pairs(&set, 160, DEFAULT_COMPARISON_BUDGET);
        assert_eq!(a.pairs, b.pairs);
        // low bucket scans before high bucket
        assert!(a.pairs[0].addr1 < a.pairs[1].addr1);
    }
}

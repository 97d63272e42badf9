//! # Sybilglass: offline airdrop-list heuristics
//!
//! Sybilglass flags signs of scripted or low-quality generation in lists of
//! EVM addresses — duplicate clustering, near-duplicate derivation, vanity
//! patterns — from the address strings alone. No network calls, no chain
//! state: every signal is computed offline over the 160-bit payloads.
//!
//! ## Quick Start
//!
//! ```rust
//! use sybilglass::Analyzer;
//!
//! let report = Analyzer::new().analyze([
//!     "0x8ba1f109551bD432803012645Ac136ddd64DBA72",
//!     "0x000000000000000000000000000000000000aaaa",
//!     "0x000000000000000000000000000000000000aaab",
//!     "not an address",
//! ])?;
//!
//! println!("health index: {}", report.health_index);
//! for score in report.top_suspicious(3) {
//!     println!("{}  {:.0}  {:?}", score.address, score.suspicion, score.notes);
//! }
//! # Ok::<(), sybilglass::SybilError>(())
//! ```
//!
//! ## Signals
//!
//! - **Near pairs**: addresses very close in 160-bit Hamming space suggest
//!   scripted or vanity derivation.
//! - **Prefix/suffix collisions**: many addresses sharing the same leading
//!   or trailing 4 nibbles.
//! - **Vanity runs**: long repeats of one nibble are rare at random.
//! - **Entropy**: unusually low per-nibble entropy hints at constrained
//!   generation.
//! - **Checksum style**: skew away from mixed-case (EIP-55-style) casing
//!   can indicate a single generation pipeline.

pub mod address;
pub mod error;
pub mod features;
pub mod proximity;
pub mod report;
pub mod scoring;

// Re-exports for convenience
pub use address::{dedupe_first_seen, Address, ChecksumStyle, DedupedInput};
pub use error::{Result, SybilError};
pub use proximity::{near_pairs, NearPair, ProximityScan};
pub use report::{health_index, AnalysisReport, ChecksumMix};
pub use scoring::{score_address, AddressScore, Reason};

/// The main entry point: configuration plus the full analysis pipeline.
///
/// An `Analyzer` holds the two run parameters — the Hamming threshold for
/// near pairs and the global comparison budget — and runs the whole
/// pipeline (normalize → dedupe → score → pair scan → aggregate) in one
/// synchronous call. Each stage is also available directly for callers
/// that only need a piece of it.
///
/// # Example
///
/// ```rust
/// use sybilglass::Analyzer;
///
/// let analyzer = Analyzer::new().with_threshold(14);
/// let report = analyzer.analyze(["0x8ba1f109551bd432803012645ac136ddd64dba72"])?;
/// assert_eq!(report.unique, 1);
/// # Ok::<(), sybilglass::SybilError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Analyzer {
    threshold: u32,
    comparison_budget: u64,
}

impl Analyzer {
    /// Create an analyzer with the default threshold (12) and comparison
    /// budget (1,200,000).
    pub fn new() -> Self {
        Self {
            threshold: proximity::DEFAULT_THRESHOLD,
            comparison_budget: proximity::DEFAULT_COMPARISON_BUDGET,
        }
    }

    /// Set the Hamming distance threshold for near pairs (lower = stricter).
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the cap on total pairwise comparisons in the proximity scan.
    pub fn with_comparison_budget(mut self, budget: u64) -> Self {
        self.comparison_budget = budget;
        self
    }

    /// The configured Hamming threshold.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// The configured comparison budget.
    pub fn comparison_budget(&self) -> u64 {
        self.comparison_budget
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    /// Analyze a batch of candidate address strings.
    ///
    /// Malformed entries are skipped; duplicates collapse to one canonical
    /// address with first-seen casing. Fails only when nothing valid
    /// remains.
    pub fn analyze<I, S>(&self, candidates: I) -> Result<AnalysisReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let deduped = dedupe_first_seen(candidates);
        if deduped.unique.is_empty() {
            return Err(SybilError::NoValidAddresses);
        }

        let scores: Vec<AddressScore> = deduped
            .unique
            .iter()
            .map(|&addr| score_address(addr, deduped.styles[&addr]))
            .collect();

        let scan = near_pairs(&deduped.unique, self.threshold, self.comparison_budget);

        Ok(AnalysisReport::build(
            deduped.total_valid,
            scores,
            scan,
            self.threshold,
        ))
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_rejects_empty_valid_set() {
        let analyzer = Analyzer::new();
        assert!(matches!(
            analyzer.analyze(Vec::<&str>::new()),
            Err(SybilError::NoValidAddresses)
        ));
        assert!(matches!(
            analyzer.analyze(["garbage", "0x123", ""]),
            Err(SybilError::NoValidAddresses)
        ));
    }

    #[test]
    fn test_malformed_entries_are_skipped_not_fatal() {
        let report = Analyzer::new()
            .analyze([
                "0x8ba1f109551bd432803012645ac136ddd64dba72",
                "definitely not hex",
                "0xtooshort",
            ])
            .unwrap();
        assert_eq!(report.total_input, 1);
        assert_eq!(report.unique, 1);
    }

    #[test]
    fn test_near_pair_scenario() {
        // two addresses one nibble-bit apart, strict threshold
        let report = Analyzer::new()
            .with_threshold(4)
            .analyze([
                "0x000000000000000000000000000000000000aaaa",
                "0x000000000000000000000000000000000000aaab",
            ])
            .unwrap();
        assert_eq!(report.near_pair_count, 1);
        assert_eq!(report.pairs[0].distance, 1);
        assert!(report.pairs[0].addr1 < report.pairs[0].addr2);
    }

    #[test]
    fn test_duplicate_casing_scenario() {
        // same address twice in different casing: first-seen casing wins
        let report = Analyzer::new()
            .analyze([
                "0xABCDEF0123456789ABCDEF0123456789ABCDEF01",
                "0xabcdef0123456789abcdef0123456789abcdef01",
            ])
            .unwrap();
        assert_eq!(report.unique, 1);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.scores[0].checksum_style, ChecksumStyle::Upper);
    }

    #[test]
    fn test_scores_sorted_by_canonical_address() {
        let report = Analyzer::new()
            .analyze([
                "0xff00000000000000000000000000000000000000",
                "0x8ba1f109551bd432803012645ac136ddd64dba72",
                "0x0000000000000000000000000000000000000001",
            ])
            .unwrap();
        let rendered: Vec<String> = report
            .scores
            .iter()
            .map(|s| s.address.to_string())
            .collect();
        let mut sorted = rendered.clone();
        sorted.sort();
        assert_eq!(rendered, sorted);
    }

    #[test]
    fn test_suspicion_bounded_for_worst_inputs() {
        let report = Analyzer::new()
            .analyze([
                "0000000000000000000000000000000000000000",
                "1111111111111111111111111111111111111111",
                "ffffffffffffffffffffffffffffffffffffffff",
                "0xFFFF0000000000000000000000000000000FFFF0",
            ])
            .unwrap();
        for score in &report.scores {
            assert!((0.0..=100.0).contains(&score.suspicion));
        }
        assert!(report.health_index <= 100.0);
    }

    #[test]
    fn test_report_is_deterministic() {
        let inputs = [
            "0xabc0000000000000000000000000000000000001",
            "0xabc0000000000000000000000000000000000002",
            "0x8ba1f109551bd432803012645ac136ddd64dba72",
            "0xABC0000000000000000000000000000000000001",
        ];
        let a = Analyzer::new().analyze(inputs).unwrap();
        let b = Analyzer::new().analyze(inputs).unwrap();
        assert_eq!(a.health_index, b.health_index);
        assert_eq!(a.pairs, b.pairs);
        let a_addrs: Vec<String> = a.scores.iter().map(|s| s.address.to_string()).collect();
        let b_addrs: Vec<String> = b.scores.iter().map(|s| s.address.to_string()).collect();
        assert_eq!(a_addrs, b_addrs);
    }

    #[test]
    fn test_budget_propagates_to_report() {
        let report = Analyzer::new()
            .with_threshold(160)
            .with_comparison_budget(1)
            .analyze([
                "0xabc0000000000000000000000000000000000001",
                "0xabc0000000000000000000000000000000000002",
                "0xabc0000000000000000000000000000000000003",
            ])
            .unwrap();
        assert!(report.pairs_truncated);
        assert_eq!(report.near_pair_count, 1);
    }

    #[test]
    fn test_report_serializes() {
        let report = Analyzer::new()
            .analyze(["0x8ba1f109551bd432803012645ac136ddd64dba72"])
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json["scores"][0]["address"],
            "0x8ba1f109551bd432803012645ac136ddd64dba72"
        );
        assert_eq!(json["unique"], 1);
    }
}

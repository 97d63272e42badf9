//! Per-address suspicion scoring.
//!
//! A deterministic rule list: each rule looks only at the address's own
//! features, contributes an additive capped amount, and records a
//! [`Reason`]. There is no normalization across the population, so scoring
//! one address never depends on the rest of the list.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::address::{Address, ChecksumStyle};
use crate::features;

/// Prefixes/suffixes considered vanity targets.
const VANITY_AFFIXES: [&str; 3] = ["0000", "1111", "ffff"];

/// Run length at which repeated nibbles start scoring.
const RUN_THRESHOLD: usize = 6;

/// Entropy (bits/nibble) below which a payload counts as low entropy.
pub const LOW_ENTROPY_BITS: f64 = 3.0;

/// A scoring rule that fired, with the datum behind it.
///
/// Reasons are enumerated codes rather than free-form strings so tests can
/// assert exactly which rule fired; `Display` carries the human-readable
/// message, and serialization uses that message.
#[derive(Clone, Debug, PartialEq)]
pub enum Reason {
    /// Rule 1: long run of identical consecutive nibbles
    RepeatedRun { length: usize },
    /// Rule 2: payload entropy below [`LOW_ENTROPY_BITS`]
    LowEntropy { entropy: f64 },
    /// Rule 3: vanity prefix
    VanityPrefix { prefix: String },
    /// Rule 4: vanity suffix
    VanitySuffix { suffix: String },
    /// Rule 5: payload reads the same reversed
    Palindrome,
    /// Rule 6: uniformly cased source string (no EIP-55-style checksum)
    UncheckedStyle { style: ChecksumStyle },
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::RepeatedRun { length } => {
                write!(f, "long repeated nibble run: {length}")
            }
            Reason::LowEntropy { entropy } => {
                write!(f, "low entropy: {entropy:.2} bits/nibble")
            }
            Reason::VanityPrefix { prefix } => write!(f, "vanity prefix: {prefix}"),
            Reason::VanitySuffix { suffix } => write!(f, "vanity suffix: {suffix}"),
            Reason::Palindrome => write!(f, "palindrome payload"),
            Reason::UncheckedStyle { style } => {
                write!(f, "non-checksummed style: {style}")
            }
        }
    }
}

impl Serialize for Reason {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Derived, immutable feature-and-score record for one unique address.
#[derive(Clone, Debug, Serialize)]
pub struct AddressScore {
    /// Canonical address
    pub address: Address,
    /// Casing style of the first-seen source string
    pub checksum_style: ChecksumStyle,
    /// Longest identical-nibble run in the payload
    pub max_run: usize,
    /// Shannon entropy of the payload, bits per nibble
    pub entropy: f64,
    /// Whether the payload is a palindrome
    pub palindrome: bool,
    /// First four payload nibbles
    pub prefix4: String,
    /// Last four payload nibbles
    pub suffix4: String,
    /// Suspicion score, clamped to [0, 100]
    pub suspicion: f64,
    /// Reasons in rule-evaluation order, at most one per rule
    pub notes: Vec<Reason>,
}

/// Extract features and apply the suspicion rules to one canonical address.
///
/// `style` is the checksum style of the original (pre-normalization) source
/// string; the canonical form is always lowercase and would misreport it.
pub fn score_address(address: Address, style: ChecksumStyle) -> AddressScore {
    let payload = address.payload();
    let max_run = features::max_run(&payload);
    let entropy = features::shannon_entropy(&payload);
    let palindrome = features::is_palindrome(&payload);
    let prefix4 = features::prefix4(&payload).to_string();
    let suffix4 = features::suffix4(&payload).to_string();

    let mut notes = Vec::new();
    let mut score = 0.0;

    if max_run >= RUN_THRESHOLD {
        notes.push(Reason::RepeatedRun { length: max_run });
        score += (20.0 + (max_run - RUN_THRESHOLD) as f64 * 2.0).min(35.0);
    }
    if entropy < LOW_ENTROPY_BITS {
        notes.push(Reason::LowEntropy { entropy });
        score += 15.0;
    }
    if VANITY_AFFIXES.contains(&prefix4.as_str()) {
        notes.push(Reason::VanityPrefix {
            prefix: prefix4.clone(),
        });
        score += 10.0;
    }
    if VANITY_AFFIXES.contains(&suffix4.as_str()) {
        notes.push(Reason::VanitySuffix {
            suffix: suffix4.clone(),
        });
        score += 10.0;
    }
    if palindrome {
        notes.push(Reason::Palindrome);
        score += 10.0;
    }
    if style != ChecksumStyle::Mixed {
        notes.push(Reason::UncheckedStyle { style });
        score += 5.0;
    }

    AddressScore {
        address,
        checksum_style: style,
        max_run,
        entropy,
        palindrome,
        prefix4,
        suffix4,
        suspicion: score.clamp(0.0, 100.0),
        notes,
    }
}
